use distinct_estimator::{IntEstimator, StrEstimator};
use tracing_subscriber::EnvFilter;

fn main() -> distinct_estimator::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut ids = IntEstimator::new(14)?;
    for i in 0..1_000_000i64 {
        // every id is seen three times
        ids.insert(&(i % 250_000))?;
    }
    println!("distinct ids estimate = {} (actual 250000)", ids.estimate_cardinality());

    let mut words = StrEstimator::new(4)?;
    for word in "the quick brown fox jumps over the lazy dog".split(' ') {
        words.insert(word)?;
    }
    println!("distinct words estimate = {} (actual 8)", words.estimate_cardinality());
    println!("words estimator = {:?}", words);

    if let Err(err) = IntEstimator::new(20) {
        println!("precision 20 rejected: {err}");
    }
    Ok(())
}
