#![no_main]

use distinct_estimator::{Estimator, MAX_PRECISION, MIN_PRECISION};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let span = u64::from(MAX_PRECISION - MIN_PRECISION + 1);
    let precision = MIN_PRECISION + (wyhash(data, 0) % span) as u8;
    let max_rho = 64 - precision + 1;

    let mut estimator = Estimator::<[u8]>::new(precision).unwrap();
    let mut previous: Vec<u8> = estimator.registers().collect();
    for chunk in data.chunks(4) {
        estimator.insert(chunk).unwrap();
        let current: Vec<u8> = estimator.registers().collect();
        assert!(previous.iter().zip(&current).all(|(p, c)| p <= c));
        assert!(current.iter().all(|&r| r <= max_rho));
        previous = current;

        let estimate = estimator.estimate_cardinality();
        assert!(estimate > 0);
        assert_eq!(estimator.estimate_cardinality(), estimate);
    }
});
