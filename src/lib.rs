//! `distinct-estimator` is a Rust crate estimating the number of distinct keys in a stream or dataset
//! using bounded memory, e.g. to approximate `COUNT(DISTINCT x)` during query planning.
//!
//! This library implements the classic HyperLogLog estimator with a pluggable digest producer.
//!
//! ```
//! use distinct_estimator::StrEstimator;
//!
//! let mut estimator = StrEstimator::new(12).unwrap();
//! for key in ["a", "b", "c", "a"] {
//!     estimator.insert(key).unwrap();
//! }
//! assert!(estimator.estimate_cardinality() > 0);
//! ```
mod config;
mod digest;
mod error;
pub mod estimator;
mod registers;

pub use config::{Precision, DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
pub use digest::{DigestProducer, HashDigest};
pub use error::{EstimatorError, Result};
pub use estimator::{Estimator, IntEstimator, StrEstimator};
