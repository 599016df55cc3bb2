//! Errors surfaced by `Estimator` construction and insertion.

/// Estimator error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimatorError {
    /// Precision outside of the supported `[min..max]` range.
    #[error("invalid configuration: precision {precision} is outside of [{min}..{max}] range")]
    InvalidConfiguration { precision: u8, min: u8, max: u8 },

    /// Digest producer was unable to hash a key.
    #[error("digest failure: {0}")]
    DigestFailure(String),
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
