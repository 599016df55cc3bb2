//! Estimator configuration.
//!
//! The only knob is the precision `b`: number of high-order digest bits
//! used to select a register. It is validated once and then carries the
//! values derived from it, number of registers `m = 2^b` and the bias
//! correction constant `alpha_m`.

use tracing::warn;

use crate::error::{EstimatorError, Result};

/// Smallest supported precision (16 registers)
pub const MIN_PRECISION: u8 = 4;
/// Largest supported precision (65536 registers)
pub const MAX_PRECISION: u8 = 16;
/// Precision used by `Estimator::default()`
pub const DEFAULT_PRECISION: u8 = 12;

/// Validated estimator precision along with the constants derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    bits: u8,
    alpha: f64,
}

impl Precision {
    /// Create new `Precision` if `bits` is in `[MIN_PRECISION..MAX_PRECISION]` range.
    pub fn new(bits: u8) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&bits) {
            warn!(precision = bits, "rejecting estimator precision");
            return Err(EstimatorError::InvalidConfiguration {
                precision: bits,
                min: MIN_PRECISION,
                max: MAX_PRECISION,
            });
        }
        Ok(Self {
            bits,
            alpha: alpha(1 << bits),
        })
    }

    /// Number of digest bits used for register indices
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of registers
    #[inline]
    pub fn bucket_count(&self) -> usize {
        1 << self.bits
    }

    /// Bias correction constant for `bucket_count()` registers
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of digest bits left for the rho computation
    #[inline]
    pub(crate) fn rest_bits(&self) -> u32 {
        64 - u32::from(self.bits)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            bits: DEFAULT_PRECISION,
            alpha: alpha(1 << DEFAULT_PRECISION),
        }
    }
}

impl TryFrom<u8> for Precision {
    type Error = EstimatorError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
