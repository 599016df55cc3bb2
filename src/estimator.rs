//! Estimator allows to estimate number of distinct keys in the stream
//! or dataset and is defined by its runtime precision `b` in [4..16] range,
//! the number of digest bits used for register indices, and by a
//! `DigestProducer` for its key type.
//!
//! # Algorithm
//!
//! Every key is mapped to a 64-bit digest:
//! - top `b` bits select one of `M = 2^b` registers
//! - remaining `64 - b` bits give the rank (rho): 1-indexed position of
//!   the leftmost set bit, or `64 - b + 1` when all of them are zero
//!
//! Each register keeps the maximum rank seen. Cardinality is estimated as
//! `alpha_M * M^2 / sum(2^-register)` over all registers.
//!
//! Original HyperLogLog paper:
//! http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf
//!
//! Expected error is `1.04 / sqrt(M)`:
//! - b = 10: 3.25%
//! - b = 12: 1.62%
//! - b = 14: 0.81%
//! - b = 16: 0.41%
//!
//! Neither linear counting for small cardinalities nor large range correction
//! is applied, so estimates for cardinalities much below `2.5 * M` are biased upwards.

use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use tracing::{debug, trace};

use crate::config::Precision;
use crate::digest::{DigestProducer, HashDigest};
use crate::error::Result;
use crate::registers::RegisterBank;

/// HyperLogLog estimator of distinct keys of type `K`
pub struct Estimator<K: ?Sized, D: DigestProducer<K> = HashDigest> {
    precision: Precision,
    registers: RegisterBank,
    /// Last computed estimate
    cached_cardinality: Cell<u64>,
    digest: D,
    _phantom_data: PhantomData<fn(&K)>,
}

/// Estimator of distinct integer keys
pub type IntEstimator = Estimator<i64>;
/// Estimator of distinct string keys
pub type StrEstimator = Estimator<str>;

impl<K: ?Sized, D: DigestProducer<K> + Default> Estimator<K, D> {
    /// Creates new instance of `Estimator` with given precision
    pub fn new(precision: u8) -> Result<Self> {
        Self::with_digest(precision, D::default())
    }
}

impl<K: ?Sized, D: DigestProducer<K>> Estimator<K, D> {
    /// Creates new instance of `Estimator` with given precision and digest producer
    pub fn with_digest(precision: u8, digest: D) -> Result<Self> {
        let precision = Precision::new(precision)?;
        Ok(Self::with_config(precision, digest))
    }

    /// Creates new instance of `Estimator` from already validated `Precision`
    pub fn with_config(precision: Precision, digest: D) -> Self {
        debug!(
            precision = precision.bits(),
            buckets = precision.bucket_count(),
            alpha = precision.alpha(),
            "creating estimator"
        );
        Self {
            precision,
            registers: RegisterBank::new(precision.bucket_count()),
            cached_cardinality: Cell::new(0),
            digest,
            _phantom_data: PhantomData,
        }
    }

    /// Insert a key into `Estimator`.
    ///
    /// Registers are left untouched when the digest producer fails.
    #[inline]
    pub fn insert(&mut self, key: &K) -> Result<()> {
        let hash = self.digest.digest(key).inspect_err(|err| {
            trace!(%err, "unable to digest key");
        })?;
        self.insert_hash(hash);
        Ok(())
    }

    /// Insert digest into `Estimator`
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let idx = self.bucket_index(hash);
        let rho = self.rho(hash);
        self.registers.raise(idx, rho);
    }

    /// Return register index selected by top `b` bits of `hash`
    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash >> self.precision.rest_bits()) as usize
    }

    /// Return 1-indexed position of the leftmost set bit within the
    /// remaining `64 - b` bits of `hash`, or `64 - b + 1` if there is none.
    #[inline]
    fn rho(&self, hash: u64) -> u8 {
        let rest = hash << self.precision.bits();
        if rest == 0 {
            (self.precision.rest_bits() + 1) as u8
        } else {
            (rest.leading_zeros() + 1) as u8
        }
    }

    /// Compute cardinality estimate from current registers and remember it
    pub fn estimate_cardinality(&self) -> u64 {
        let estimate = if self.registers.is_empty() {
            0
        } else {
            let m = self.precision.bucket_count() as f64;
            let estimate = self.precision.alpha() * m * m / self.registers.harmonic_sum();
            estimate.floor() as u64
        };
        self.cached_cardinality.set(estimate);
        estimate
    }

    /// Return estimate computed by the most recent `estimate_cardinality` call
    #[inline]
    pub fn cached_cardinality(&self) -> u64 {
        self.cached_cardinality.get()
    }

    /// Return validated precision
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Return number of registers
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.registers.len()
    }

    /// Return bias correction constant
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.precision.alpha()
    }

    /// Return `idx` register, if it exists
    #[inline]
    pub fn register(&self, idx: usize) -> Option<u8> {
        (idx < self.registers.len()).then(|| self.registers.get(idx))
    }

    /// Iterate over registers in index order
    pub fn registers(&self) -> impl Iterator<Item = u8> + '_ {
        self.registers.iter()
    }

    /// Return memory size of `Estimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() - size_of::<RegisterBank>() + self.registers.size_of()
    }
}

impl<K: ?Sized, D: DigestProducer<K> + Default> Default for Estimator<K, D> {
    /// Creates new instance of `Estimator` with `DEFAULT_PRECISION`
    fn default() -> Self {
        Self::with_config(Precision::default(), D::default())
    }
}

impl<K: ?Sized, D: DigestProducer<K> + Clone> Clone for Estimator<K, D> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            registers: self.registers.clone(),
            cached_cardinality: self.cached_cardinality.clone(),
            digest: self.digest.clone(),
            _phantom_data: PhantomData,
        }
    }
}

impl<K: ?Sized, D: DigestProducer<K>> PartialEq for Estimator<K, D> {
    /// Compare estimators by precision and registers
    fn eq(&self, rhs: &Self) -> bool {
        self.precision == rhs.precision && self.registers == rhs.registers
    }
}

impl<K: ?Sized, D: DigestProducer<K>> Debug for Estimator<K, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {}, size: {} }}",
            self.precision.bits(),
            self.estimate_cardinality(),
            self.size_of()
        )
    }
}
