//! Digest producers map keys to uniformly distributed 64-bit digests.
//!
//! `Estimator` never hashes keys itself: it is parameterized by a
//! `DigestProducer` implementation for its key type. `HashDigest` covers
//! every `Hash` key (integers, strings, byte slices, ...) using the
//! `Hasher` given as type parameter, `WyHash` by default.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use wyhash::WyHash;

use crate::error::Result;

/// Capability of turning a key of type `K` into a 64-bit digest.
///
/// Implementations must be deterministic: equal keys always produce equal digests.
pub trait DigestProducer<K: ?Sized> {
    fn digest(&self, key: &K) -> Result<u64>;
}

/// Digest producer for any `Hash` key, backed by hasher `H`.
pub struct HashDigest<H: Hasher + Default = WyHash> {
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> HashDigest<H> {
    #[inline]
    pub fn new() -> Self {
        Self {
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> Default for HashDigest<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher + Default> Clone for HashDigest<H> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<H: Hasher + Default> Debug for HashDigest<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(std::any::type_name::<H>())
    }
}

impl<K: Hash + ?Sized, H: Hasher + Default> DigestProducer<K> for HashDigest<H> {
    #[inline]
    fn digest(&self, key: &K) -> Result<u64> {
        Ok(self.build_hasher.hash_one(key))
    }
}
