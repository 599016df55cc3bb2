//! ## Register bank
//! Stores `M` HyperLogLog registers of `W = 6` bits each, packed into `u32` words.
//!
//! Largest rank stored is `64 - MIN_PRECISION + 1 = 61`, which always fits into 6 bits.
//!
//! Slice encoding:
//! - words[0..M * W / 32]  - store register ranks using `W` bits per each register.
//! - words[M * W / 32]     - extra word for branchless register updates (see `set` for more details).

use std::mem::size_of_val;

/// Number of bits used by each register
pub(crate) const W: usize = 6;
/// Mask of a single register
const REGISTER_MASK: u32 = (1 << W) - 1;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct RegisterBank {
    /// Number of registers
    len: usize,
    words: Vec<u32>,
}

impl RegisterBank {
    /// Create new bank of `len` registers set to 0
    pub(crate) fn new(len: usize) -> Self {
        Self {
            len,
            words: vec![0u32; len * W / 32 + 1],
        }
    }

    /// Number of registers in the bank
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Get `idx` register
    #[inline]
    pub(crate) fn get(&self, idx: usize) -> u8 {
        let bit_idx = idx * W;
        let u32_idx = bit_idx / 32;
        let bit_pos = bit_idx % 32;
        let bits = &self.words[u32_idx..u32_idx + 2];
        let bits_1 = W.min(32 - bit_pos);
        let bits_2 = W - bits_1;
        let mask_1 = (1 << bits_1) - 1;
        let mask_2 = (1 << bits_2) - 1;

        (((bits[0] >> bit_pos) & mask_1) | ((bits[1] & mask_2) << bits_1)) as u8
    }

    /// Raise `idx` register to `rank` if it is currently lower.
    /// Returns true if the register was changed.
    #[inline]
    pub(crate) fn raise(&mut self, idx: usize, rank: u8) -> bool {
        if rank > self.get(idx) {
            self.set(idx, rank);
            true
        } else {
            false
        }
    }

    /// Set `idx` register to `rank`
    #[inline]
    fn set(&mut self, idx: usize, rank: u8) {
        let rank = u32::from(rank) & REGISTER_MASK;
        let bit_idx = idx * W;
        let u32_idx = bit_idx / 32;
        let bit_pos = bit_idx % 32;
        let bits = &mut self.words[u32_idx..u32_idx + 2];
        let bits_1 = W.min(32 - bit_pos);
        let bits_2 = W - bits_1;
        let mask_1 = (1 << bits_1) - 1;
        let mask_2 = (1 << bits_2) - 1;

        // Unconditionally update two `u32` elements based on `rank` bits and masks
        bits[0] &= !(mask_1 << bit_pos);
        bits[0] |= (rank & mask_1) << bit_pos;
        bits[1] &= !mask_2;
        bits[1] |= (rank >> bits_1) & mask_2;
    }

    /// Iterate over all registers in index order
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(|idx| self.get(idx))
    }

    /// Return whether every register is still 0
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Return `sum(2^-register)` over all registers, zero registers included
    #[inline]
    pub(crate) fn harmonic_sum(&self) -> f64 {
        self.iter().map(|rank| 1.0 / ((1u64 << rank) as f64)).sum()
    }

    /// Return memory size of the bank
    #[inline]
    pub(crate) fn size_of(&self) -> usize {
        size_of_val(self) + size_of_val(self.words.as_slice())
    }
}
