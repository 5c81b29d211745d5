//! Unsigned fixed-point numbers with 16 fractional bits.
//!
//! Both modem accumulators (tone phase and bit clock) are kept in this format, so a
//! fractional phase or bit position carries over exactly from one sample to the next.

use num::ToPrimitive;

/// Number of fractional bits in a `Q16`.
pub const FRAC_BITS: u32 = 16;

/// Unsigned 16.16 fixed-point value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Q16(u32);

impl Q16 {
    /// Wrap the given raw bits, which have an implied binary point 16 bits up.
    pub fn from_bits(bits: u32) -> Q16 { Q16(bits) }

    /// Construct a `Q16` holding the given integer.
    pub fn from_int(n: u16) -> Q16 { Q16((n as u32) << FRAC_BITS) }

    /// The value 1.0.
    pub fn one() -> Q16 { Q16::from_int(1) }

    /// Compute `floor(num / den)` as a fixed-point value, returning `None` if `den` is
    /// zero or the result doesn't fit.
    pub fn ratio(num: u64, den: u64) -> Option<Q16> {
        num.checked_mul(1 << FRAC_BITS)
            .and_then(|n| n.checked_div(den))
            .and_then(|q| q.to_u32())
            .map(Q16)
    }

    /// Get the raw bits.
    pub fn bits(&self) -> u32 { self.0 }

    /// Get the integer part, rounding down.
    pub fn whole(&self) -> u32 { self.0 >> FRAC_BITS }

    /// Get the fractional part as a count of 2^-16 units.
    pub fn frac(&self) -> u32 { self.0 & ((1 << FRAC_BITS) - 1) }

    pub fn checked_add(self, other: Q16) -> Option<Q16> {
        self.0.checked_add(other.0).map(Q16)
    }

    pub fn checked_sub(self, other: Q16) -> Option<Q16> {
        self.0.checked_sub(other.0).map(Q16)
    }

    /// Add `other` and reduce the sum modulo `modulus`, which must be nonzero.
    ///
    /// The sum is formed in 64 bits, so this never overflows.
    pub fn add_mod(self, other: Q16, modulus: Q16) -> Q16 {
        debug_assert!(modulus.0 != 0);
        Q16(((self.0 as u64 + other.0 as u64) % modulus.0 as u64) as u32)
    }
}
