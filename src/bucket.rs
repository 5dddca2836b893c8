//! Split of a 32-bit hash into register index and rank.
//!
//! - bits `0..p` (least significant) select the register.
//! - bits `p..32` are scanned from the most significant end; the 1-based position of the
//!   first set bit is the rank, or `33 - p` when all of them are zero.
//!
//! E.g. for `h = 0x70ffec73` (`0b01110000111111111110110001110011`) and `p = 10`:
//! bucket is `0b0001110011 = 115` and the first `1` of `0111000011111111111011` is at
//! position 2, so rank is 2.

/// Return register index and rank of hash `h` for precision `p`.
///
/// With `p = 32` every bit selects the register and the rank is always 1.
///
/// # Panics
///
/// Panics if `p` is not in `1..=32`.
#[inline]
pub fn extract(h: u32, p: u32) -> (u32, u32) {
    assert!((1..=32).contains(&p), "precision must be in [1..32], got {p}");
    let bucket = h & (u32::MAX >> (32 - p));
    // Leading zeros of `h` are the leading zeros of its top `32 - p` bits, saturated below.
    let rank = (h.leading_zeros() + 1).min(max_rank(p));
    (bucket, rank)
}

/// Largest rank a register can hold for precision `p`, `1 <= p <= 32`.
#[inline]
pub const fn max_rank(p: u32) -> u32 {
    32 - p + 1
}
