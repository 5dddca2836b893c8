//! ## MurmurHash3 (x86, 32-bit)
//! Deterministic seedable hash of a byte sequence, processed in 4-byte little-endian blocks.
//!
//! Output is bit-compatible with the reference `MurmurHash3_x86_32`, so sketches built by
//! other conforming implementations with the same seed can be merged with ours.
//! It is not collision resistant against adversarial input.
//!
//! Reference: https://github.com/aappleby/smhasher/blob/master/src/MurmurHash3.cpp

use crate::error::{Error, Result};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

/// Computes 32-bit MurmurHash3 of `key` with given `seed`.
///
/// Returns `Error::InvalidInput` if `key` is empty.
#[inline]
pub fn murmur3_32(key: &[u8], seed: u32) -> Result<u32> {
    if key.is_empty() {
        return Err(Error::InvalidInput("key must not be empty".to_string()));
    }

    let mut h = seed;
    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= scramble(k);
        h = h.rotate_left(R2).wrapping_mul(M).wrapping_add(N);
    }

    // Tail block skips the rotate and mix-add step
    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .rev()
            .fold(0u32, |k, &b| (k << 8) | u32::from(b));
        h ^= scramble(k);
    }

    // Only the low 32 bits of the length take part, as in the reference implementation
    h ^= key.len() as u32;
    Ok(fmix32(h))
}

/// Hashes any key representable as bytes; text is hashed as its UTF-8 encoding.
#[inline]
pub fn hash_key<K: AsRef<[u8]> + ?Sized>(key: &K, seed: u32) -> Result<u32> {
    murmur3_32(key.as_ref(), seed)
}

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

/// Finalization mix forcing all bits of the accumulator to avalanche
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
