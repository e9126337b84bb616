//! Observation hashing for replay comparison.
//!
//! Uses FNV-1a over the bit patterns of the observation values. Not
//! cryptographic; only used for fast equality checks.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash an encoded observation.
///
/// Every value is fed as `f32::to_bits()` in little-endian order, so
/// `0.0` and `-0.0` hash differently. Returns the offset basis for an
/// empty slice.
pub fn obs_hash(obs: &[f32]) -> u64 {
    obs.iter()
        .fold(FNV_OFFSET, |hash, &v| fnv1a_u32(hash, v.to_bits()))
}
