// [libs/core/pprl-core/src/bits.rs]
//! Bit primitives: a fixed-length bitset with wrap-on-negative
//! indexing, its base64 codec, and the optimal-size formula used to size
//! RBF/CLKRBF filters analytically.

use crate::error::CoreError;
use base64::Engine;

/// A fixed-length sequence of bits, indexed `0..len()`.
///
/// Stored one `bool` per bit rather than packed, trading memory density for
/// straightforward, obviously-correct indexing — the packed representation
/// only exists at the base64 boundary (`to_base64`/`from_base64`), where the
/// exact byte layout is load-bearing for interop with other systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitset {
    bits: Vec<bool>,
}

/// Maps an arbitrary signed integer onto an index within a bitset of the
/// given length: negative integers have all their bits flipped first, then
/// the result is taken modulo the length.
fn compute_index(len: usize, i: i64) -> usize {
    let i = if i < 0 { !i } else { i };
    (i as u128 % len as u128) as usize
}

impl Bitset {
    /// A new bitset of `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Builds a bitset from an explicit bit sequence (`true` = set), mostly
    /// useful in tests where literal bit patterns are clearer than indices.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of bits in this bitset.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if this bitset has zero bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Sets the bit at `compute_index(self.len(), i)`.
    pub fn set_bit(&mut self, i: i64) {
        let idx = compute_index(self.len(), i);
        self.bits[idx] = true;
    }

    /// Tests the bit at `compute_index(self.len(), i)`.
    pub fn test_bit(&self, i: i64) -> bool {
        let idx = compute_index(self.len(), i);
        self.bits[idx]
    }

    /// Reads the raw bit at a literal index (no wrap/negative handling),
    /// used internally by hardeners that already reason in plain indices.
    pub fn get(&self, idx: usize) -> bool {
        self.bits[idx]
    }

    /// Sets the raw bit at a literal index.
    pub fn set(&mut self, idx: usize, value: bool) {
        self.bits[idx] = value;
    }

    /// Number of set bits.
    pub fn popcount(&self) -> u64 {
        self.bits.iter().filter(|b| **b).count() as u64
    }

    /// Bitwise AND of two same-length bitsets.
    pub fn and(&self, other: &Bitset) -> Bitset {
        debug_assert_eq!(self.len(), other.len());
        Bitset {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| *a && *b)
                .collect(),
        }
    }

    /// Bitwise complement.
    pub fn complement(&self) -> Bitset {
        Bitset {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Concatenates `other` after `self`.
    pub fn concat(&self, other: &Bitset) -> Bitset {
        let mut bits = self.bits.clone();
        bits.extend_from_slice(&other.bits);
        Bitset { bits }
    }

    /// Bitwise XOR of two same-length bitsets.
    pub fn xor(&self, other: &Bitset) -> Bitset {
        debug_assert_eq!(self.len(), other.len());
        Bitset {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| a != b)
                .collect(),
        }
    }

    /// A new bitset with one zero bit appended.
    pub fn push_zero(&self) -> Bitset {
        let mut bits = self.bits.clone();
        bits.push(false);
        Bitset { bits }
    }

    /// Sub-range `[start, end)` as an owned bitset.
    pub fn slice(&self, start: usize, end: usize) -> Bitset {
        Bitset {
            bits: self.bits[start..end].to_vec(),
        }
    }

    /// Little-endian packed bytes: bit `i` is bit `i % 8` (counting from the
    /// least-significant bit) of byte `i / 8`. Bits beyond `len()` up to the
    /// next byte boundary are zero.
    pub fn to_bytes(&self) -> Vec<u8> {
        let byte_len = self.bits.len().div_ceil(8);
        let mut bytes = vec![0u8; byte_len];
        for (i, bit) in self.bits.iter().enumerate() {
            if *bit {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        bytes
    }

    /// Inverse of [`Bitset::to_bytes`]; the resulting bitset's length is
    /// always a multiple of 8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for i in 0..8 {
                bits.push(byte & (1 << i) != 0);
            }
        }
        Bitset { bits }
    }

    /// Standard-alphabet base64 encoding of [`Bitset::to_bytes`].
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    /// Inverse of [`Bitset::to_base64`]. Fails if `b64` is not valid base64.
    pub fn from_base64(b64: &str) -> Result<Self, CoreError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| CoreError::InvalidArgument(e.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }
}

/// Smallest bitset length such that, on average, `p` of its bits are set
/// after `n` independent random insertions.
///
/// Rejects `p` outside `[0,1)` and `n <= 0`.
pub fn optimal_size(p: f64, n: f64) -> Result<usize, CoreError> {
    if n <= 0.0 {
        return Err(CoreError::InvalidArgument(format!(
            "amount of expected insertions must be positive, is {n}"
        )));
    }
    if !(0.0..1.0).contains(&p) {
        return Err(CoreError::InvalidArgument(format!(
            "percentage of set bits must be in range of [0,1), is {p}"
        )));
    }

    let size = (1.0 / (1.0 - p.powf(1.0 / n))).ceil();
    Ok(size as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_test_bit_same_index() {
        let mut ba = Bitset::new(16);
        ba.set_bit(5);
        assert!(ba.test_bit(5));
        assert!(!ba.test_bit(6));
    }

    #[test]
    fn set_bit_wraps_positive_indices_modulo_length() {
        let mut a = Bitset::new(8);
        let mut b = Bitset::new(8);
        a.set_bit(3);
        b.set_bit(11); // 11 mod 8 == 3
        assert_eq!(a, b);
    }

    #[test]
    fn set_bit_flips_negative_indices_before_modulo() {
        let mut ba = Bitset::new(8);
        ba.set_bit(-1); // !(-1) == 0 -> idx 0
        assert!(ba.test_bit(0));

        let mut ba2 = Bitset::new(8);
        ba2.set_bit(-6); // !(-6) == 5 -> idx 5
        assert!(ba2.test_bit(5));
    }

    #[test]
    fn base64_round_trips_after_byte_padding() {
        let mut ba = Bitset::new(10);
        ba.set_bit(0);
        ba.set_bit(9);
        let b64 = ba.to_base64();
        let back = Bitset::from_base64(&b64).unwrap();
        // round trip is only guaranteed up to byte granularity (16 bits here)
        assert_eq!(back.len(), 16);
        assert!(back.test_bit(0));
        assert!(back.test_bit(9));
    }

    #[test]
    fn from_base64_rejects_invalid_input() {
        assert!(Bitset::from_base64("not valid base64!!").is_err());
    }

    #[test]
    fn optimal_size_is_positive_for_any_positive_n() {
        assert!(optimal_size(0.5, 1.0).unwrap() > 0);
        assert!(optimal_size(0.5, 1000.0).unwrap() > 0);
    }

    #[test]
    fn optimal_size_rejects_bad_inputs() {
        assert!(optimal_size(0.5, 0.0).is_err());
        assert!(optimal_size(0.5, -1.0).is_err());
        assert!(optimal_size(1.0, 10.0).is_err());
        assert!(optimal_size(-0.1, 10.0).is_err());
    }
}
