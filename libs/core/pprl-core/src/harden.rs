// [libs/core/pprl-core/src/harden.rs]
//! The hardener catalogue: six deterministic post-processing
//! transforms over a finished bitset, applied in configured order.

use crate::bits::Bitset;
use pprl_model::Hardener;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Applies `hardeners` in order, each consuming the previous stage's
/// output. An empty list returns `ba` unchanged.
pub fn apply_all(hardeners: &[Hardener], ba: &Bitset) -> Bitset {
    hardeners.iter().fold(ba.clone(), |acc, h| apply(h, &acc))
}

/// Applies a single hardener.
pub fn apply(hardener: &Hardener, ba: &Bitset) -> Bitset {
    match hardener {
        Hardener::Balance => balance(ba),
        Hardener::XorFold => xor_fold(ba),
        Hardener::Permute { seed } => permute(ba, *seed),
        Hardener::RandomizedResponse { probability, seed } => {
            randomized_response(ba, *probability, *seed)
        }
        Hardener::Rule90 => rule_90(ba),
        Hardener::Rehash {
            window_size,
            window_step,
            samples,
        } => rehash(ba, *window_size, *window_step, *samples),
    }
}

fn balance(ba: &Bitset) -> Bitset {
    ba.concat(&ba.complement())
}

fn xor_fold(ba: &Bitset) -> Bitset {
    let padded = if ba.len() % 2 == 1 { ba.push_zero() } else { ba.clone() };
    let half = padded.len() / 2;
    let left = padded.slice(0, half);
    let right = padded.slice(half, padded.len());
    left.xor(&right)
}

fn permute(ba: &Bitset, seed: i64) -> Bitset {
    let mut bits: Vec<bool> = (0..ba.len()).map(|i| ba.get(i)).collect();
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut i = bits.len();
    while i > 1 {
        i -= 1;
        let j = rng.gen_range(0..i);
        bits.swap(i, j);
    }
    Bitset::from_bits(bits)
}

fn rule_90(ba: &Bitset) -> Bitset {
    let len = ba.len();
    let mut out = Bitset::new(len);
    for i in 0..len {
        let left = ba.get((i + len - 1) % len);
        let right = ba.get((i + 1) % len);
        out.set(i, left != right);
    }
    out
}

fn randomized_response(ba: &Bitset, probability: f64, seed: i64) -> Bitset {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut out = Bitset::new(ba.len());
    for i in 0..ba.len() {
        let d: f64 = rng.gen();
        let bit = if d > probability {
            ba.get(i)
        } else {
            d < probability / 2.0
        };
        out.set(i, bit);
    }
    out
}

/// Packs the `w` bits of `ba` starting at bit offset `start` into a
/// little-endian signed 32-bit integer, zero-padding the byte buffer on the
/// right (high-order side) when `w < 32`.
fn window_as_i32(ba: &Bitset, start: usize, w: usize) -> i32 {
    let window = ba.slice(start, start + w);
    let mut bytes = window.to_bytes();
    bytes.resize(4, 0);
    i32::from_le_bytes(bytes[0..4].try_into().unwrap())
}

fn rehash(ba: &Bitset, window_size: u32, window_step: u32, samples: u32) -> Bitset {
    let len = ba.len();
    let w = window_size as usize;
    let step = window_step as usize;
    let mut out = ba.clone();

    if len < w {
        return out;
    }

    let mut start = 0usize;
    while start <= len - w {
        let seed = window_as_i32(ba, start, w) as u32 as u64;
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..samples {
            let idx = rng.gen_range(0..len);
            out.set(idx, true);
        }
        start += step;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_str(s: &str) -> Bitset {
        Bitset::from_bits(s.chars().map(|c| c == '1').collect())
    }

    fn to_str(ba: &Bitset) -> String {
        (0..ba.len()).map(|i| if ba.get(i) { '1' } else { '0' }).collect()
    }

    #[test]
    fn rule_90_matches_canonical_examples() {
        assert_eq!(to_str(&rule_90(&from_str("10010"))), "01100");
        assert_eq!(to_str(&rule_90(&from_str("0110101"))), "0110000");
    }

    #[test]
    fn balance_doubles_length_with_exact_half_popcount() {
        let ba = from_str("1010");
        let balanced = balance(&ba);
        assert_eq!(balanced.len(), 8);
        assert_eq!(balanced.popcount(), 4);
    }

    #[test]
    fn xor_fold_pads_odd_length_before_folding() {
        let ba = from_str("111"); // padded to "1110" -> "11" xor "10" -> "01"
        assert_eq!(to_str(&xor_fold(&ba)), "01");
    }

    #[test]
    fn permute_is_deterministic_for_a_fixed_seed() {
        let ba = from_str("1100110011001100");
        let a = permute(&ba, 42);
        let b = permute(&ba, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn permute_preserves_popcount() {
        let ba = from_str("1100110011001100");
        let permuted = permute(&ba, 7);
        assert_eq!(permuted.popcount(), ba.popcount());
    }

    #[test]
    fn randomized_response_is_deterministic_for_fixed_seed_and_probability() {
        let ba = from_str("1100110011001100");
        let a = randomized_response(&ba, 0.3, 99);
        let b = randomized_response(&ba, 0.3, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn randomized_response_varies_with_probability_for_same_seed() {
        let ba = from_str("1100110011001100");
        let low = randomized_response(&ba, 0.05, 99);
        let high = randomized_response(&ba, 0.95, 99);
        assert_ne!(low, high);
    }

    #[test]
    fn rehash_only_sets_bits_never_clears() {
        let ba = from_str("1000000100000000000000000000000001");
        let rehashed = rehash(&ba, 8, 8, 3);
        for i in 0..ba.len() {
            if ba.get(i) {
                assert!(rehashed.get(i));
            }
        }
        assert!(rehashed.popcount() >= ba.popcount());
    }
}
