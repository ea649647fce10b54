// [libs/core/pprl-core/src/strategy.rs]
//! Hash-strategy bit setters: map a digest's four destructured
//! integers to `hash_values` bit indices.
//!
//! All arithmetic is signed 32-bit with wraparound, matching the reference
//! behavior described for this component: the index multiplier is allowed
//! to overflow, and the eventual flip-on-negative modular reduction (see
//! `bits::compute_index`, exercised through `Bitset::set_bit`) is what
//! keeps the result in range — not a saturating or checked computation.

use std::num::Wrapping;

use pprl_model::HashStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The four signed 32-bit integers destructured from one token's digest.
pub type Destructured = (i32, i32, i32, i32);

fn double_hash_index(d: Destructured, i: i32) -> i32 {
    let (i0, i1, i2, i3) = d;
    let a = Wrapping(i0) ^ Wrapping(i1);
    let c = Wrapping(i2) ^ Wrapping(i3);
    (a + Wrapping(i) * c).0
}

fn enhanced_double_hash_index(d: Destructured, i: i32) -> i32 {
    let base = double_hash_index(d, i);
    let cubic = i.wrapping_mul(i).wrapping_mul(i).wrapping_sub(i) / 6;
    base.wrapping_add(cubic)
}

fn triple_hash_index(d: Destructured, i: i32) -> i32 {
    let (i0, i1, i2, i3) = d;
    let c = Wrapping(i2) ^ Wrapping(i3);
    // Left-to-right per spec: `(i2^i3) * i * (i-1) / 2`, multiplying
    // before dividing so the intermediate product's overflow behavior
    // matches the reference rather than a divide-first rearrangement.
    let term = c * Wrapping(i) * Wrapping(i.wrapping_sub(1)) / Wrapping(2);
    (Wrapping(i0) + Wrapping(i) * Wrapping(i1) + term).0
}

/// Applies `strategy` to the digest `d`, returning exactly `k` bit indices
/// (as signed 64-bit, ready for [`crate::bits::Bitset::set_bit`]'s
/// wrap-on-negative modular reduction). Indices may repeat; the caller sets
/// each idempotently.
pub fn bit_indices(strategy: HashStrategy, d: Destructured, k: u32, filter_size: usize) -> Vec<i64> {
    match strategy {
        HashStrategy::DoubleHash => (1..=k as i32).map(|i| double_hash_index(d, i) as i64).collect(),
        HashStrategy::EnhancedDoubleHash => (1..=k as i32)
            .map(|i| enhanced_double_hash_index(d, i) as i64)
            .collect(),
        HashStrategy::TripleHash => (1..=k as i32).map(|i| triple_hash_index(d, i) as i64).collect(),
        HashStrategy::RandomHash => {
            let (i0, i1, i2, i3) = d;
            let seed = (i0 ^ i1 ^ i2 ^ i3) as u32 as u64;
            let mut rng = StdRng::seed_from_u64(seed);
            (0..k)
                .map(|_| rng.gen_range(0..filter_size.max(1) as i64))
                .collect()
        }
    }
}
