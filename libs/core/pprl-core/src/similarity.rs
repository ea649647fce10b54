// [libs/core/pprl-core/src/similarity.rs]
//! Set-similarity measures over a pair of bitsets.

use crate::bits::Bitset;
use pprl_model::SimilarityMeasure;

/// `dice = 2c / (a+b)`, `cosine = c / sqrt(a*b)`, `jaccard = c / (a+b-c)`,
/// where `a = popcount(x)`, `b = popcount(y)`, `c = popcount(x AND y)`.
///
/// When `a = b = 0` (and hence `c = 0`), every measure is resolved to `0.0`
/// rather than propagating a division by zero — two empty vectors are
/// defined as maximally dissimilar, not undefined.
pub fn similarity(measure: SimilarityMeasure, x: &Bitset, y: &Bitset) -> f64 {
    let a = x.popcount() as f64;
    let b = y.popcount() as f64;
    let c = x.and(y).popcount() as f64;

    match measure {
        SimilarityMeasure::Dice => {
            if a + b == 0.0 {
                0.0
            } else {
                2.0 * c / (a + b)
            }
        }
        SimilarityMeasure::Cosine => {
            if a * b == 0.0 {
                0.0
            } else {
                c / (a * b).sqrt()
            }
        }
        SimilarityMeasure::Jaccard => {
            if a + b - c == 0.0 {
                0.0
            } else {
                c / (a + b - c)
            }
        }
    }
}
