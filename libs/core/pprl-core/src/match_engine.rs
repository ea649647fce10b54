// [libs/core/pprl-core/src/match_engine.rs]
//! The match engine: crosswise/pairwise iteration over decoded bit
//! vectors, similarity scoring and threshold filtering.

use std::collections::HashMap;

use tracing::instrument;

use pprl_model::{BitVectorEntity, Match, MatchMethod, VectorMatchRequest, VectorMatchResponse};

use crate::bits::Bitset;
use crate::error::CoreError;
use crate::similarity::similarity;

/// Decodes every distinct base64 value in `entities` exactly once, caching
/// by the base64 string itself (two entities sharing the same value share
/// one decode). Aggregates every invalid value into a single error naming
/// every offending entity ID, rather than failing on the first.
fn decode_all<'a>(entities: &'a [BitVectorEntity]) -> Result<HashMap<&'a str, Bitset>, CoreError> {
    let mut decoded: HashMap<&str, Bitset> = HashMap::new();
    let mut offenders: Vec<&str> = Vec::new();

    for entity in entities {
        if decoded.contains_key(entity.value.as_str()) {
            continue;
        }
        match Bitset::from_base64(&entity.value) {
            Ok(ba) => {
                decoded.insert(entity.value.as_str(), ba);
            }
            Err(_) => offenders.push(entity.id.as_str()),
        }
    }

    if !offenders.is_empty() {
        return Err(CoreError::InvalidBase64(offenders.join(", ")));
    }

    Ok(decoded)
}

/// Runs the match pipeline over `request`.
///
/// Assumes [`VectorMatchRequest::validate_structure`] has already run
/// (non-empty domain/range); the pairwise length-equality precondition is
/// checked here, since it can only be known once both lists are in hand.
#[instrument(skip(request), fields(domain = request.domain.len(), range = request.range.len()))]
pub fn run(request: &VectorMatchRequest) -> Result<VectorMatchResponse, CoreError> {
    if request.config.method == MatchMethod::Pairwise && request.domain.len() != request.range.len() {
        return Err(CoreError::PairwiseLengthMismatch {
            domain_len: request.domain.len(),
            range_len: request.range.len(),
        });
    }

    let mut all = request.domain.clone();
    all.extend(request.range.iter().cloned());
    let decoded = decode_all(&all)?;

    let pairs: Vec<(&BitVectorEntity, &BitVectorEntity)> = match request.config.method {
        MatchMethod::Crosswise => request
            .domain
            .iter()
            .flat_map(|d| request.range.iter().map(move |r| (d, r)))
            .collect(),
        MatchMethod::Pairwise => request.domain.iter().zip(request.range.iter()).collect(),
    };

    let mut matches = Vec::new();
    for (d, r) in pairs {
        let d_ba = &decoded[d.value.as_str()];
        let r_ba = &decoded[r.value.as_str()];
        let score = similarity(request.config.measure, d_ba, r_ba);
        if score >= request.config.threshold {
            matches.push(Match {
                domain: d.clone(),
                range: r.clone(),
                similarity: score,
            });
        }
    }

    Ok(VectorMatchResponse {
        config: request.config,
        matches,
    })
}
