// [libs/domain/pprl-model/src/match_request.rs]
use crate::common::BitVectorEntity;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// How domain and range bit vectors are paired up before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Every `(d, r)` in `domain x range`.
    Crosswise,
    /// `zip(domain, range)`; requires equal-length lists.
    Pairwise,
}

impl Default for MatchMethod {
    fn default() -> Self {
        MatchMethod::Crosswise
    }
}

/// Set-similarity measure used to score a pair of bit vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// `2c / (a+b)`.
    Dice,
    /// `c / sqrt(a*b)`.
    Cosine,
    /// `c / (a+b-c)`.
    Jaccard,
}

/// Full configuration of one match request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Similarity measure to apply.
    pub measure: SimilarityMeasure,
    /// Minimum similarity, in `[0,1]`, for a pair to be emitted.
    pub threshold: f64,
    /// Pairing method. Defaults to [`MatchMethod::Crosswise`].
    #[serde(default)]
    pub method: MatchMethod,
}

/// Shape shared by every match request before bit vectors are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMatchRequest {
    /// Match configuration.
    pub config: MatchConfig,
}

impl BaseMatchRequest {
    /// Attaches concrete domain/range lists, producing the request the
    /// match engine actually consumes.
    pub fn with_vectors(
        self,
        domain: Vec<BitVectorEntity>,
        range: Vec<BitVectorEntity>,
    ) -> VectorMatchRequest {
        VectorMatchRequest {
            config: self.config,
            domain,
            range,
        }
    }
}

/// A match request bound to concrete, non-empty domain and range lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatchRequest {
    /// Match configuration.
    pub config: MatchConfig,
    /// Domain-side bit vectors. Must not be empty.
    pub domain: Vec<BitVectorEntity>,
    /// Range-side bit vectors. Must not be empty.
    pub range: Vec<BitVectorEntity>,
}

impl VectorMatchRequest {
    /// Structural precondition: both lists must be non-empty. The
    /// pairwise-length-equality precondition is a *semantic* (400-class)
    /// check, performed by the match engine once both lists are in hand.
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        if self.domain.is_empty() {
            return Err(ModelError::EmptyList("domain"));
        }
        if self.range.is_empty() {
            return Err(ModelError::EmptyList("range"));
        }
        Ok(())
    }
}

/// One emitted pair whose similarity met the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Domain-side entity.
    pub domain: BitVectorEntity,
    /// Range-side entity.
    pub range: BitVectorEntity,
    /// Computed similarity, in `[0,1]`.
    pub similarity: f64,
}

/// Response mirroring a [`VectorMatchRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatchResponse {
    /// Echoes the request's configuration.
    pub config: MatchConfig,
    /// Pairs whose similarity met the configured threshold.
    pub matches: Vec<Match>,
}
