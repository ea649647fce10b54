// [libs/domain/pprl-model/src/mask.rs]
use crate::common::{AttributeValueEntity, BitVectorEntity};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Hash algorithms a `HashFunction` chain may be composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// MD5, 16-byte digest.
    Md5,
    /// SHA-1, 20-byte digest.
    Sha1,
    /// SHA-256, 32-byte digest.
    Sha256,
    /// SHA-512, 64-byte digest.
    Sha512,
}

/// An ordered, non-empty chain of hash algorithms, plus an optional HMAC
/// key. If `key` is present every stage of the chain is an HMAC under that
/// key; otherwise every stage is a plain digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashFunction {
    /// Chain of algorithms applied in order; must not be empty.
    pub algorithms: Vec<HashAlgorithm>,
    /// Optional HMAC key shared by every stage of the chain.
    #[serde(default)]
    pub key: Option<String>,
}

impl HashFunction {
    /// Structural precondition: the algorithm chain must name at least one
    /// algorithm.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.algorithms.is_empty() {
            return Err(ModelError::EmptyList("hash function algorithms"));
        }
        Ok(())
    }
}

/// Scheme used to turn a digest's four destructured integers into the `k`
/// bit indices set for one token. Carries no parameters of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStrategy {
    /// `(i0^i1) + i*(i2^i3)` for `i` in `1..=k`.
    DoubleHash,
    /// `double_hash` plus a cubic correction term.
    EnhancedDoubleHash,
    /// `i0 + i*i1 + (i2^i3)*i*(i-1)/2` for `i` in `1..=k`.
    TripleHash,
    /// `k` draws from a PRNG seeded with `i0^i1^i2^i3`.
    RandomHash,
}

/// Hash chain plus bit-setting strategy used by a mask request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Digest chain configuration.
    pub function: HashFunction,
    /// Bit-setting strategy applied to each token's digest.
    pub strategy: HashStrategy,
}

/// Tagged filter construction scheme. `type` is the JSON discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Cryptographic Long-term Key: one shared bitset for all attributes.
    Clk(CLKFilter),
    /// Record-level Bloom Filter: per-attribute sub-bitsets sampled into a
    /// parent bitset in proportion to attribute weight.
    Rbf(RBFFilter),
    /// CLK whose per-attribute insertion count is scaled by weight, in a
    /// single shared, analytically-sized bitset.
    Clkrbf(CLKRBFFilter),
}

impl Filter {
    /// Name used in capability-error messages (`unimplemented filter type`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Filter::Clk(_) => "clk",
            Filter::Rbf(_) => "rbf",
            Filter::Clkrbf(_) => "clkrbf",
        }
    }

    /// Structural preconditions on filter parameters: every bit-length and
    /// bit-count field must be positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Filter::Clk(f) => {
                if f.filter_size == 0 {
                    return Err(ModelError::NotPositive("filter_size"));
                }
                if f.hash_values == 0 {
                    return Err(ModelError::NotPositive("hash_values"));
                }
            }
            Filter::Rbf(f) => {
                if f.hash_values == 0 {
                    return Err(ModelError::NotPositive("hash_values"));
                }
            }
            Filter::Clkrbf(f) => {
                if f.hash_values == 0 {
                    return Err(ModelError::NotPositive("hash_values"));
                }
            }
        }
        Ok(())
    }
}

/// Parameters for [`Filter::Clk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CLKFilter {
    /// Fixed bit length of the shared filter. Must be positive.
    pub filter_size: u32,
    /// Number of bits set per token. Must be positive.
    pub hash_values: u32,
}

/// Parameters for [`Filter::Rbf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RBFFilter {
    /// Number of bits set per token in each attribute's sub-bitset. Must be
    /// positive.
    pub hash_values: u32,
    /// Seed for the PRNG that samples bits from each sub-bitset into the
    /// parent bitset.
    pub seed: i64,
}

/// Parameters for [`Filter::Clkrbf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CLKRBFFilter {
    /// Base number of bits set per token, scaled per attribute by weight.
    /// Must be positive.
    pub hash_values: u32,
}

/// `type` enum values mirrored for messages that need the bare discriminator
/// (e.g. "unimplemented filter type `clk`").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// See [`Filter::Clk`].
    Clk,
    /// See [`Filter::Rbf`].
    Rbf,
    /// See [`Filter::Clkrbf`].
    Clkrbf,
}

/// Tagged post-processing transform applied, in configured order, to a
/// finished filter. `name` is the JSON discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Hardener {
    /// Append the bitwise complement of the bitset to itself.
    Balance,
    /// XOR-fold the bitset's two halves together.
    XorFold,
    /// Fisher-Yates shuffle of the bitset's bits.
    Permute {
        /// PRNG seed.
        seed: i64,
    },
    /// For each bit, with probability `probability` replace it with a fresh
    /// Bernoulli(1/2) draw.
    RandomizedResponse {
        /// Replacement probability, in `[0,1]`.
        probability: f64,
        /// PRNG seed.
        seed: i64,
    },
    /// Each output bit is the XOR of its cyclic left/right neighbors.
    Rule90,
    /// Slide a window over the bitset; seed a PRNG from each window's bits
    /// and use it to sample additional bits to set.
    Rehash {
        /// Window size in bits, in `(0,32]`.
        window_size: u32,
        /// Step between window starts, in bits. Must be positive.
        window_step: u32,
        /// Bits sampled per window. Must be positive.
        samples: u32,
    },
}

impl Hardener {
    /// Name used in capability-error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Hardener::Balance => "balance",
            Hardener::XorFold => "xor_fold",
            Hardener::Permute { .. } => "permute",
            Hardener::RandomizedResponse { .. } => "randomized_response",
            Hardener::Rule90 => "rule_90",
            Hardener::Rehash { .. } => "rehash",
        }
    }

    /// Structural preconditions on hardener parameters: `probability` in
    /// `[0,1]`, `window_size` in `(0,32]`, `window_step`/`samples` positive.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Hardener::RandomizedResponse { probability, .. } => {
                if !(0.0..=1.0).contains(probability) {
                    return Err(ModelError::OutOfRange { field: "probability", min: 0.0, max: 1.0 });
                }
            }
            Hardener::Rehash { window_size, window_step, samples } => {
                if *window_size == 0 || *window_size > 32 {
                    return Err(ModelError::PositiveAtMost { field: "window_size", max: 32 });
                }
                if *window_step == 0 {
                    return Err(ModelError::NotPositive("window_step"));
                }
                if *samples == 0 {
                    return Err(ModelError::NotPositive("samples"));
                }
            }
            Hardener::Balance | Hardener::XorFold | Hardener::Permute { .. } | Hardener::Rule90 => {}
        }
        Ok(())
    }
}

/// Full configuration of one mask request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Token (q-gram) length. Must be greater than 1.
    pub token_size: u32,
    /// Digest chain and bit-setting strategy.
    pub hash: HashConfig,
    /// Whether each token is prefixed with its attribute name before
    /// hashing. Defaults to `true`.
    #[serde(default = "default_true")]
    pub prepend_attribute_name: bool,
    /// Filter construction scheme.
    pub filter: Filter,
    /// Padding string prepended/appended to each attribute value before
    /// tokenization. May be empty. Defaults to empty.
    #[serde(default)]
    pub padding: String,
    /// Ordered, possibly-empty list of post-processing hardeners.
    #[serde(default)]
    pub hardeners: Vec<Hardener>,
}

fn default_true() -> bool {
    true
}

impl MaskConfig {
    /// Structural preconditions independent of any entity: non-empty hash
    /// chain, `token_size > 1`, well-formed filter parameters, well-formed
    /// hardener parameters.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.hash.function.validate()?;
        if self.token_size <= 1 {
            return Err(ModelError::EmptyList("token_size must be greater than 1"));
        }
        self.filter.validate()?;
        for hardener in &self.hardeners {
            hardener.validate()?;
        }
        Ok(())
    }
}

/// Exactly one of `value` (a literal salt) or `attribute` (the name of
/// another attribute on the same entity whose value is used as salt) must
/// be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSalt {
    /// Literal salt string.
    #[serde(default)]
    pub value: Option<String>,
    /// Name of another attribute on the same entity to use as salt.
    #[serde(default)]
    pub attribute: Option<String>,
}

impl AttributeSalt {
    /// Enforces the mutual-exclusivity invariant.
    pub fn validate(&self) -> Result<(), ModelError> {
        match (&self.value, &self.attribute) {
            (Some(_), Some(_)) => Err(ModelError::SaltBothSet),
            (None, None) => Err(ModelError::SaltNeitherSet),
            _ => Ok(()),
        }
    }
}

/// Attribute configuration accepted by CLK filters: no weighting.
///
/// `deny_unknown_fields` is load-bearing: it is what lets the untagged
/// [`AnyAttributeConfig`] fall through to [`WeightedAttributeConfig`] when a
/// `weight`/`average_token_count` pair is present, instead of silently
/// accepting and discarding them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticAttributeConfig {
    /// Name of the attribute this configuration applies to.
    pub attribute_name: String,
    /// Optional salt configuration.
    #[serde(default)]
    pub salt: Option<AttributeSalt>,
}

/// Attribute configuration required by RBF and CLKRBF filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedAttributeConfig {
    /// Name of the attribute this configuration applies to.
    pub attribute_name: String,
    /// Optional salt configuration.
    #[serde(default)]
    pub salt: Option<AttributeSalt>,
    /// Relative weight of this attribute. Must be positive.
    pub weight: f64,
    /// Expected average token count for this attribute, used to size
    /// filters analytically. Must be positive.
    pub average_token_count: f64,
}

impl WeightedAttributeConfig {
    /// Structural preconditions: `weight` and `average_token_count` must
    /// both be strictly positive (spec §3) — RBF divides by `weight` when
    /// sizing the parent filter and CLKRBF divides by the minimum weight
    /// across all attributes.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.weight <= 0.0 {
            return Err(ModelError::NotPositive("weight"));
        }
        if self.average_token_count <= 0.0 {
            return Err(ModelError::NotPositive("average_token_count"));
        }
        Ok(())
    }
}

/// Either a homogeneous list of static attribute configs, or a homogeneous
/// list of weighted ones. Untagged: the shape of the first element decides
/// which variant deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyAttributeConfig {
    /// Accepted by CLK filters.
    Static(Vec<StaticAttributeConfig>),
    /// Required (non-empty) by RBF and CLKRBF filters.
    Weighted(Vec<WeightedAttributeConfig>),
}

impl Default for AnyAttributeConfig {
    fn default() -> Self {
        AnyAttributeConfig::Static(Vec::new())
    }
}

impl AnyAttributeConfig {
    /// `true` if this configuration carries no attributes at all.
    pub fn is_empty(&self) -> bool {
        match self {
            AnyAttributeConfig::Static(v) => v.is_empty(),
            AnyAttributeConfig::Weighted(v) => v.is_empty(),
        }
    }

    /// Attribute names configured, in configuration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        match self {
            AnyAttributeConfig::Static(v) => v.iter().map(|a| a.attribute_name.as_str()).collect(),
            AnyAttributeConfig::Weighted(v) => {
                v.iter().map(|a| a.attribute_name.as_str()).collect()
            }
        }
    }

    /// Structural preconditions on every configured attribute: well-formed
    /// salts, and (for the weighted shape) strictly positive weight and
    /// average token count.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            AnyAttributeConfig::Static(v) => {
                for attr in v {
                    if let Some(salt) = &attr.salt {
                        salt.validate()?;
                    }
                }
            }
            AnyAttributeConfig::Weighted(v) => {
                for attr in v {
                    attr.validate()?;
                    if let Some(salt) = &attr.salt {
                        salt.validate()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Salt configured for the named attribute, if any configuration for it
    /// exists.
    pub fn salt_for(&self, attribute_name: &str) -> Option<&AttributeSalt> {
        match self {
            AnyAttributeConfig::Static(v) => v
                .iter()
                .find(|a| a.attribute_name == attribute_name)
                .and_then(|a| a.salt.as_ref()),
            AnyAttributeConfig::Weighted(v) => v
                .iter()
                .find(|a| a.attribute_name == attribute_name)
                .and_then(|a| a.salt.as_ref()),
        }
    }
}

/// Shape shared by every mask request before entities are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMaskRequest {
    /// Mask configuration.
    pub config: MaskConfig,
    /// Per-attribute configuration; empty is valid for CLK.
    #[serde(default)]
    pub attributes: AnyAttributeConfig,
}

/// A mask request bound to a concrete, non-empty list of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMaskRequest {
    /// Mask configuration.
    pub config: MaskConfig,
    /// Per-attribute configuration; empty is valid for CLK.
    #[serde(default)]
    pub attributes: AnyAttributeConfig,
    /// Entities to mask. Must not be empty.
    pub entities: Vec<AttributeValueEntity>,
}

impl BaseMaskRequest {
    /// Attaches a concrete entity list, producing the request the mask
    /// engine actually consumes.
    pub fn with_entities(self, entities: Vec<AttributeValueEntity>) -> EntityMaskRequest {
        EntityMaskRequest {
            config: self.config,
            attributes: self.attributes,
            entities,
        }
    }
}

impl EntityMaskRequest {
    /// Structural preconditions that do not require reasoning about
    /// individual entities: non-empty entity list, well-formed config
    /// (filter and hardener parameters included), well-formed salts, and
    /// strictly positive weights for weighted attribute configs.
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        if self.entities.is_empty() {
            return Err(ModelError::EmptyList("entities"));
        }
        self.config.validate()?;
        self.attributes.validate()?;
        Ok(())
    }
}

/// Response mirroring an [`EntityMaskRequest`], one bit vector per entity in
/// the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMaskResponse {
    /// Echoes the request's configuration.
    pub config: MaskConfig,
    /// One masked entity per input entity, same order.
    pub entities: Vec<BitVectorEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_salt_rejects_both_set() {
        let salt = AttributeSalt {
            value: Some("x".into()),
            attribute: Some("y".into()),
        };
        assert_eq!(salt.validate(), Err(ModelError::SaltBothSet));
    }

    #[test]
    fn attribute_salt_rejects_neither_set() {
        let salt = AttributeSalt {
            value: None,
            attribute: None,
        };
        assert_eq!(salt.validate(), Err(ModelError::SaltNeitherSet));
    }

    #[test]
    fn attribute_salt_accepts_exactly_one() {
        assert!(AttributeSalt {
            value: Some("x".into()),
            attribute: None
        }
        .validate()
        .is_ok());
        assert!(AttributeSalt {
            value: None,
            attribute: Some("y".into())
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn filter_deserializes_by_type_tag() {
        let json = serde_json::json!({"type": "clk", "filter_size": 1024, "hash_values": 5});
        let filter: Filter = serde_json::from_value(json).unwrap();
        assert!(matches!(filter, Filter::Clk(CLKFilter { filter_size: 1024, hash_values: 5 })));
    }

    #[test]
    fn hardener_deserializes_by_name_tag() {
        let json = serde_json::json!({"name": "permute", "seed": 42});
        let hardener: Hardener = serde_json::from_value(json).unwrap();
        assert!(matches!(hardener, Hardener::Permute { seed: 42 }));
    }

    #[test]
    fn any_attribute_config_prefers_weighted_shape() {
        let json = serde_json::json!([
            {"attribute_name": "given_name", "weight": 1.0, "average_token_count": 10.0}
        ]);
        let cfg: AnyAttributeConfig = serde_json::from_value(json).unwrap();
        assert!(matches!(cfg, AnyAttributeConfig::Weighted(_)));
    }

    #[test]
    fn any_attribute_config_falls_back_to_static_shape() {
        let json = serde_json::json!([{"attribute_name": "given_name"}]);
        let cfg: AnyAttributeConfig = serde_json::from_value(json).unwrap();
        assert!(matches!(cfg, AnyAttributeConfig::Static(_)));
    }

    #[test]
    fn weighted_attribute_config_rejects_non_positive_weight() {
        let attr = WeightedAttributeConfig {
            attribute_name: "given_name".into(),
            salt: None,
            weight: 0.0,
            average_token_count: 5.0,
        };
        assert_eq!(attr.validate(), Err(ModelError::NotPositive("weight")));
    }

    #[test]
    fn weighted_attribute_config_rejects_non_positive_average_token_count() {
        let attr = WeightedAttributeConfig {
            attribute_name: "given_name".into(),
            salt: None,
            weight: 1.0,
            average_token_count: 0.0,
        };
        assert_eq!(
            attr.validate(),
            Err(ModelError::NotPositive("average_token_count"))
        );
    }

    #[test]
    fn any_attribute_config_validate_rejects_non_positive_weight() {
        let cfg = AnyAttributeConfig::Weighted(vec![WeightedAttributeConfig {
            attribute_name: "given_name".into(),
            salt: None,
            weight: 0.0,
            average_token_count: 5.0,
        }]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn mask_config_validate_rejects_zero_filter_size() {
        let config = MaskConfig {
            token_size: 2,
            hash: HashConfig {
                function: HashFunction {
                    algorithms: vec![HashAlgorithm::Sha256],
                    key: None,
                },
                strategy: HashStrategy::DoubleHash,
            },
            prepend_attribute_name: true,
            filter: Filter::Clk(CLKFilter {
                filter_size: 0,
                hash_values: 5,
            }),
            padding: String::new(),
            hardeners: vec![],
        };
        assert_eq!(config.validate(), Err(ModelError::NotPositive("filter_size")));
    }

    #[test]
    fn mask_config_validate_rejects_zero_window_step_hardener() {
        let config = MaskConfig {
            token_size: 2,
            hash: HashConfig {
                function: HashFunction {
                    algorithms: vec![HashAlgorithm::Sha256],
                    key: None,
                },
                strategy: HashStrategy::DoubleHash,
            },
            prepend_attribute_name: true,
            filter: Filter::Clk(CLKFilter {
                filter_size: 1024,
                hash_values: 5,
            }),
            padding: String::new(),
            hardeners: vec![Hardener::Rehash {
                window_size: 8,
                window_step: 0,
                samples: 3,
            }],
        };
        assert_eq!(config.validate(), Err(ModelError::NotPositive("window_step")));
    }
}
