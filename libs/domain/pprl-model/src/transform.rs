// [libs/domain/pprl-model/src/transform.rs]
use crate::common::AttributeValueEntity;
use crate::error::ModelError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Policy applied when a stage would operate on an empty string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValueHandling {
    /// Invoke the stage normally; it may itself raise a value error.
    Ignore,
    /// Fail the whole request with an `entity with ID <id> contains empty field` error.
    Error,
    /// Leave the value unchanged, skipping the stage.
    Skip,
}

/// Configuration shared by every stage invocation in a transform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Policy applied before each stage invocation when the current value
    /// is the empty string.
    pub empty_value: EmptyValueHandling,
}

/// Phonetic code algorithm requested by a [`Transformer::PhoneticCode`]
/// stage. `soundex` and `cologne` are fully implemented; the remaining
/// locale-specific variants are accepted at the schema level but raise a
/// capability error at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneticCodeAlgorithm {
    /// Classic American Soundex.
    Soundex,
    /// Double Metaphone family. Contract-level only.
    Metaphone,
    /// Refined Soundex. Contract-level only.
    RefinedSoundex,
    /// Fuzzy Soundex. Contract-level only.
    FuzzySoundex,
    /// Kölner Phonetik, tailored for German.
    Cologne,
}

/// Tagged value-transformation stage. `name` is the JSON discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Transformer {
    /// Transliterate, NFKD-normalize, lowercase, collapse whitespace, trim.
    Normalization,
    /// Reparse/reformat a date-time string between two strftime patterns.
    DateTime {
        /// strptime-style input pattern.
        input_format: String,
        /// strftime-style output pattern.
        output_format: String,
    },
    /// Drop every occurrence of any character in `characters` (default:
    /// ASCII punctuation).
    CharacterFilter {
        /// Characters to drop. `None` means ASCII punctuation.
        #[serde(default)]
        characters: Option<String>,
    },
    /// Replace the whole string via a lookup table, or splice matches of
    /// every key in place (`inline = true`).
    Mapping {
        /// Replacement table, in configuration order (order matters for
        /// `inline` scans).
        mapping: IndexMap<String, String>,
        /// Fallback when `inline = false` and the input has no entry.
        #[serde(default)]
        default_value: Option<String>,
        /// Whole-string replacement (`false`, default) vs. in-place splice
        /// of every non-overlapping occurrence of every key (`true`).
        #[serde(default)]
        inline: bool,
    },
    /// Parse as a real number and format with a fixed number of decimal
    /// places.
    Number {
        /// Number of fractional digits to emit.
        decimal_places: u32,
    },
    /// Delegate to a named phonetic-code algorithm.
    PhoneticCode {
        /// Algorithm to apply.
        algorithm: PhoneticCodeAlgorithm,
    },
}

impl Transformer {
    /// Name used in capability-error and validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Transformer::Normalization => "normalization",
            Transformer::DateTime { .. } => "date_time",
            Transformer::CharacterFilter { .. } => "character_filter",
            Transformer::Mapping { .. } => "mapping",
            Transformer::Number { .. } => "number",
            Transformer::PhoneticCode { .. } => "phonetic_code",
        }
    }

    /// Structural precondition: a `mapping` transformer's table must not be
    /// empty.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Transformer::Mapping { mapping, .. } = self {
            if mapping.is_empty() {
                return Err(ModelError::EmptyList("mapping"));
            }
        }
        Ok(())
    }
}

/// Transformer chain applied to one named attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTransformerConfig {
    /// Attribute this chain applies to.
    pub attribute_name: String,
    /// Ordered, non-empty list of transformers.
    pub transformers: Vec<Transformer>,
}

impl AttributeTransformerConfig {
    /// Structural precondition: the transformer chain must not be empty.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.transformers.is_empty() {
            return Err(ModelError::EmptyList("attribute transformers"));
        }
        for tf in &self.transformers {
            tf.validate()?;
        }
        Ok(())
    }
}

/// Transformer chains applied to every attribute, before (`before`) and
/// after (`after`) any attribute-specific chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalTransformerConfig {
    /// Applied first, to every attribute.
    #[serde(default)]
    pub before: Vec<Transformer>,
    /// Applied last, to every attribute.
    #[serde(default)]
    pub after: Vec<Transformer>,
}

/// Shape shared by every transform request before entities are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTransformRequest {
    /// Empty-value handling policy.
    pub config: TransformConfig,
    /// Per-attribute transformer chains.
    #[serde(default)]
    pub attribute_transformers: Vec<AttributeTransformerConfig>,
    /// Transformer chains applied to every attribute.
    #[serde(default)]
    pub global_transformers: GlobalTransformerConfig,
}

impl BaseTransformRequest {
    /// Structural precondition: at least one transformer (attribute or
    /// global) must be configured.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.attribute_transformers.is_empty()
            && self.global_transformers.before.is_empty()
            && self.global_transformers.after.is_empty()
        {
            return Err(ModelError::NoTransformers);
        }
        for attr in &self.attribute_transformers {
            attr.validate()?;
        }
        for tf in self
            .global_transformers
            .before
            .iter()
            .chain(self.global_transformers.after.iter())
        {
            tf.validate()?;
        }
        Ok(())
    }

    /// Attaches a concrete entity list, producing the request the
    /// transform engine actually consumes.
    pub fn with_entities(self, entities: Vec<AttributeValueEntity>) -> EntityTransformRequest {
        EntityTransformRequest {
            config: self.config,
            attribute_transformers: self.attribute_transformers,
            global_transformers: self.global_transformers,
            entities,
        }
    }
}

/// A transform request bound to a concrete, non-empty list of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTransformRequest {
    /// Empty-value handling policy.
    pub config: TransformConfig,
    /// Per-attribute transformer chains.
    #[serde(default)]
    pub attribute_transformers: Vec<AttributeTransformerConfig>,
    /// Transformer chains applied to every attribute.
    #[serde(default)]
    pub global_transformers: GlobalTransformerConfig,
    /// Entities to transform. Must not be empty.
    pub entities: Vec<AttributeValueEntity>,
}

impl EntityTransformRequest {
    /// Structural preconditions: non-empty entity list, at least one
    /// transformer configured.
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        if self.entities.is_empty() {
            return Err(ModelError::EmptyList("entities"));
        }
        if self.attribute_transformers.is_empty()
            && self.global_transformers.before.is_empty()
            && self.global_transformers.after.is_empty()
        {
            return Err(ModelError::NoTransformers);
        }
        for attr in &self.attribute_transformers {
            attr.validate()?;
        }
        for tf in self
            .global_transformers
            .before
            .iter()
            .chain(self.global_transformers.after.iter())
        {
            tf.validate()?;
        }
        Ok(())
    }
}

/// Response mirroring an [`EntityTransformRequest`], entities in the same
/// order with their attribute values transformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTransformResponse {
    /// Echoes the request's configuration.
    pub config: TransformConfig,
    /// Transformed entities, same order as the request.
    pub entities: Vec<AttributeValueEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_transform_request_requires_some_transformer() {
        let req = BaseTransformRequest {
            config: TransformConfig {
                empty_value: EmptyValueHandling::Ignore,
            },
            attribute_transformers: Vec::new(),
            global_transformers: GlobalTransformerConfig::default(),
        };
        assert_eq!(req.validate(), Err(ModelError::NoTransformers));
    }

    #[test]
    fn mapping_transformer_preserves_insertion_order() {
        let json = serde_json::json!({
            "name": "mapping",
            "mapping": {"ob": "x", "ba": "y"},
            "inline": true
        });
        let tf: Transformer = serde_json::from_value(json).unwrap();
        if let Transformer::Mapping { mapping, .. } = tf {
            let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["ob", "ba"]);
        } else {
            panic!("expected mapping transformer");
        }
    }
}
