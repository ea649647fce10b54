// [libs/core/pprl-core/src/error.rs]
use thiserror::Error;

/// Every fallible outcome an engine (transform/mask/match) can produce once
/// past structural validation, spanning the Validation, Capability, Value
/// and Internal error classes.
///
/// Validation errors enumerate every offender, not just the first; value
/// errors carry the offending entity's ID; capability errors name the
/// unimplemented element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A configured attribute is missing on one or more entities, or a
    /// configured `salt.attribute` reference is missing on one or more
    /// entities.
    #[error("some configured {kind} are not present on entities: {detail}")]
    AttributeNotPresent {
        /// Either `"attributes"` or `"attribute salts"`.
        kind: &'static str,
        /// Pre-formatted `` `attr` on entities with ID `id1`, `id2` `` list.
        detail: String,
    },

    /// A CLK filter was given weighted attribute configurations, or an
    /// RBF/CLKRBF filter was given static ones (or none at all).
    #[error("`{filter_type}` filters require {required} attribute configurations, but {found}")]
    AttributeKindMismatch {
        /// `clk` | `rbf` | `clkrbf`.
        filter_type: &'static str,
        /// `"static"` | `"weighted"`.
        required: &'static str,
        /// `"none were found"` | `"weighted ones were found"` | `"static ones were found"`.
        found: &'static str,
    },

    /// An attribute produced zero tokens during masking.
    #[error(
        "value for `{attribute}` on entity with ID `{entity_id}` did not produce any tokens - \
         decrease the token size or add sufficient padding"
    )]
    EmptyTokenSet {
        /// Attribute that produced no tokens.
        attribute: String,
        /// Entity on which this occurred.
        entity_id: String,
    },

    /// `pairwise` matching was requested with unequal-length domain/range
    /// lists.
    #[error("length of domain and range lists do not match: domain has length of {domain_len}, range has length of {range_len}")]
    PairwiseLengthMismatch {
        /// Length of the domain list.
        domain_len: usize,
        /// Length of the range list.
        range_len: usize,
    },

    /// One or more bit-vector entities carried invalid base64.
    #[error("invalid Base64 encoded bit vectors on entities with IDs {0}")]
    InvalidBase64(String),

    /// An entity's attribute value was the empty string under
    /// `EmptyValueHandling::Error`.
    #[error("entity with ID `{0}` contains empty field")]
    EmptyField(String),

    /// A transform stage raised a value-level error while processing an
    /// entity.
    #[error("entity with ID `{entity_id}` could not be processed: {message}")]
    ValueError {
        /// Entity being processed when the stage failed.
        entity_id: String,
        /// The stage's own error message.
        message: String,
    },

    /// The caller asked for a hash algorithm, hash strategy, hardener,
    /// filter type, similarity measure, or phonetic algorithm this
    /// deployment does not implement.
    #[error("unimplemented {kind} `{name}`")]
    Unimplemented {
        /// What kind of element is unimplemented (e.g. `"hash algorithm"`).
        kind: &'static str,
        /// The requested, unsupported name.
        name: String,
    },

    /// A numeric precondition (`optimal_size`'s `p`/`n`, a zero-weight
    /// attribute, etc.) was violated.
    #[error("{0}")]
    InvalidArgument(String),
}
