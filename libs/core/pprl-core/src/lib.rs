// [libs/core/pprl-core/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: PPRL ALGORITHM ENGINE (ESTRATO L1)
//! CLASIFICACIÓN: ALGORITHMIC CORE / MOTOR DE DOMINIO
//! RESPONSABILIDAD: IMPLEMENTACIÓN SOBERANA DE CADA OPERACIÓN DEL PIPELINE
//! DE ENLACE DE REGISTROS CON PRESERVACIÓN DE PRIVACIDAD — TRANSFORMACIÓN,
//! ENMASCARADO Y EMPAREJAMIENTO — SOBRE LOS TIPOS DE `pprl-model`.
//!
//! Ningún tipo de petición/respuesta se define aquí: ese es el dominio de
//! `pprl-model`, del cual este crate depende. Aquí vive únicamente el
//! cálculo — bits, tokens, cadenas de hash, estrategias de establecimiento
//! de bits, endurecedores, medidas de similitud, fonética y los tres
//! motores que los orquestan.

/// Bit primitives: fixed-length bitset, wrap-on-negative indexing,
/// base64 codec, `optimal_size`.
pub mod bits;

/// Errors surfaced across every engine, spanning the Validation,
/// Capability, Value and Internal classes.
pub mod error;

/// Post-processing hardeners (`balance`, `xor_fold`, `permute`,
/// `rule_90`, `randomized_response`, `rehash`).
pub mod harden;

/// The RustCrypto hash chain, plain or HMAC.
pub mod hash_chain;

/// The mask engine: CLK/RBF/CLKRBF filter construction.
pub mod mask_engine;

/// The match engine: crosswise/pairwise similarity scoring.
pub mod match_engine;

/// Soundex and Kölner Phonetik.
pub mod phonetics;

/// Similarity measures (Dice, Jaccard, cosine).
pub mod similarity;

/// Hash-strategy bit-index formulas (double/enhanced-double/triple
/// hash, random hash).
pub mod strategy;

/// q-gram tokenization and digest destructuring.
pub mod tokenize;

/// The transform engine: global/attribute-specific transformer
/// chains.
pub mod transform_engine;

/// Per-stage string transform logic invoked by `transform_engine`.
pub mod transform_fn;

/// Semantic preconditions checked once entities are in hand.
pub mod validate;

pub use bits::Bitset;
pub use error::CoreError;
pub use harden::apply_all as apply_hardeners;
pub use hash_chain::digest as hash_digest;
pub use mask_engine::mask;
pub use match_engine::run as run_match;
pub use phonetics::{cologne, soundex};
pub use similarity::similarity;
pub use strategy::bit_indices;
pub use tokenize::{destructure_digest, tokenize};
pub use transform_engine::transform;
pub use validate::validate_mask_request;
