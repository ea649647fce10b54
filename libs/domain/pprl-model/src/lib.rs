// [libs/domain/pprl-model/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: PPRL DOMAIN MODEL (ESTRATO L2)
//! CLASIFICACIÓN: DATA MODEL / DTO
//! RESPONSABILIDAD: DEFINICIÓN SOBERANA DE LOS TIPOS DE ENTRADA Y SALIDA
//! DEL PIPELINE DE ENLACE DE REGISTROS CON PRESERVACIÓN DE PRIVACIDAD.
//!
//! Este crate no contiene ningún algoritmo: únicamente la forma de los
//! datos (`serde`) y la validación *estructural* de las configuraciones
//! (exclusividad mutua, rangos, listas no vacías) que un esquema como
//! Pydantic resolvería con validadores declarativos. En Rust, esa
//! responsabilidad se vuelve un método `validate()` explícito, llamado
//! por el llamador inmediatamente después de deserializar.

/// Errores estructurales (clase 422): forma de dato inválida antes de
/// que cualquier motor la procese.
pub mod error;

/// Entidades compartidas por los tres flujos: `AttributeValueEntity`,
/// `BitVectorEntity`, `HealthResponse`.
pub mod common;

/// Configuración y catálogos del motor de enmascarado (CLK/RBF/CLKRBF).
pub mod mask;

/// Configuración del motor de transformación de valores de atributo.
pub mod transform;

/// Configuración del motor de emparejamiento por similitud de conjuntos.
pub mod match_request;

pub use common::{AttributeValueEntity, BitVectorEntity, HealthResponse};
pub use error::ModelError;
pub use mask::{
    AnyAttributeConfig, AttributeSalt, BaseMaskRequest, CLKFilter, CLKRBFFilter,
    EntityMaskRequest, EntityMaskResponse, Filter, FilterType, HashAlgorithm, HashConfig,
    HashFunction, HashStrategy, Hardener, MaskConfig, RBFFilter, StaticAttributeConfig,
    WeightedAttributeConfig,
};
pub use match_request::{
    BaseMatchRequest, Match, MatchConfig, MatchMethod, SimilarityMeasure, VectorMatchRequest,
    VectorMatchResponse,
};
pub use transform::{
    AttributeTransformerConfig, BaseTransformRequest, EmptyValueHandling, EntityTransformRequest,
    EntityTransformResponse, GlobalTransformerConfig, PhoneticCodeAlgorithm, TransformConfig,
    Transformer,
};
