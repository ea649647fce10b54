// [libs/domain/pprl-model/src/error.rs]
use thiserror::Error;

/// Falla estructural detectada al validar la forma de una configuración,
/// antes de que ésta alcance cualquier motor algorítmico.
///
/// Corresponde a la clase 422 de la taxonomía de errores (rechazo de
/// esquema/estructura antes de la entrada al motor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Un `AttributeSalt` tiene tanto `value` como `attribute` definidos.
    #[error("value and attribute cannot be set at the same time")]
    SaltBothSet,

    /// Un `AttributeSalt` no tiene ni `value` ni `attribute` definidos.
    #[error("neither value nor attribute is set")]
    SaltNeitherSet,

    /// Una lista que requiere al menos un elemento llegó vacía.
    #[error("{0} must not be empty")]
    EmptyList(&'static str),

    /// Ni los transformadores por atributo ni los globales contienen nada.
    #[error("attribute and global transformers are empty: must contain at least one")]
    NoTransformers,

    /// Un campo que requiere un valor estrictamente positivo (`conint(gt=0)` /
    /// `confloat(gt=0)` en el original) llegó en cero o negativo.
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),

    /// Un campo acotado por un rango cerrado (`confloat(ge=.., le=..)` en el
    /// original) cayó fuera de él.
    #[error("{field} must be between {min} and {max} inclusive")]
    OutOfRange {
        /// Name of the out-of-range field.
        field: &'static str,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Un campo que requiere un valor estrictamente positivo y acotado por
    /// arriba (`conint(gt=0, le=..)` en el original) cayó fuera de ese rango.
    #[error("{field} must be greater than 0 and at most {max}")]
    PositiveAtMost {
        /// Name of the out-of-range field.
        field: &'static str,
        /// Inclusive upper bound.
        max: u32,
    },

    /// Un campo que requiere un valor estrictamente mayor que un límite dado
    /// (`conint(gt=N)` con `N != 0` en el original) llegó en ese límite o por
    /// debajo.
    #[error("{field} must be greater than {min}")]
    GreaterThan {
        /// Name of the out-of-range field.
        field: &'static str,
        /// Exclusive lower bound.
        min: u32,
    },
}
