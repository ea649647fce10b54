// [apps/pprl-service/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: PPRL HTTP SERVICE (ESTRATO L3)
//! CLASIFICACIÓN: APPLICATION SHELL / ADAPTADOR REST
//! RESPONSABILIDAD: EXPOSICIÓN SIN ESTADO DE `pprl-core` Y `pprl-model`
//! SOBRE HTTP, CON UN SOBRE DE ERROR Y TAXONOMÍA DE ESTADO UNIFORMES.
//!
//! Cada manejador es una función pura de su cuerpo JSON: no hay estado
//! compartido entre peticiones, ni autenticación, ni persistencia.

/// Lectura de configuración desde variables de entorno.
pub mod config;
/// Mapeo de `ModelError`/`CoreError` al sobre `{ "detail": ... }`.
pub mod error;
/// Manejadores de petición, uno por operación expuesta.
pub mod handlers;
/// Topología de rutas y capas de transporte (CORS, límites, trazas).
pub mod routes;
/// Arranque del sistema de trazas estructuradas.
pub mod telemetry;
