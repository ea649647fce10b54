// [apps/pprl-cli/src/lib.rs]
#![deny(missing_docs)]

//! # APARATO: PPRL BATCH CLIENT (ESTRATO L3)
//! CLASIFICACIÓN: APPLICATION SHELL / CLIENTE DE LOTE
//! RESPONSABILIDAD: ETL DE CSV/JSON CONTRA `pprl-service`, REBANANDO CADA
//! ARCHIVO DE ENTRADA EN LOTES Y ESCRIBIENDO UN ÚNICO CSV DE SALIDA POR
//! SUBCOMANDO (`transform` | `mask` | `match` | `estimate`).
//!
//! Este crate no implementa ningún algoritmo de enlace: es un orquestador
//! de E/S y peticiones HTTP sobre los tipos de `pprl-model`.

/// Batch HTTP client over `pprl-service`'s three engine endpoints.
pub mod client;

/// Per-subcommand CLI argument parsing (`clap::Parser`).
pub mod cli;

/// Subcommand implementations: `transform`, `mask`, `match`, `estimate`.
pub mod commands;

/// Errors surfaced by the CLI's own I/O and batching logic (not the
/// service's request/response errors, which `client` propagates verbatim).
pub mod error;

/// CSV/JSON entity and bit-vector I/O, plus batch slicing.
pub mod io;
