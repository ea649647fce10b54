// [apps/pprl-cli/src/error.rs]
//! Errors the CLI's own I/O and batching logic can raise. Errors returned
//! by `pprl-service` itself (the `{ "detail": ... }` envelope) are
//! propagated as plain `anyhow::Error` strings by `client`, since the CLI
//! has no use for their status-code taxonomy beyond a non-zero exit.

use thiserror::Error;

/// Failures specific to reading/writing batch files, independent of any
/// particular service response.
#[derive(Error, Debug)]
pub enum CliError {
    /// The input CSV/JSON file had no `id` (or configured id) column.
    #[error("input file `{path}` has no `{id_column}` column")]
    MissingIdColumn {
        /// Path of the offending file.
        path: String,
        /// Name of the id column that was looked for.
        id_column: String,
    },

    /// An unsupported file extension was given where `.csv` or `.json` was
    /// expected.
    #[error("unsupported input file extension for `{path}`: expected `.csv` or `.json`")]
    UnsupportedExtension {
        /// Path of the offending file.
        path: String,
    },

    /// `pprl-service` answered with a non-success status.
    #[error("request to `{endpoint}` failed with status {status}: {detail}")]
    ServiceError {
        /// Endpoint that was called, e.g. `"/mask"`.
        endpoint: &'static str,
        /// HTTP status code returned.
        status: u16,
        /// `detail` field of the `{ "detail": ... }` error envelope.
        detail: String,
    },
}
