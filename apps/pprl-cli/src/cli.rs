// [apps/pprl-cli/src/cli.rs]
//! Command-line surface: one process-wide set of transport options (base
//! URL, batch size, timeout, CSV delimiter, encoding), and one subcommand
//! per engine (`transform` | `mask` | `match`) plus `estimate`.
//!
//! One subcommand per engine, each with its own input/output files, sharing
//! the process-wide transport options as `global = true` arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cliente de lote para `pprl-service`: transforma, enmascara y empareja
/// registros leyendo CSV/JSON y escribiendo un único CSV de salida.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommandArguments {
    /// Base URL of a running `pprl-service` instance.
    #[arg(long, global = true, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Number of entities/vectors sent per HTTP request.
    #[arg(long, global = true, default_value_t = 500)]
    pub batch_size: usize,

    /// Per-request timeout, in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Field delimiter used when reading and writing CSV files.
    #[arg(long, global = true, default_value_t = ',')]
    pub delimiter: char,

    /// Text encoding of CSV input/output files. Only `utf-8` is supported;
    /// any other value is a configuration error.
    #[arg(long, global = true, default_value = "utf-8")]
    pub encoding: String,

    /// Name of the identifier column in entity/bit-vector CSVs.
    #[arg(long, global = true, default_value = "id")]
    pub id_column: String,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per engine exposed over the batch interface.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Runs the transform engine over one or more entity CSV/JSON files.
    Transform(TransformArgs),
    /// Runs the mask engine over one or more entity CSV/JSON files.
    Mask(MaskArgs),
    /// Runs the match engine over domain/range bit-vector CSV/JSON files.
    Match(MatchArgs),
    /// Estimates per-attribute average token counts without calling the
    /// service (a local, `pprl_core::tokenize`-backed pass-through).
    Estimate(EstimateArgs),
}

/// Arguments for `pprl transform`.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// One or more entity CSV/JSON files.
    #[arg(long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// JSON file holding `{ "config", "attribute_transformers", "global_transformers" }`
    /// (the request body shape minus `entities`).
    #[arg(long)]
    pub config: PathBuf,

    /// Destination CSV for the transformed entities.
    #[arg(long)]
    pub output: PathBuf,
}

/// Arguments for `pprl mask`.
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// One or more entity CSV/JSON files.
    #[arg(long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// JSON file holding `{ "config", "attributes" }` (the request body
    /// shape minus `entities`).
    #[arg(long)]
    pub config: PathBuf,

    /// Destination CSV for the resulting bit vectors.
    #[arg(long)]
    pub output: PathBuf,
}

/// Arguments for `pprl match`.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// One or more domain-side bit-vector CSV/JSON files.
    #[arg(long, required = true, num_args = 1..)]
    pub domain: Vec<PathBuf>,

    /// One or more range-side bit-vector CSV/JSON files.
    #[arg(long, required = true, num_args = 1..)]
    pub range: Vec<PathBuf>,

    /// JSON file holding the match `MatchConfig`.
    #[arg(long)]
    pub config: PathBuf,

    /// Destination CSV for the emitted matches.
    #[arg(long)]
    pub output: PathBuf,
}

/// Arguments for `pprl estimate`.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// One or more entity CSV/JSON files.
    #[arg(long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Attribute names to estimate. Every other attribute is ignored.
    #[arg(long, required = true, num_args = 1..)]
    pub attributes: Vec<String>,

    /// Token (q-gram) length used to tokenize each attribute value.
    #[arg(long, default_value_t = 2)]
    pub token_size: u32,

    /// Padding applied before tokenization.
    #[arg(long, default_value = "")]
    pub padding: String,

    /// Destination JSON file for the `{attribute_name, weight, average_token_count}` array.
    #[arg(long)]
    pub output: PathBuf,
}
