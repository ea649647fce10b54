// [apps/pprl-cli/src/commands/estimate.rs]
//! `pprl estimate` never calls `pprl-service`: it is a thin, local
//! pass-through over `pprl_core::tokenize` that emits the
//! `{attribute_name, weight, average_token_count}` array as weighted-attribute
//! output. The full statistical weight *estimator* (token-frequency-based
//! weighting) is out of scope here, so `weight` is always `1.0` — a
//! documented simplification, not a hidden one.

use std::fs::File;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::{CommandArguments, EstimateArgs};
use crate::io;

/// One row of the weighted-attribute output array.
#[derive(Debug, Serialize)]
struct AttributeWeightEstimate {
    attribute_name: String,
    weight: f64,
    average_token_count: f64,
}

/// Runs `pprl estimate`.
pub fn run(global: &CommandArguments, args: &EstimateArgs) -> Result<()> {
    let entities = io::read_entities(&args.input, &global.id_column, global.delimiter)?;
    info!(count = entities.len(), "read entities for estimate");

    let mut estimates = Vec::with_capacity(args.attributes.len());
    for attribute_name in &args.attributes {
        let mut total_tokens = 0u64;
        let mut observed = 0u64;
        for entity in &entities {
            if let Some(value) = entity.attributes.get(attribute_name) {
                total_tokens += pprl_core::tokenize(value, args.token_size, &args.padding).len() as u64;
                observed += 1;
            }
        }
        let average_token_count = if observed == 0 { 0.0 } else { total_tokens as f64 / observed as f64 };
        estimates.push(AttributeWeightEstimate {
            attribute_name: attribute_name.clone(),
            weight: 1.0,
            average_token_count,
        });
    }

    let file = File::create(&args.output)?;
    serde_json::to_writer_pretty(file, &estimates)?;
    info!(count = estimates.len(), output = %args.output.display(), "wrote attribute weight estimates");
    Ok(())
}
