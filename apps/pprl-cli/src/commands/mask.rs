// [apps/pprl-cli/src/commands/mask.rs]
use std::fs::File;

use anyhow::{Context, Result};
use pprl_model::{BaseMaskRequest, BitVectorEntity};
use tracing::info;

use crate::cli::{CommandArguments, MaskArgs};
use crate::client::ServiceClient;
use crate::io;

/// Runs `pprl mask`: reads entities, sends them in batches to
/// `POST /mask`, and writes the resulting bit vectors to one CSV.
pub fn run(global: &CommandArguments, args: &MaskArgs, client: &ServiceClient) -> Result<()> {
    let config_file = File::open(&args.config).with_context(|| format!("opening `{}`", args.config.display()))?;
    let config: BaseMaskRequest =
        serde_json::from_reader(config_file).with_context(|| format!("parsing `{}`", args.config.display()))?;

    let entities = io::read_entities(&args.input, &global.id_column, global.delimiter)?;
    info!(count = entities.len(), "read entities for mask");

    let mut masked: Vec<BitVectorEntity> = Vec::with_capacity(entities.len());
    for batch in io::batches(&entities, global.batch_size) {
        let request = config.clone().with_entities(batch);
        request.validate_structure()?;
        let response = client.mask(&request)?;
        masked.extend(response.entities);
    }

    io::write_bitvectors_csv(&args.output, &masked, global.delimiter)?;
    info!(count = masked.len(), output = %args.output.display(), "wrote masked bit vectors");
    Ok(())
}
