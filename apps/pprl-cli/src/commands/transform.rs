// [apps/pprl-cli/src/commands/transform.rs]
use std::fs::File;

use anyhow::{Context, Result};
use pprl_model::{AttributeValueEntity, BaseTransformRequest};
use tracing::info;

use crate::cli::{CommandArguments, TransformArgs};
use crate::client::ServiceClient;
use crate::io;

/// Runs `pprl transform`: reads entities, sends them in batches to
/// `POST /transform`, and writes the transformed entities to one CSV.
pub fn run(global: &CommandArguments, args: &TransformArgs, client: &ServiceClient) -> Result<()> {
    let config_file = File::open(&args.config).with_context(|| format!("opening `{}`", args.config.display()))?;
    let config: BaseTransformRequest =
        serde_json::from_reader(config_file).with_context(|| format!("parsing `{}`", args.config.display()))?;
    config.validate().with_context(|| "transform config failed validation")?;

    let entities = io::read_entities(&args.input, &global.id_column, global.delimiter)?;
    info!(count = entities.len(), "read entities for transform");

    let mut transformed: Vec<AttributeValueEntity> = Vec::with_capacity(entities.len());
    for batch in io::batches(&entities, global.batch_size) {
        let request = config.clone().with_entities(batch);
        request.validate_structure()?;
        let response = client.transform(&request)?;
        transformed.extend(response.entities);
    }

    io::write_entities_csv(&args.output, &transformed, &global.id_column, global.delimiter)?;
    info!(count = transformed.len(), output = %args.output.display(), "wrote transformed entities");
    Ok(())
}
