// [apps/pprl-cli/src/commands/match_cmd.rs]
use std::collections::HashMap;
use std::fs::File;

use anyhow::{Context, Result};
use pprl_model::{BaseMatchRequest, BitVectorEntity, MatchMethod};
use tracing::info;

use crate::cli::{CommandArguments, MatchArgs};
use crate::client::ServiceClient;
use crate::io::{self, MatchRow};

/// Runs `pprl match`: reads domain/range bit vectors, sends them to
/// `POST /match` (batched over the domain side for `crosswise`, in
/// lockstep for `pairwise`), and writes the emitted matches to one CSV.
pub fn run(global: &CommandArguments, args: &MatchArgs, client: &ServiceClient) -> Result<()> {
    let config_file = File::open(&args.config).with_context(|| format!("opening `{}`", args.config.display()))?;
    let config: BaseMatchRequest =
        serde_json::from_reader(config_file).with_context(|| format!("parsing `{}`", args.config.display()))?;

    let domain_ws = io::read_bitvectors_with_source(&args.domain, global.delimiter)?;
    let range_ws = io::read_bitvectors_with_source(&args.range, global.delimiter)?;
    info!(domain = domain_ws.len(), range = range_ws.len(), "read bit vectors for match");

    let domain_file_of: HashMap<&str, &str> =
        domain_ws.iter().map(|(e, f)| (e.id.as_str(), f.as_str())).collect();
    let range_file_of: HashMap<&str, &str> = range_ws.iter().map(|(e, f)| (e.id.as_str(), f.as_str())).collect();

    let domain: Vec<BitVectorEntity> = domain_ws.iter().map(|(e, _)| e.clone()).collect();
    let range: Vec<BitVectorEntity> = range_ws.iter().map(|(e, _)| e.clone()).collect();

    let mut rows: Vec<MatchRow> = Vec::new();
    match config.config.method {
        MatchMethod::Crosswise => {
            for domain_batch in io::batches(&domain, global.batch_size) {
                let request = config.clone().with_vectors(domain_batch, range.clone());
                request.validate_structure()?;
                let response = client.run_match(&request)?;
                rows.extend(response.matches.into_iter().map(|m| MatchRow {
                    domain_file: domain_file_of.get(m.domain.id.as_str()).copied().unwrap_or_default().to_string(),
                    range_file: range_file_of.get(m.range.id.as_str()).copied().unwrap_or_default().to_string(),
                    m,
                }));
            }
        }
        MatchMethod::Pairwise => {
            if domain.len() != range.len() {
                anyhow::bail!(
                    "length of domain and range lists do not match: domain has length of {}, range has length of {}",
                    domain.len(),
                    range.len()
                );
            }
            let paired: Vec<(BitVectorEntity, BitVectorEntity)> = domain.iter().cloned().zip(range.iter().cloned()).collect();
            for batch in io::batches(&paired, global.batch_size) {
                let (domain_batch, range_batch): (Vec<_>, Vec<_>) = batch.into_iter().unzip();
                let request = config.clone().with_vectors(domain_batch, range_batch);
                request.validate_structure()?;
                let response = client.run_match(&request)?;
                rows.extend(response.matches.into_iter().map(|m| MatchRow {
                    domain_file: domain_file_of.get(m.domain.id.as_str()).copied().unwrap_or_default().to_string(),
                    range_file: range_file_of.get(m.range.id.as_str()).copied().unwrap_or_default().to_string(),
                    m,
                }));
            }
        }
    }

    io::write_matches_csv(&args.output, &rows, global.delimiter, args.domain.len() > 1, args.range.len() > 1)?;
    info!(count = rows.len(), output = %args.output.display(), "wrote matches");
    Ok(())
}
