// [apps/pprl-cli/src/commands/mod.rs]
//! One module per subcommand: `transform`, `mask`, `match`, `estimate`.

use std::time::Duration;

use anyhow::Result;

use crate::cli::{Command, CommandArguments};
use crate::client::ServiceClient;

mod estimate;
mod mask;
mod match_cmd;
mod transform;

/// Dispatches to the subcommand's implementation. Builds one
/// [`ServiceClient`] shared across every batch the subcommand issues.
pub fn run(args: CommandArguments) -> Result<()> {
    let client = ServiceClient::new(&args.base_url, Duration::from_secs(args.timeout_secs))?;

    match &args.command {
        Command::Transform(sub) => transform::run(&args, sub, &client),
        Command::Mask(sub) => mask::run(&args, sub, &client),
        Command::Match(sub) => match_cmd::run(&args, sub, &client),
        Command::Estimate(sub) => estimate::run(&args, sub),
    }
}
