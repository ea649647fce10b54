// [apps/pprl-cli/src/main.rs]
/*!
 * =================================================================
 * APARATO: PPRL CLI MAIN ENTRY POINT
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: PARSEO DE ARGUMENTOS Y DESPACHO DEL SUBCOMANDO
 * =================================================================
 */

use clap::Parser;
use pprl_cli::cli::CommandArguments;
use pprl_cli::commands;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "pprl_cli=info".into()))
        .compact()
        .init();

    let args = CommandArguments::parse();
    commands::run(args)
}
