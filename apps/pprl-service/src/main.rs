// [apps/pprl-service/src/main.rs]
/*!
 * =================================================================
 * APARATO: PPRL SERVICE MAIN ENTRY POINT
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: IGNICIÓN DEL SERVIDOR HTTP SIN ESTADO
 * =================================================================
 */

use anyhow::Context;
use pprl_service::config::ServiceConfig;
use pprl_service::routes::build_router;
use pprl_service::telemetry::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("pprl_service");

    let config = ServiceConfig::from_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the Tokio runtime")?;

    runtime.block_on(async {
        let app = build_router(&config);
        let listener = tokio::net::TcpListener::bind(config.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", config.bind_address))?;

        info!("pprl-service listening on {}", config.bind_address);
        axum::serve(listener, app)
            .await
            .context("server loop terminated unexpectedly")
    })
}
