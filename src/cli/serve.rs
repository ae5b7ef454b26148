//! `fablegate serve` command.

use anyhow::{Context, Result};
use fablegate::api::{start_server, AppState};
use fablegate::config::Config;
use fablegate::service::SpeciesService;
use tracing::info;

/// Apply CLI overrides, wire the pipeline and run the API server.
pub async fn cmd_serve(mut config: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let service =
        SpeciesService::from_config(&config).context("Failed to build lookup service")?;
    info!(
        species = %config.species.base_url,
        translation = %config.translation.base_url,
        "Upstreams configured"
    );

    start_server(&config.server, AppState::new(service))
        .await
        .with_context(|| format!("API server failed on {}", config.server.addr()))
}
