//! Axum API server for fablegate.

use axum::routing::{delete, get};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::config::ServerConfig;
use crate::error::Result;
use crate::service::SpeciesService;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline, including both caches.
    pub service: Arc<SpeciesService>,
}

impl AppState {
    pub fn new(service: SpeciesService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(super::routes::health::get_health))
        .route("/caches", delete(super::routes::health::clear_caches))
        .route("/species/{name}", get(super::routes::species::get_species))
        .route(
            "/species/translated/{name}",
            get(super::routes::species::get_translated_species),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the API server and run until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = build_router(state);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
