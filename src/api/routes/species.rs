//! Species lookup routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::server::AppState;
use crate::error::FablegateError;
use crate::profile::SpeciesProfile;

type ApiResult = Result<Json<SpeciesProfile>, (StatusCode, Json<Value>)>;

/// GET /species/{name}
pub async fn get_species(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult {
    lookup(&state, &name, false).await
}

/// GET /species/translated/{name}
pub async fn get_translated_species(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult {
    lookup(&state, &name, true).await
}

async fn lookup(state: &AppState, name: &str, translated: bool) -> ApiResult {
    state
        .service
        .get_species(name, translated)
        .await
        .map(Json)
        .map_err(|e| error_response(&e))
}

/// Map a pipeline error to `{"status": .., "message": ..}`.
///
/// Upstream statuses pass through verbatim; anything that is not a valid HTTP
/// status, and any transport failure, becomes 502.
pub fn error_response(err: &FablegateError) -> (StatusCode, Json<Value>) {
    let status = match err {
        FablegateError::UpstreamSpecies { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        FablegateError::Transport(_) => StatusCode::BAD_GATEWAY,
        FablegateError::Config(_) | FablegateError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(json!({ "status": status.as_u16(), "message": err.to_string() })),
    )
}
