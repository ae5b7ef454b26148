//! Health and cache maintenance endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::server::AppState;

/// GET /health: returns version and cache counters.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "caches": state.service.cache_stats(),
    }))
}

/// DELETE /caches: drops every cached upstream response.
pub async fn clear_caches(State(state): State<Arc<AppState>>) -> StatusCode {
    state.service.clear_caches();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::build_router;
    use crate::api::server::tests::{make_state, send};

    #[tokio::test]
    async fn test_get_health_returns_ok() {
        let Json(body) = get_health(State(Arc::new(make_state()))).await;
        assert_eq!(body["status"], "ok");
        assert!(body["version"].is_string());
        assert_eq!(body["caches"]["species"]["total_entries"], 0);
        assert_eq!(body["caches"]["translation"]["total_entries"], 0);
    }

    #[tokio::test]
    async fn test_health_reflects_cache_activity_and_clear() {
        let app = build_router(make_state());

        send(app.clone(), "GET", "/species/translated/pikachu").await;
        send(app.clone(), "GET", "/species/pikachu").await;
        let (_, body) = send(app.clone(), "GET", "/health").await;
        assert_eq!(body["caches"]["species"]["total_entries"], 1);
        assert_eq!(body["caches"]["species"]["hits"], 1);
        assert_eq!(body["caches"]["species"]["misses"], 1);
        assert_eq!(body["caches"]["translation"]["total_entries"], 1);

        let (status, _) = send(app.clone(), "DELETE", "/caches").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(app, "GET", "/health").await;
        assert_eq!(body["caches"]["species"]["total_entries"], 0);
        assert_eq!(body["caches"]["translation"]["total_entries"], 0);
    }
}
