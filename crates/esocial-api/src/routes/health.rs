//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Configured service version.
    pub version: String,
    /// Current time, RFC 3339.
    pub timestamp: String,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let version = state.config.read().await.service_version.clone();
    Json(HealthResponse {
        status: "ok".to_string(),
        version,
        timestamp: state.clock.now().to_rfc3339(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
