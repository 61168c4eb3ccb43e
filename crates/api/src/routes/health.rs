use axum::extract::State;
use axum::{routing::get, Json, Router};
use dockside_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Name of the snapshot source currently served.
    pub source: &'static str,
    /// When the served snapshot was last fetched successfully.
    pub last_refresh: Timestamp,
}

/// GET /health -- returns service health and snapshot freshness.
///
/// Reports `degraded` while the last refresh failed and fallback data is
/// being served.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.store.current().await;
    let status = if current.fallback { "degraded" } else { "ok" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        source: current.source,
        last_refresh: current.refreshed_at,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
