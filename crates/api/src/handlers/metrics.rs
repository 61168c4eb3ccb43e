use axum::extract::State;
use axum::Json;
use chrono::Utc;
use dockside_core::snapshot::DashboardMetrics;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /metrics
///
/// Headline numbers: active loads, loads completed today, SLA compliance,
/// dock utilization and the number of temperature alerts.
pub async fn dashboard_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardMetrics>>> {
    let snapshot = state.store.snapshot().await;
    let metrics = snapshot.metrics(&state.zones, Utc::now());
    Ok(Json(DataResponse { data: metrics }))
}
