use axum::extract::State;
use axum::Json;
use dockside_core::sla::{compliance, SlaMetric, SlaStatus};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// An SLA metric with its evaluated status.
#[derive(Debug, Serialize)]
pub struct SlaMetricView {
    #[serde(flatten)]
    pub metric: SlaMetric,
    pub status: SlaStatus,
}

#[derive(Debug, Serialize)]
pub struct SlaReport {
    pub metrics: Vec<SlaMetricView>,
    /// Overall compliance percentage.
    pub compliance: f64,
}

/// GET /sla
pub async fn sla_report(State(state): State<AppState>) -> AppResult<Json<DataResponse<SlaReport>>> {
    let snapshot = state.store.snapshot().await;
    let metrics = snapshot
        .sla
        .iter()
        .map(|m| SlaMetricView {
            status: m.status(),
            metric: m.clone(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: SlaReport {
            metrics,
            compliance: compliance(&snapshot.sla),
        },
    }))
}
