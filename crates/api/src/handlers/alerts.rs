use axum::extract::State;
use axum::Json;
use chrono::Utc;
use dockside_core::alert::{AlertFilter, AlertSeverity, TemperatureAlert, DEFAULT_ALERT_LIMIT};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiQuery;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_ALERT_LIMIT: usize = 500;

/// Query parameters for the alert list endpoint.
#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    /// Maximum alerts returned (default: 50).
    pub limit: Option<usize>,
}

/// GET /alerts
///
/// Scan the current reading of every configured zone and return the
/// resulting alerts, filtered by severity and type.
pub async fn list_alerts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AlertsQuery>,
) -> AppResult<Json<DataResponse<Vec<TemperatureAlert>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_ALERT_LIMIT);
    if !(1..=MAX_ALERT_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_ALERT_LIMIT}"
        )));
    }

    let filter = AlertFilter {
        severity: query.severity,
        alert_type: query.alert_type,
        limit,
    };

    let snapshot = state.store.snapshot().await;
    let alerts = filter.apply(snapshot.alerts(&state.zones, Utc::now()));
    Ok(Json(DataResponse { data: alerts }))
}
