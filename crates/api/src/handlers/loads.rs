//! Handlers for the inbound load schedule.
//!
//! Creates and updates are validated and echoed; the schedule itself is
//! owned by the snapshot source.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use dockside_core::load::{LoadFilter, LoadSchedule, LoadStatus, LoadUpdate, NewLoad, ScheduledLoad};
use dockside_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the load list endpoint.
#[derive(Debug, Deserialize)]
pub struct LoadsQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<LoadStatus>,
    pub zone: Option<String>,
}

/// Echo of an accepted load update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedLoad {
    #[serde(flatten)]
    pub update: LoadUpdate,
    pub updated_at: Timestamp,
}

/// GET /loads
///
/// Loads grouped by date (`YYYY-MM-DD` keys), filtered by date, status and
/// zone.
pub async fn list_loads(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LoadsQuery>,
) -> AppResult<Json<DataResponse<LoadSchedule>>> {
    let filter = LoadFilter {
        date: query.date,
        status: query.status,
        zone: query.zone,
    };

    let snapshot = state.store.snapshot().await;
    Ok(Json(DataResponse {
        data: filter.apply(&snapshot.loads),
    }))
}

/// POST /loads
pub async fn create_load(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewLoad>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduledLoad>>)> {
    let scheduled = input.schedule(&state.zones, Utc::now())?;

    tracing::info!(
        load_id = %scheduled.load.id,
        carrier = %scheduled.load.carrier,
        zone = %scheduled.load.temp_zone,
        date = %scheduled.date,
        "Load scheduled"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: scheduled })))
}

/// PATCH /loads
pub async fn update_load(
    ApiJson(input): ApiJson<LoadUpdate>,
) -> AppResult<Json<DataResponse<UpdatedLoad>>> {
    input.validate()?;

    tracing::info!(load_id = %input.id, status = ?input.status, "Load updated");

    Ok(Json(DataResponse {
        data: UpdatedLoad {
            update: input,
            updated_at: Utc::now(),
        },
    }))
}
