use axum::extract::State;
use axum::Json;
use dockside_core::dock::{summarize, Dock, DockStatus, DockSummary};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the dock board endpoint.
#[derive(Debug, Deserialize)]
pub struct DocksQuery {
    pub zone: Option<String>,
    pub status: Option<DockStatus>,
}

/// Dock board plus counts for the docks returned.
#[derive(Debug, Serialize)]
pub struct DockBoard {
    pub docks: Vec<Dock>,
    pub summary: DockSummary,
}

/// GET /docks
pub async fn list_docks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DocksQuery>,
) -> AppResult<Json<DataResponse<DockBoard>>> {
    let snapshot = state.store.snapshot().await;
    let docks: Vec<Dock> = snapshot
        .docks
        .iter()
        .filter(|d| {
            query
                .zone
                .as_deref()
                .map_or(true, |z| d.zone.eq_ignore_ascii_case(z))
        })
        .filter(|d| query.status.map_or(true, |s| d.status == s))
        .cloned()
        .collect();

    let summary = summarize(&docks);
    Ok(Json(DataResponse {
        data: DockBoard { docks, summary },
    }))
}
