use axum::extract::State;
use axum::Json;
use dockside_core::zones::ZoneConfig;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /zones
///
/// All configured zones in registry order.
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ZoneConfig>>>> {
    let zones = state.zones.iter().cloned().collect();
    Ok(Json(DataResponse { data: zones }))
}
