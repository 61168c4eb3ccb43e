//! Route definitions for temperature monitoring endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::temperature;
use crate::state::AppState;

/// Routes mounted at `/temperature`.
///
/// ```text
/// GET  /                  -> list_temperatures
/// POST /                  -> record_reading
/// GET  /{zone}/status     -> zone_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(temperature::list_temperatures).post(temperature::record_reading),
        )
        .route("/{zone}/status", get(temperature::zone_status))
}
