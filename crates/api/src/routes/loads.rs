//! Route definitions for the inbound load schedule.

use axum::routing::get;
use axum::Router;

use crate::handlers::loads;
use crate::state::AppState;

/// Routes mounted at `/loads`.
///
/// ```text
/// GET   /    -> list_loads
/// POST  /    -> create_load
/// PATCH /    -> update_load
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(loads::list_loads)
            .post(loads::create_load)
            .patch(loads::update_load),
    )
}
