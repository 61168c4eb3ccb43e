//! Route definitions for the zone registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::zones;
use crate::state::AppState;

/// Routes mounted at `/zones`.
///
/// ```text
/// GET /    -> list_zones
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(zones::list_zones))
}
