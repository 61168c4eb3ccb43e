use axum::routing::get;
use axum::Router;

use crate::handlers::docks;
use crate::state::AppState;

/// Routes mounted at `/docks`.
///
/// ```text
/// GET /    -> list_docks
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(docks::list_docks))
}
