use axum::routing::get;
use axum::Router;

use crate::handlers::sla;
use crate::state::AppState;

/// Routes mounted at `/sla`.
///
/// ```text
/// GET /    -> sla_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sla::sla_report))
}
