pub mod alerts;
pub mod docks;
pub mod health;
pub mod loads;
pub mod metrics;
pub mod sla;
pub mod temperature;
pub mod zones;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /zones                                 list configured zones
///
/// /temperature                           zone temperatures (GET), record reading (POST)
/// /temperature/{zone}/status             status, trend and alert for one zone
///
/// /alerts                                active temperature alerts
///
/// /loads                                 list (GET), schedule (POST), update (PATCH)
///
/// /docks                                 dock board with summary
///
/// /sla                                   SLA metrics with compliance
///
/// /metrics                               headline dashboard metrics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/zones", zones::router())
        .nest("/temperature", temperature::router())
        .nest("/alerts", alerts::router())
        .nest("/loads", loads::router())
        .nest("/docks", docks::router())
        .nest("/sla", sla::router())
        .nest("/metrics", metrics::router())
}
