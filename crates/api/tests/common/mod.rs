#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use dockside_api::config::{DataSourceKind, ServerConfig};
use dockside_api::router::build_app_router;
use dockside_api::state::AppState;
use dockside_api::store::{SnapshotStore, StoredSnapshot};
use dockside_core::mock::MockSource;
use dockside_core::source::SOURCE_MOCK;
use dockside_core::zones::ZoneRegistry;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        refresh_interval_secs: 900,
        data_source: DataSourceKind::Mock,
    }
}

/// Mock snapshot generated now, as served right after a healthy start-up.
pub fn mock_snapshot() -> StoredSnapshot {
    let now = Utc::now();
    StoredSnapshot {
        snapshot: Arc::new(MockSource::new(ZoneRegistry::warehouse_default()).generate(now)),
        source: SOURCE_MOCK,
        refreshed_at: now,
        fallback: false,
    }
}

/// Build the full application router over a fresh mock snapshot.
pub fn build_test_app() -> Router {
    build_test_app_with(mock_snapshot())
}

/// Build the full application router serving `stored`.
pub fn build_test_app_with(stored: StoredSnapshot) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        zones: Arc::new(ZoneRegistry::warehouse_default()),
        store: Arc::new(SnapshotStore::new(stored)),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
