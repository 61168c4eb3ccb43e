//! Integration tests for the temperature endpoints.
//!
//! The mock snapshot keeps every zone inside tolerance except fresh produce,
//! whose latest reading sits in the warning-high band.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// GET /api/v1/zones
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zones_are_listed_in_registry_order() {
    let json = body_json(get(common::build_test_app(), "/api/v1/zones").await).await;

    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["frozen", "fresh", "dairy", "dry"]);
    assert_eq!(json["data"][0]["targetTemp"], -18.0);
    assert_eq!(json["data"][1]["name"], "Fresh/Produce");
}

// ---------------------------------------------------------------------------
// GET /api/v1/temperature
// ---------------------------------------------------------------------------

#[tokio::test]
async fn temperatures_default_to_24_hours_of_history() {
    let response = get(common::build_test_app(), "/api/v1/temperature").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let zones = json["data"].as_array().unwrap();
    assert_eq!(zones.len(), 4);
    for zone in zones {
        assert_eq!(zone["history"].as_array().unwrap().len(), 24);
        assert!(zone["currentTemp"].is_number());
    }
}

#[tokio::test]
async fn temperatures_filtered_by_zone_and_hours() {
    let json = body_json(
        get(common::build_test_app(), "/api/v1/temperature?zone=FRESH&hours=6").await,
    )
    .await;

    let zones = json["data"].as_array().unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0]["zone"], "fresh");
    assert_eq!(zones[0]["status"], "warning-high");
    assert_eq!(zones[0]["history"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn temperatures_reject_out_of_range_hours() {
    for uri in ["/api/v1/temperature?hours=0", "/api/v1/temperature?hours=169"] {
        let response = get(common::build_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn temperatures_reject_non_numeric_hours_with_json_error() {
    let response = get(common::build_test_app(), "/api/v1/temperature?hours=all").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn temperatures_for_unknown_zone_return_404() {
    let response = get(common::build_test_app(), "/api/v1/temperature?zone=arctic").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// GET /api/v1/temperature/{zone}/status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zone_status_for_alerting_zone() {
    let response = get(common::build_test_app(), "/api/v1/temperature/fresh/status").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["zone"]["id"], "fresh");
    assert_eq!(data["current"]["temperature"], 4.4);
    assert_eq!(data["status"], "warning-high");
    assert_eq!(data["variance"], 2.4);
    assert_eq!(data["inRange"], false);
    assert!(data["average24h"].is_number());
    assert!(["rising", "falling", "stable"].contains(&data["trend"].as_str().unwrap()));
    assert_eq!(data["alert"]["severity"], "high");
    assert_eq!(data["alert"]["type"], "temperature");
    assert_eq!(data["alert"]["zoneName"], "Fresh/Produce");
}

#[tokio::test]
async fn zone_status_for_normal_zone_has_no_alert() {
    let data = body_json(get(common::build_test_app(), "/api/v1/temperature/frozen/status").await)
        .await["data"]
        .clone();

    assert_eq!(data["status"], "normal");
    assert_eq!(data["inRange"], true);
    assert!(data["alert"].is_null());
}

#[tokio::test]
async fn zone_status_for_unknown_zone_returns_404() {
    let response = get(common::build_test_app(), "/api/v1/temperature/arctic/status").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Zone with id arctic not found");
}

// ---------------------------------------------------------------------------
// POST /api/v1/temperature
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_reading_classifies_and_alerts() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/temperature",
        json!({ "zone": "frozen", "temperature": -13.0, "timestamp": "2026-10-01T08:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert!(data["id"].as_str().unwrap().starts_with("TEMP-"));
    assert_eq!(data["zone"], "frozen");
    assert_eq!(data["timestamp"], "2026-10-01T08:00:00Z");
    assert_eq!(data["status"], "critical-high");
    assert_eq!(data["alert"]["severity"], "critical");
    assert_eq!(
        data["alert"]["message"],
        "Temperature -13°C is 5.0° above target range"
    );
}

#[tokio::test]
async fn record_reading_for_unknown_zone_is_unknown_without_alert() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/temperature",
        json!({ "zone": "arctic", "temperature": -40.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["status"], "unknown");
    assert!(data["alert"].is_null());
    assert!(data["timestamp"].is_string());
}

#[tokio::test]
async fn record_reading_requires_zone_and_temperature() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/temperature",
        json!({ "zone": "frozen" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Zone and temperature are required");
}

#[tokio::test]
async fn record_reading_rejects_blank_zone() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/temperature",
        json!({ "zone": "  ", "temperature": 3.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
