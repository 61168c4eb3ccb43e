//! Handlers for temperature monitoring endpoints.
//!
//! Readings come from the snapshot currently being served; recorded readings
//! are classified and echoed back but not stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use dockside_core::aggregation::{history_within_window, mean_temperature};
use dockside_core::alert::{generate_alert, TemperatureAlert};
use dockside_core::error::CoreError;
use dockside_core::snapshot::ZoneTemperature;
use dockside_core::temperature::{classify, display_variance, is_in_range, Reading, StatusTier};
use dockside_core::trend::{trend, Trend};
use dockside_core::types::Timestamp;
use dockside_core::zones::ZoneConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum number of hourly history entries returned per zone.
const DEFAULT_HISTORY_HOURS: usize = 24;
const MAX_HISTORY_HOURS: usize = 168;

/// Window for the rolling average on the status endpoint.
const AVERAGE_WINDOW_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the temperature list endpoint.
#[derive(Debug, Deserialize)]
pub struct TemperatureQuery {
    /// Restrict to one zone id.
    pub zone: Option<String>,
    /// How many hourly history entries to return (default: 24).
    pub hours: Option<usize>,
}

/// A zone's temperatures together with the tier of its current reading.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTemperatureView {
    #[serde(flatten)]
    pub temperature: ZoneTemperature,
    pub status: StatusTier,
}

/// Full status for one zone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStatus {
    pub zone: ZoneConfig,
    pub current: Reading,
    pub status: StatusTier,
    /// Absolute distance from target, one decimal.
    pub variance: f64,
    pub in_range: bool,
    pub trend: Trend,
    /// Mean over the last 24 hours of history, `null` when there is none.
    pub average_24h: Option<f64>,
    pub alert: Option<TemperatureAlert>,
}

/// Request body for recording a reading.
///
/// Fields are optional so a missing value yields a JSON error body rather
/// than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RecordReadingRequest {
    pub zone: Option<String>,
    pub temperature: Option<f64>,
    /// Defaults to the time of the request.
    pub timestamp: Option<Timestamp>,
}

/// Echo of a recorded reading.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedReading {
    pub id: String,
    #[serde(flatten)]
    pub reading: Reading,
    pub status: StatusTier,
    pub alert: Option<TemperatureAlert>,
    pub recorded_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /temperature
///
/// Current temperature, tier and recent hourly history for every zone in
/// the snapshot, or just `zone` when given.
pub async fn list_temperatures(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TemperatureQuery>,
) -> AppResult<Json<DataResponse<Vec<ZoneTemperatureView>>>> {
    let hours = query.hours.unwrap_or(DEFAULT_HISTORY_HOURS);
    if !(1..=MAX_HISTORY_HOURS).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "hours must be between 1 and {MAX_HISTORY_HOURS}"
        )));
    }

    let zone_filter = match query.zone.as_deref() {
        Some(zone) => Some(state.zones.require(zone)?.id.clone()),
        None => None,
    };

    let snapshot = state.store.snapshot().await;
    let views = snapshot
        .temperatures
        .iter()
        .filter(|t| {
            zone_filter
                .as_deref()
                .map_or(true, |z| t.zone.eq_ignore_ascii_case(z))
        })
        .map(|t| {
            let current = t.current_reading(snapshot.generated_at);
            ZoneTemperatureView {
                status: classify(&current, state.zones.lookup(&t.zone)),
                temperature: t.with_recent_history(hours),
            }
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /temperature/{zone}/status
///
/// Tier, variance, trend, 24-hour average and alert for one zone.
pub async fn zone_status(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
) -> AppResult<Json<DataResponse<ZoneStatus>>> {
    let zone = state.zones.require(&zone_id)?;
    let snapshot = state.store.snapshot().await;
    let temperature = snapshot.zone(&zone.id).ok_or_else(|| CoreError::NotFound {
        entity: "Zone temperature",
        id: zone.id.clone(),
    })?;

    let current = temperature.current_reading(snapshot.generated_at);
    let window = history_within_window(
        &temperature.history,
        AVERAGE_WINDOW_HOURS,
        snapshot.generated_at,
    );

    let status = ZoneStatus {
        status: classify(&current, Some(zone)),
        variance: display_variance(&current, zone),
        in_range: is_in_range(current.temperature, zone),
        trend: trend(&temperature.history),
        average_24h: mean_temperature(&window),
        alert: generate_alert(&current, Some(zone), Utc::now()),
        zone: zone.clone(),
        current,
    };

    Ok(Json(DataResponse { data: status }))
}

/// POST /temperature
///
/// Validate and classify a reading, returning the record with any alert it
/// raises. Readings for zones outside the registry are accepted with status
/// `unknown`.
pub async fn record_reading(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RecordReadingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecordedReading>>)> {
    let (Some(zone), Some(temperature)) = (input.zone, input.temperature) else {
        return Err(AppError::BadRequest(
            "Zone and temperature are required".to_string(),
        ));
    };

    let now = Utc::now();
    let reading = Reading::new(zone, temperature, input.timestamp.unwrap_or(now))?;
    let zone = state.zones.lookup(&reading.zone);
    let status = classify(&reading, zone);
    let alert = generate_alert(&reading, zone, now);

    tracing::info!(
        zone = %reading.zone,
        temperature = reading.temperature,
        status = %status,
        "Temperature reading recorded"
    );

    let record = RecordedReading {
        id: format!("TEMP-{}", uuid::Uuid::now_v7()),
        reading,
        status,
        alert,
        recorded_at: now,
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
