//! Temperature alert generation (pure, no I/O).
//!
//! Alerts are ephemeral: they are derived from the current readings every
//! time they are requested and carry the instant they were generated, not
//! the instant the reading was taken.

use serde::{Deserialize, Serialize};

use crate::temperature::{classify, format_temperature, variance, Direction, Reading, StatusTier};
use crate::types::Timestamp;
use crate::zones::{ZoneConfig, ZoneRegistry};

/// Default cap on the number of alerts returned by [`AlertFilter::apply`].
pub const DEFAULT_ALERT_LIMIT: usize = 50;

/// Alert type discriminator for temperature excursions.
pub const ALERT_TYPE_TEMPERATURE: &str = "temperature";

/// Severity of a temperature alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// The reading is in a warning band.
    High,
    /// The reading is in a critical band.
    Critical,
}

/// A temperature excursion for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureAlert {
    /// `temp-{zone}-{generation unix millis}`.
    pub id: String,
    /// Always [`ALERT_TYPE_TEMPERATURE`].
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub status: StatusTier,
    pub title: String,
    pub message: String,
    /// Canonical zone id.
    pub zone: String,
    pub zone_name: String,
    pub current_temp: f64,
    pub target_temp: f64,
    /// Absolute distance from target, unrounded.
    pub variance: f64,
    /// When the alert was generated.
    pub timestamp: Timestamp,
}

/// Build an alert for a reading, or `None` when it is in range.
///
/// Readings for unconfigured zones (`zone == None`) never alert.
pub fn generate_alert(
    reading: &Reading,
    zone: Option<&ZoneConfig>,
    now: Timestamp,
) -> Option<TemperatureAlert> {
    let zone = zone?;
    let tier = classify(reading, Some(zone));
    let direction = tier.direction()?;

    let severity = if tier.is_critical() {
        AlertSeverity::Critical
    } else {
        AlertSeverity::High
    };
    let (label, relation) = match direction {
        Direction::High => ("High", "above"),
        Direction::Low => ("Low", "below"),
    };
    let variance = variance(reading, zone);

    Some(TemperatureAlert {
        id: format!("temp-{}-{}", zone.id, now.timestamp_millis()),
        alert_type: ALERT_TYPE_TEMPERATURE.to_string(),
        severity,
        status: tier,
        title: format!("Temperature {label} - {}", zone.name),
        message: format!(
            "Temperature {} is {variance:.1}° {relation} target range",
            format_temperature(reading.temperature)
        ),
        zone: zone.id.clone(),
        zone_name: zone.name.clone(),
        current_temp: reading.temperature,
        target_temp: zone.target_temp,
        variance,
        timestamp: now,
    })
}

/// Generate alerts for the current reading of each zone.
///
/// Output follows the order of `current_readings`; zones missing from the
/// registry are skipped.
pub fn scan_all<'a, I>(
    registry: &ZoneRegistry,
    current_readings: I,
    now: Timestamp,
) -> Vec<TemperatureAlert>
where
    I: IntoIterator<Item = &'a Reading>,
{
    current_readings
        .into_iter()
        .filter_map(|reading| generate_alert(reading, registry.lookup(&reading.zone), now))
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Severity / type / limit filter over an alert list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Option<AlertSeverity>,
    pub alert_type: Option<String>,
    pub limit: usize,
}

impl Default for AlertFilter {
    fn default() -> Self {
        Self {
            severity: None,
            alert_type: None,
            limit: DEFAULT_ALERT_LIMIT,
        }
    }
}

impl AlertFilter {
    /// Keep matching alerts in their original order, then truncate to `limit`.
    pub fn apply(&self, alerts: Vec<TemperatureAlert>) -> Vec<TemperatureAlert> {
        alerts
            .into_iter()
            .filter(|a| self.severity.map_or(true, |s| a.severity == s))
            .filter(|a| {
                self.alert_type
                    .as_deref()
                    .map_or(true, |t| a.alert_type == t)
            })
            .take(self.limit)
            .collect()
    }
}
