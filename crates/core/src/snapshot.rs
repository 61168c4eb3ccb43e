//! The dashboard data set served between refreshes, and metrics derived
//! from it.

use serde::{Deserialize, Serialize};

use crate::alert::{scan_all, TemperatureAlert};
use crate::dock::{summarize, Dock};
use crate::error::CoreError;
use crate::load::{active_loads, completed_on, LoadSchedule};
use crate::sla::{compliance, SlaMetric};
use crate::temperature::Reading;
use crate::types::Timestamp;
use crate::zones::ZoneRegistry;

/// Latest temperature and recent history for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTemperature {
    pub zone: String,
    pub current_temp: f64,
    /// Chronological readings, oldest first.
    #[serde(default)]
    pub history: Vec<Reading>,
}

impl ZoneTemperature {
    /// The zone's most recent reading.
    ///
    /// Falls back to `current_temp` stamped with `as_of` when there is no
    /// history.
    pub fn current_reading(&self, as_of: Timestamp) -> Reading {
        self.history.last().cloned().unwrap_or_else(|| Reading {
            zone: self.zone.clone(),
            temperature: self.current_temp,
            timestamp: as_of,
        })
    }

    /// Copy with history trimmed to the last `entries` readings.
    pub fn with_recent_history(&self, entries: usize) -> Self {
        let start = self.history.len().saturating_sub(entries);
        Self {
            zone: self.zone.clone(),
            current_temp: self.current_temp,
            history: self.history[start..].to_vec(),
        }
    }
}

/// Everything the dashboard shows, as supplied by a snapshot source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: Timestamp,
    #[serde(default)]
    pub temperatures: Vec<ZoneTemperature>,
    #[serde(default)]
    pub docks: Vec<Dock>,
    #[serde(default)]
    pub loads: LoadSchedule,
    #[serde(default)]
    pub sla: Vec<SlaMetric>,
}

/// Headline numbers for the dashboard banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub active_loads: usize,
    pub completed_today: usize,
    pub sla_compliance: f64,
    pub dock_utilization: f64,
    pub temperature_alerts: usize,
}

/// Reject zone temperature entries without a zone id, with a non-finite
/// current temperature, or with malformed history readings.
pub fn validate_temperatures(temperatures: &[ZoneTemperature]) -> Result<(), CoreError> {
    for zone in temperatures {
        if zone.zone.trim().is_empty() {
            return Err(CoreError::Validation("zone temperature entry without zone id".into()));
        }
        if !zone.current_temp.is_finite() {
            return Err(CoreError::Validation(format!(
                "current temperature for zone '{}' must be a finite number",
                zone.zone
            )));
        }
        for reading in &zone.history {
            reading.validate()?;
        }
    }
    Ok(())
}

impl DashboardSnapshot {
    /// Reject snapshots carrying malformed readings.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_temperatures(&self.temperatures)
    }

    /// Temperature entry for a zone, ignoring ASCII case.
    pub fn zone(&self, zone_id: &str) -> Option<&ZoneTemperature> {
        self.temperatures
            .iter()
            .find(|t| t.zone.eq_ignore_ascii_case(zone_id))
    }

    /// Current reading per zone, in snapshot order.
    pub fn current_readings(&self) -> Vec<Reading> {
        self.temperatures
            .iter()
            .map(|t| t.current_reading(self.generated_at))
            .collect()
    }

    /// Temperature alerts for the current readings, generated at `now`.
    pub fn alerts(&self, zones: &ZoneRegistry, now: Timestamp) -> Vec<TemperatureAlert> {
        scan_all(zones, &self.current_readings(), now)
    }

    pub fn metrics(&self, zones: &ZoneRegistry, now: Timestamp) -> DashboardMetrics {
        DashboardMetrics {
            active_loads: active_loads(&self.loads).len(),
            completed_today: completed_on(&self.loads, now.date_naive()),
            sla_compliance: compliance(&self.sla),
            dock_utilization: summarize(&self.docks).utilization,
            temperature_alerts: self.alerts(zones, now).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn zone_temp(zone: &str, temps: &[f64]) -> ZoneTemperature {
        let history = temps
            .iter()
            .enumerate()
            .map(|(i, t)| Reading {
                zone: zone.into(),
                temperature: *t,
                timestamp: now() - Duration::hours((temps.len() - i) as i64),
            })
            .collect();
        ZoneTemperature {
            zone: zone.into(),
            current_temp: temps.last().copied().unwrap_or(0.0),
            history,
        }
    }

    fn snapshot(temperatures: Vec<ZoneTemperature>) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: now(),
            temperatures,
            docks: Vec::new(),
            loads: LoadSchedule::new(),
            sla: Vec::new(),
        }
    }

    #[test]
    fn current_reading_prefers_history() {
        let zt = zone_temp("frozen", &[-18.0, -19.5]);
        assert_eq!(zt.current_reading(now()).temperature, -19.5);
    }

    #[test]
    fn current_reading_falls_back_to_current_temp() {
        let zt = ZoneTemperature {
            zone: "dry".into(),
            current_temp: 22.0,
            history: Vec::new(),
        };
        let reading = zt.current_reading(now());
        assert_eq!(reading.temperature, 22.0);
        assert_eq!(reading.timestamp, now());
    }

    #[test]
    fn recent_history_keeps_tail() {
        let zt = zone_temp("dairy", &[1.0, 2.0, 3.0, 4.0]);
        let trimmed = zt.with_recent_history(2);
        let temps: Vec<f64> = trimmed.history.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![3.0, 4.0]);
    }

    #[test]
    fn alerts_follow_snapshot_order() {
        let zones = ZoneRegistry::warehouse_default();
        let snap = snapshot(vec![
            zone_temp("dry", &[21.0, 28.0]),
            zone_temp("frozen", &[-18.0]),
            zone_temp("fresh", &[2.0, 4.0]),
        ]);
        let alerts = snap.alerts(&zones, now());
        let ids: Vec<_> = alerts.iter().map(|a| a.zone.as_str()).collect();
        assert_eq!(ids, vec!["dry", "fresh"]);
        assert_eq!(snap.metrics(&zones, now()).temperature_alerts, 2);
    }

    #[test]
    fn validate_rejects_non_finite_history() {
        let mut zt = zone_temp("frozen", &[-18.0]);
        zt.history[0].temperature = f64::NAN;
        assert!(snapshot(vec![zt]).validate().is_err());
    }

    #[test]
    fn zone_lookup_is_case_insensitive() {
        let snap = snapshot(vec![zone_temp("frozen", &[-18.0])]);
        assert!(snap.zone("Frozen").is_some());
        assert!(snap.zone("dry").is_none());
    }
}
