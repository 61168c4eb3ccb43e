//! Deterministic mock data for demos, tests, and as the refresh fallback.
//!
//! Output depends only on the seed, the zone registry and `now`, so two
//! calls with the same inputs produce identical snapshots.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dock::{Dock, DockStatus};
use crate::error::CoreError;
use crate::load::{Load, LoadPriority, LoadSchedule, LoadStatus};
use crate::sla::SlaMetric;
use crate::snapshot::{DashboardSnapshot, ZoneTemperature};
use crate::source::{SnapshotSource, SOURCE_MOCK};
use crate::temperature::Reading;
use crate::types::{round1, Timestamp};
use crate::zones::{ZoneRegistry, ZONE_FRESH};

/// Hourly readings generated per zone.
pub const MOCK_HISTORY_HOURS: i64 = 24;

const DEFAULT_SEED: u64 = 0x0D0C_51DE;

/// (dock number, status, progress, eta)
const DOCK_BOARD: &[(u32, DockStatus, u8, Option<&str>)] = &[
    (1, DockStatus::Occupied, 75, Some("14:30")),
    (2, DockStatus::Available, 0, None),
    (3, DockStatus::Occupied, 45, Some("15:15")),
    (4, DockStatus::Occupied, 90, Some("14:15")),
    (5, DockStatus::Available, 0, None),
    (6, DockStatus::Maintenance, 0, None),
    (7, DockStatus::Occupied, 60, Some("14:45")),
    (8, DockStatus::Available, 0, None),
    (9, DockStatus::Occupied, 30, Some("16:00")),
    (10, DockStatus::Available, 0, None),
    (11, DockStatus::OutOfOrder, 0, None),
    (12, DockStatus::Available, 0, None),
];

/// (carrier, zone, scheduled time, status, priority, items)
const TODAY_LOADS: &[(&str, &str, &str, LoadStatus, LoadPriority, u32)] = &[
    ("FedEx Freight", "frozen", "06:30", LoadStatus::Completed, LoadPriority::High, 245),
    ("Sysco", "fresh", "07:15", LoadStatus::Completed, LoadPriority::High, 180),
    ("UPS Freight", "dry", "08:00", LoadStatus::Completed, LoadPriority::Low, 410),
    ("XPO Logistics", "frozen", "09:30", LoadStatus::InProgress, LoadPriority::High, 220),
    ("US Foods", "fresh", "10:00", LoadStatus::InProgress, LoadPriority::Medium, 150),
    ("Old Dominion", "dairy", "10:45", LoadStatus::InProgress, LoadPriority::Medium, 95),
    ("Estes Express", "frozen", "11:30", LoadStatus::Arriving, LoadPriority::Medium, 260),
    ("Sysco", "dry", "12:15", LoadStatus::Delayed, LoadPriority::Low, 330),
    ("US Foods", "dairy", "14:00", LoadStatus::Scheduled, LoadPriority::Medium, 120),
    ("FedEx Freight", "dry", "15:30", LoadStatus::Scheduled, LoadPriority::Low, 500),
];

const TOMORROW_LOADS: &[(&str, &str, &str, LoadStatus, LoadPriority, u32)] = &[
    ("Sysco", "fresh", "06:00", LoadStatus::Scheduled, LoadPriority::High, 175),
    ("XPO Logistics", "frozen", "08:30", LoadStatus::Scheduled, LoadPriority::High, 240),
    ("Old Dominion", "dairy", "11:00", LoadStatus::Scheduled, LoadPriority::Medium, 110),
    ("UPS Freight", "dry", "13:30", LoadStatus::Scheduled, LoadPriority::Low, 390),
];

/// Generates a plausible warehouse snapshot.
///
/// Every zone hovers around its target except fresh produce, whose latest
/// reading drifts into the warning-high band so the dashboard has an alert
/// to show.
#[derive(Debug, Clone)]
pub struct MockSource {
    zones: ZoneRegistry,
    seed: u64,
}

impl MockSource {
    pub fn new(zones: ZoneRegistry) -> Self {
        Self::with_seed(zones, DEFAULT_SEED)
    }

    pub fn with_seed(zones: ZoneRegistry, seed: u64) -> Self {
        Self { zones, seed }
    }

    pub fn generate(&self, now: Timestamp) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: now,
            temperatures: self.temperatures(now),
            docks: self.docks(),
            loads: self.loads(now),
            sla: vec![
                SlaMetric::new("On-Time Delivery", 95.0, 94.5),
                SlaMetric::new("Processing Speed", 85.0, 87.2),
                SlaMetric::new("Accuracy Rate", 99.0, 99.1),
            ],
        }
    }

    fn temperatures(&self, now: Timestamp) -> Vec<ZoneTemperature> {
        // Seed per wall-clock hour so a refresh within the hour is stable.
        let mut rng = StdRng::seed_from_u64(self.seed ^ now.timestamp().div_euclid(3600) as u64);
        let hour_start = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        self.zones
            .iter()
            .map(|zone| {
                let mut history: Vec<Reading> = (0..MOCK_HISTORY_HOURS)
                    .map(|i| {
                        let offset = rng.random_range(-0.6..=0.6) * zone.tolerance;
                        Reading {
                            zone: zone.id.clone(),
                            temperature: round1(zone.target_temp + offset),
                            timestamp: hour_start - Duration::hours(MOCK_HISTORY_HOURS - 1 - i),
                        }
                    })
                    .collect();

                if zone.id == ZONE_FRESH {
                    if let Some(last) = history.last_mut() {
                        last.temperature = round1(zone.target_temp + 1.6 * zone.tolerance);
                    }
                }

                ZoneTemperature {
                    zone: zone.id.clone(),
                    current_temp: history.last().map_or(zone.target_temp, |r| r.temperature),
                    history,
                }
            })
            .collect()
    }

    fn docks(&self) -> Vec<Dock> {
        let mut load_no = 0;
        DOCK_BOARD
            .iter()
            .map(|&(n, status, progress, eta)| {
                let name = format!("Dock {n}");
                let zone = self
                    .zones
                    .iter()
                    .find(|z| z.docks.contains(&name))
                    .map_or_else(String::new, |z| z.id.clone());
                let current_load = (status == DockStatus::Occupied).then(|| {
                    load_no += 1;
                    format!("LD-{load_no:04}")
                });
                Dock {
                    id: format!("dock-{n}"),
                    name,
                    zone,
                    status,
                    current_load,
                    progress,
                    eta: eta.map(str::to_string),
                }
            })
            .collect()
    }

    fn loads(&self, now: Timestamp) -> LoadSchedule {
        let today = now.date_naive();
        let tomorrow = today + Duration::days(1);
        let mut next_id = 0u32;
        let mut build = |rows: &[(&str, &str, &str, LoadStatus, LoadPriority, u32)]| {
            rows.iter()
                .map(|&(carrier, zone, time, status, priority, items)| {
                    next_id += 1;
                    Load {
                        id: format!("LD-{}-{next_id:03}", today.format("%Y%m%d")),
                        carrier: carrier.to_string(),
                        temp_zone: zone.to_string(),
                        status,
                        dock: None,
                        scheduled_time: time.to_string(),
                        priority,
                        items,
                    }
                })
                .collect::<Vec<_>>()
        };
        BTreeMap::from([(today, build(TODAY_LOADS)), (tomorrow, build(TOMORROW_LOADS))])
    }
}

#[async_trait]
impl SnapshotSource for MockSource {
    fn name(&self) -> &'static str {
        SOURCE_MOCK
    }

    async fn fetch(&self, now: Timestamp) -> Result<DashboardSnapshot, CoreError> {
        Ok(self.generate(now))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::temperature::{classify, StatusTier};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 8, 20, 13, 25, 0).unwrap()
    }

    #[test]
    fn same_inputs_same_snapshot() {
        let source = MockSource::new(ZoneRegistry::warehouse_default());
        assert_eq!(source.generate(now()), source.generate(now()));
    }

    #[test]
    fn generates_hourly_history_for_every_zone() {
        let zones = ZoneRegistry::warehouse_default();
        let snapshot = MockSource::new(zones.clone()).generate(now());
        assert_eq!(snapshot.temperatures.len(), zones.len());
        for zt in &snapshot.temperatures {
            assert_eq!(zt.history.len(), MOCK_HISTORY_HOURS as usize);
            assert!(zt.history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
            assert!(zt.history.last().unwrap().timestamp <= now());
        }
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn only_fresh_zone_is_out_of_range() {
        let zones = ZoneRegistry::warehouse_default();
        let snapshot = MockSource::new(zones.clone()).generate(now());
        for reading in snapshot.current_readings() {
            let tier = classify(&reading, zones.lookup(&reading.zone));
            if reading.zone == ZONE_FRESH {
                assert_eq!(tier, StatusTier::WarningHigh);
            } else {
                assert_eq!(tier, StatusTier::Normal);
            }
        }
    }

    #[test]
    fn docks_are_assigned_to_zones() {
        let snapshot = MockSource::new(ZoneRegistry::warehouse_default()).generate(now());
        assert_eq!(snapshot.docks.len(), 12);
        assert!(snapshot.docks.iter().all(|d| !d.zone.is_empty()));
        assert_eq!(snapshot.docks[0].zone, "frozen");
        assert_eq!(snapshot.docks[11].zone, "dry");
    }

    #[test]
    fn loads_cover_today_and_tomorrow() {
        let snapshot = MockSource::new(ZoneRegistry::warehouse_default()).generate(now());
        let today = now().date_naive();
        assert_eq!(snapshot.loads.len(), 2);
        assert_eq!(snapshot.loads[&today].len(), TODAY_LOADS.len());
    }
}
