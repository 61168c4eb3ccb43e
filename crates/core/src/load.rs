//! Inbound load schedule: load model, filtering, and new-load validation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::zones::ZoneRegistry;

/// Loads grouped by scheduled date.
pub type LoadSchedule = BTreeMap<NaiveDate, Vec<Load>>;

/// Lifecycle status of an inbound load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    Scheduled,
    Arriving,
    InProgress,
    Completed,
    Delayed,
}

impl LoadStatus {
    /// Arriving and in-progress loads occupy yard or dock capacity.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Arriving | Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A scheduled inbound delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: String,
    pub carrier: String,
    /// Zone id the load must be received into.
    pub temp_zone: String,
    pub status: LoadStatus,
    pub dock: Option<String>,
    /// Appointment time, `HH:MM`.
    pub scheduled_time: String,
    #[serde(default)]
    pub priority: LoadPriority,
    /// Case count.
    #[serde(default)]
    pub items: u32,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Date / status / zone filter over a [`LoadSchedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadFilter {
    /// Restrict to a single date. A date with no loads yields an empty list.
    pub date: Option<NaiveDate>,
    pub status: Option<LoadStatus>,
    /// Zone id, compared case-insensitively.
    pub zone: Option<String>,
}

impl LoadFilter {
    pub fn apply(&self, schedule: &LoadSchedule) -> LoadSchedule {
        let selected: LoadSchedule = match self.date {
            Some(date) => {
                let loads = schedule.get(&date).cloned().unwrap_or_default();
                BTreeMap::from([(date, loads)])
            }
            None => schedule.clone(),
        };

        selected
            .into_iter()
            .map(|(date, loads)| {
                let loads = loads.into_iter().filter(|l| self.matches(l)).collect();
                (date, loads)
            })
            .collect()
    }

    fn matches(&self, load: &Load) -> bool {
        if self.status.is_some_and(|s| load.status != s) {
            return false;
        }
        if let Some(zone) = &self.zone {
            if !load.temp_zone.eq_ignore_ascii_case(zone) {
                return false;
            }
        }
        true
    }
}

/// Loads currently arriving or being unloaded, across all dates.
pub fn active_loads(schedule: &LoadSchedule) -> Vec<&Load> {
    schedule
        .values()
        .flatten()
        .filter(|l| l.status.is_active())
        .collect()
}

/// Number of loads completed on `date`.
pub fn completed_on(schedule: &LoadSchedule, date: NaiveDate) -> usize {
    schedule
        .get(&date)
        .map(|loads| {
            loads
                .iter()
                .filter(|l| l.status == LoadStatus::Completed)
                .count()
        })
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Create / update requests
// ---------------------------------------------------------------------------

/// A load submitted for scheduling.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoad {
    pub carrier: String,
    pub temp_zone: String,
    pub date: NaiveDate,
    pub scheduled_time: String,
    pub dock: Option<String>,
    #[serde(default)]
    pub priority: LoadPriority,
    #[serde(default)]
    pub items: u32,
}

/// A freshly scheduled load together with bookkeeping fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledLoad {
    #[serde(flatten)]
    pub load: Load,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

impl NewLoad {
    /// Validate and turn into a `scheduled` load with a fresh `LD-` id.
    pub fn schedule(self, zones: &ZoneRegistry, now: Timestamp) -> Result<ScheduledLoad, CoreError> {
        if self.carrier.trim().is_empty() {
            return Err(CoreError::Validation("carrier is required".into()));
        }
        let zone = zones.lookup(&self.temp_zone).ok_or_else(|| {
            CoreError::Validation(format!("unknown temperature zone '{}'", self.temp_zone))
        })?;
        validate_time_of_day(&self.scheduled_time)?;

        Ok(ScheduledLoad {
            load: Load {
                id: format!("LD-{}", uuid::Uuid::now_v7()),
                carrier: self.carrier.trim().to_string(),
                temp_zone: zone.id.clone(),
                status: LoadStatus::Scheduled,
                dock: self.dock,
                scheduled_time: self.scheduled_time,
                priority: self.priority,
                items: self.items,
            },
            date: self.date,
            created_at: now,
        })
    }
}

/// Partial update of an existing load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<LoadPriority>,
}

impl LoadUpdate {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("Load ID is required".into()));
        }
        if let Some(time) = &self.scheduled_time {
            validate_time_of_day(time)?;
        }
        Ok(())
    }
}

/// Accept `HH:MM` in 24-hour time.
fn validate_time_of_day(value: &str) -> Result<(), CoreError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| {
            CoreError::Validation(format!("scheduled time must be HH:MM, got '{value}'"))
        })
}
