//! Snapshot source abstraction and fetch-with-fallback.
//!
//! A [`SnapshotSource`] produces a [`DashboardSnapshot`], either whole or as
//! independently loaded [`SnapshotParts`]. Sources that do I/O live in outer
//! crates (e.g. the S3 source in `dockside-cloud`); the deterministic
//! [`MockSource`](crate::mock::MockSource) lives here.

use std::fmt;

use async_trait::async_trait;

use crate::dock::Dock;
use crate::error::CoreError;
use crate::load::LoadSchedule;
use crate::sla::SlaMetric;
use crate::snapshot::{validate_temperatures, DashboardSnapshot, ZoneTemperature};
use crate::types::Timestamp;

/// Source name reported for the built-in mock generator.
pub const SOURCE_MOCK: &str = "mock";

/// Source name reported for the S3 object-storage source.
pub const SOURCE_S3: &str = "s3";

/// One independently loaded part of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Temperatures,
    Docks,
    Loads,
    Sla,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Temperatures,
        Section::Docks,
        Section::Loads,
        Section::Sla,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperatures => "temperatures",
            Self::Docks => "docks",
            Self::Loads => "loads",
            Self::Sla => "sla",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot whose sections succeeded or failed independently.
#[derive(Debug, Clone)]
pub struct SnapshotParts {
    pub generated_at: Timestamp,
    pub temperatures: Result<Vec<ZoneTemperature>, CoreError>,
    pub docks: Result<Vec<Dock>, CoreError>,
    pub loads: Result<LoadSchedule, CoreError>,
    pub sla: Result<Vec<SlaMetric>, CoreError>,
}

impl SnapshotParts {
    /// Every section present.
    pub fn complete(snapshot: DashboardSnapshot) -> Self {
        Self {
            generated_at: snapshot.generated_at,
            temperatures: Ok(snapshot.temperatures),
            docks: Ok(snapshot.docks),
            loads: Ok(snapshot.loads),
            sla: Ok(snapshot.sla),
        }
    }

    /// Every section failed with the same error.
    pub fn failed(now: Timestamp, error: CoreError) -> Self {
        Self {
            generated_at: now,
            temperatures: Err(error.clone()),
            docks: Err(error.clone()),
            loads: Err(error.clone()),
            sla: Err(error),
        }
    }

    /// Whole snapshot, or the first section error.
    pub fn into_snapshot(self) -> Result<DashboardSnapshot, CoreError> {
        Ok(DashboardSnapshot {
            generated_at: self.generated_at,
            temperatures: self.temperatures?,
            docks: self.docks?,
            loads: self.loads?,
            sla: self.sla?,
        })
    }

    fn any_failed(&self) -> bool {
        self.temperatures.is_err() || self.docks.is_err() || self.loads.is_err() || self.sla.is_err()
    }
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short identifier used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Produce a snapshot as of `now`.
    async fn fetch(&self, now: Timestamp) -> Result<DashboardSnapshot, CoreError>;

    /// Produce a snapshot as of `now`, section by section.
    ///
    /// Sources that load sections independently override this so one failed
    /// section does not discard the rest.
    async fn fetch_parts(&self, now: Timestamp) -> SnapshotParts {
        match self.fetch(now).await {
            Ok(snapshot) => SnapshotParts::complete(snapshot),
            Err(error) => SnapshotParts::failed(now, error),
        }
    }
}

/// A section replaced by its fallback.
#[derive(Debug, Clone)]
pub struct SectionFailure {
    pub section: Section,
    pub error: CoreError,
}

/// Result of [`fetch_with_fallback`].
#[derive(Debug)]
pub struct Fetched {
    pub snapshot: DashboardSnapshot,
    /// Sections taken from the fallback, in [`Section::ALL`] order.
    pub failures: Vec<SectionFailure>,
}

impl Fetched {
    pub fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot
    }

    /// At least one section came from the fallback.
    pub fn is_fallback(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Every section came from the fallback.
    pub fn is_complete_fallback(&self) -> bool {
        self.failures.len() == Section::ALL.len()
    }
}

/// Fetch from `source`, substituting the matching section of `fallback()`
/// for every section that fails or does not validate. `fallback` is only
/// called when some section failed. The caller decides how to report the
/// failures.
pub async fn fetch_with_fallback<F>(
    source: &dyn SnapshotSource,
    fallback: F,
    now: Timestamp,
) -> Fetched
where
    F: FnOnce() -> DashboardSnapshot,
{
    let mut parts = source.fetch_parts(now).await;
    parts.temperatures = parts
        .temperatures
        .and_then(|temperatures| validate_temperatures(&temperatures).map(|()| temperatures));

    let mut spare = parts.any_failed().then(fallback);
    let mut failures = Vec::new();

    let temperatures = recover(parts.temperatures, Section::Temperatures, &mut failures, || {
        take_section(&mut spare, |s| &mut s.temperatures)
    });
    let docks = recover(parts.docks, Section::Docks, &mut failures, || {
        take_section(&mut spare, |s| &mut s.docks)
    });
    let loads = recover(parts.loads, Section::Loads, &mut failures, || {
        take_section(&mut spare, |s| &mut s.loads)
    });
    let sla = recover(parts.sla, Section::Sla, &mut failures, || {
        take_section(&mut spare, |s| &mut s.sla)
    });

    let generated_at = match &spare {
        Some(spare) if failures.len() == Section::ALL.len() => spare.generated_at,
        _ => parts.generated_at,
    };

    Fetched {
        snapshot: DashboardSnapshot {
            generated_at,
            temperatures,
            docks,
            loads,
            sla,
        },
        failures,
    }
}

fn recover<T>(
    result: Result<T, CoreError>,
    section: Section,
    failures: &mut Vec<SectionFailure>,
    substitute: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            failures.push(SectionFailure { section, error });
            substitute()
        }
    }
}

fn take_section<T: Default>(
    spare: &mut Option<DashboardSnapshot>,
    field: impl FnOnce(&mut DashboardSnapshot) -> &mut T,
) -> T {
    spare.as_mut().map(|s| std::mem::take(field(s))).unwrap_or_default()
}
