//! Temperature readings and the zone status classifier.
//!
//! Pure logic. A reading is compared against its zone's target and
//! tolerance `t` and placed in one of five bands:
//!
//! ```text
//!   critical-low | warning-low |     normal     | warning-high | critical-high
//!             T-2t          T-t       T        T+t           T+2t
//! ```
//!
//! Boundary values belong to the less severe band: a reading of exactly
//! `T+t` is `normal` and exactly `T+2t` is `warning-high`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{round1, Timestamp};
use crate::zones::ZoneConfig;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A single temperature sample for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Zone id the sample was taken in.
    pub zone: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// When the sample was taken.
    #[serde(alias = "time")]
    pub timestamp: Timestamp,
}

impl Reading {
    /// Build a validated reading.
    ///
    /// Fails on an empty zone id or a non-finite temperature instead of
    /// letting the classifier produce a misleading tier.
    pub fn new(
        zone: impl Into<String>,
        temperature: f64,
        timestamp: Timestamp,
    ) -> Result<Self, CoreError> {
        let reading = Self {
            zone: zone.into(),
            temperature,
            timestamp,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Check a reading that arrived without going through [`Reading::new`]
    /// (e.g. deserialized from a data source).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.zone.trim().is_empty() {
            return Err(CoreError::Validation("reading zone id is required".into()));
        }
        if !self.temperature.is_finite() {
            return Err(CoreError::Validation(format!(
                "reading temperature for zone '{}' must be a finite number",
                self.zone
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// StatusTier
// ---------------------------------------------------------------------------

/// Which side of the target a deviation lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Low,
    High,
}

/// Classification of a reading relative to its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTier {
    Normal,
    WarningLow,
    WarningHigh,
    CriticalLow,
    CriticalHigh,
    /// The zone is not configured.
    Unknown,
}

impl StatusTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::WarningLow => "warning-low",
            Self::WarningHigh => "warning-high",
            Self::CriticalLow => "critical-low",
            Self::CriticalHigh => "critical-high",
            Self::Unknown => "unknown",
        }
    }

    /// `true` for the four out-of-range tiers.
    pub fn is_alerting(self) -> bool {
        !matches!(self, Self::Normal | Self::Unknown)
    }

    pub fn is_critical(self) -> bool {
        matches!(self, Self::CriticalLow | Self::CriticalHigh)
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::WarningLow | Self::CriticalLow => Some(Direction::Low),
            Self::WarningHigh | Self::CriticalHigh => Some(Direction::High),
            Self::Normal | Self::Unknown => None,
        }
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a reading against its zone configuration.
///
/// `zone` is `None` when the registry has no entry for the reading's zone.
pub fn classify(reading: &Reading, zone: Option<&ZoneConfig>) -> StatusTier {
    match zone {
        Some(zone) => classify_value(reading.temperature, zone),
        None => StatusTier::Unknown,
    }
}

/// Classify a bare temperature against a zone.
///
/// A non-finite temperature yields `Unknown` rather than a band.
pub fn classify_value(temperature: f64, zone: &ZoneConfig) -> StatusTier {
    if !temperature.is_finite() {
        return StatusTier::Unknown;
    }

    let d = temperature - zone.target_temp;
    let t = zone.tolerance;

    if d < -2.0 * t {
        StatusTier::CriticalLow
    } else if d < -t {
        StatusTier::WarningLow
    } else if d > 2.0 * t {
        StatusTier::CriticalHigh
    } else if d > t {
        StatusTier::WarningHigh
    } else {
        StatusTier::Normal
    }
}

/// Absolute distance from the zone target, unrounded.
pub fn variance(reading: &Reading, zone: &ZoneConfig) -> f64 {
    (reading.temperature - zone.target_temp).abs()
}

/// [`variance`] rounded to one decimal for display.
pub fn display_variance(reading: &Reading, zone: &ZoneConfig) -> f64 {
    round1(variance(reading, zone))
}

/// Whether a temperature sits inside `[target - tolerance, target + tolerance]`.
pub fn is_in_range(temperature: f64, zone: &ZoneConfig) -> bool {
    (zone.min_temp()..=zone.max_temp()).contains(&temperature)
}

/// Format a temperature as e.g. `"-18.5°C"`.
pub fn format_temperature(temperature: f64) -> String {
    format!("{}°C", round1(temperature))
}
