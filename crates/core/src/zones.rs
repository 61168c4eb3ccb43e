//! Temperature zone registry.
//!
//! A [`ZoneRegistry`] is built once at start-up (usually from
//! [`ZoneRegistry::warehouse_default`]) and handed to every consumer by
//! reference. Lookups are case-insensitive on the zone id and return `None`
//! for unknown zones; callers classify those as
//! [`StatusTier::Unknown`](crate::temperature::StatusTier::Unknown).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Frozen storage zone id.
pub const ZONE_FROZEN: &str = "frozen";

/// Fresh produce zone id.
pub const ZONE_FRESH: &str = "fresh";

/// Dairy and deli zone id.
pub const ZONE_DAIRY: &str = "dairy";

/// Ambient dry goods zone id.
pub const ZONE_DRY: &str = "dry";

// ---------------------------------------------------------------------------
// ZoneConfig
// ---------------------------------------------------------------------------

/// Static configuration for one temperature-controlled zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Canonical lower-case zone id, e.g. `"frozen"`.
    pub id: String,
    /// Display name, e.g. `"Dairy/Deli"`.
    pub name: String,
    /// Target temperature in degrees Celsius.
    pub target_temp: f64,
    /// Allowed deviation from the target in degrees Celsius. Always `> 0`.
    pub tolerance: f64,
    /// SLA compliance target as a percentage (0-100).
    pub sla_target: f64,
    /// Docks that receive loads for this zone.
    #[serde(default)]
    pub docks: Vec<String>,
}

impl ZoneConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_temp: f64,
        tolerance: f64,
        sla_target: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_temp,
            tolerance,
            sla_target,
            docks: Vec::new(),
        }
    }

    pub fn with_docks<I, S>(mut self, docks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.docks = docks.into_iter().map(Into::into).collect();
        self
    }

    /// Lowest temperature still inside the tolerance band.
    pub fn min_temp(&self) -> f64 {
        self.target_temp - self.tolerance
    }

    /// Highest temperature still inside the tolerance band.
    pub fn max_temp(&self) -> f64 {
        self.target_temp + self.tolerance
    }

    /// Check the invariants every registered zone must satisfy.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("zone id must not be empty".into()));
        }
        if !self.target_temp.is_finite() {
            return Err(CoreError::Validation(format!(
                "zone '{}' target temperature must be a finite number",
                self.id
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CoreError::Validation(format!(
                "zone '{}' tolerance must be greater than 0, got {}",
                self.id, self.tolerance
            )));
        }
        if !(0.0..=100.0).contains(&self.sla_target) {
            return Err(CoreError::Validation(format!(
                "zone '{}' SLA target must be between 0 and 100, got {}",
                self.id, self.sla_target
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ZoneRegistry
// ---------------------------------------------------------------------------

/// Immutable, ordered set of known zones.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<ZoneConfig>,
}

impl ZoneRegistry {
    /// Build a registry, rejecting invalid or duplicate zones.
    ///
    /// Zone ids are compared case-insensitively, so `"Frozen"` and `"frozen"`
    /// count as duplicates.
    pub fn new(zones: Vec<ZoneConfig>) -> Result<Self, CoreError> {
        for (i, zone) in zones.iter().enumerate() {
            zone.validate()?;
            if zones[..i]
                .iter()
                .any(|other| other.id.eq_ignore_ascii_case(&zone.id))
            {
                return Err(CoreError::Validation(format!(
                    "duplicate zone id '{}'",
                    zone.id
                )));
            }
        }
        Ok(Self { zones })
    }

    /// The four zones of the inbound warehouse.
    pub fn warehouse_default() -> Self {
        Self {
            zones: vec![
                ZoneConfig::new(ZONE_FROZEN, "Frozen", -18.0, 2.0, 95.0)
                    .with_docks(["Dock 1", "Dock 2", "Dock 3"]),
                ZoneConfig::new(ZONE_FRESH, "Fresh/Produce", 2.0, 1.5, 92.0)
                    .with_docks(["Dock 4", "Dock 5", "Dock 6"]),
                ZoneConfig::new(ZONE_DAIRY, "Dairy/Deli", 4.0, 2.0, 94.0)
                    .with_docks(["Dock 7", "Dock 8"]),
                ZoneConfig::new(ZONE_DRY, "Dry Goods", 21.0, 3.0, 90.0)
                    .with_docks(["Dock 9", "Dock 10", "Dock 11", "Dock 12"]),
            ],
        }
    }

    /// Look up a zone by id, ignoring ASCII case.
    pub fn lookup(&self, zone_id: &str) -> Option<&ZoneConfig> {
        let key = zone_id.trim();
        self.zones.iter().find(|z| z.id.eq_ignore_ascii_case(key))
    }

    /// Like [`lookup`](Self::lookup) but fails with `NotFound`.
    pub fn require(&self, zone_id: &str) -> Result<&ZoneConfig, CoreError> {
        self.lookup(zone_id).ok_or_else(|| CoreError::NotFound {
            entity: "Zone",
            id: zone_id.to_string(),
        })
    }

    pub fn contains(&self, zone_id: &str) -> bool {
        self.lookup(zone_id).is_some()
    }

    /// Zones in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneConfig> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::warehouse_default()
    }
}
