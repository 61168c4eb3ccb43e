//! Receiving dock board: dock status model and summary.

use serde::{Deserialize, Serialize};

use crate::types::round1;

/// Operational status of a receiving dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DockStatus {
    Available,
    Occupied,
    Maintenance,
    #[serde(alias = "out_of_order")]
    OutOfOrder,
}

impl DockStatus {
    /// Docks under maintenance or out of order cannot receive loads.
    pub fn in_service(self) -> bool {
        matches!(self, Self::Available | Self::Occupied)
    }
}

/// A receiving dock and the load it is working, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dock {
    pub id: String,
    pub name: String,
    /// Zone id the dock serves.
    pub zone: String,
    pub status: DockStatus,
    pub current_load: Option<String>,
    /// Unloading progress of the current load (0-100).
    #[serde(default)]
    pub progress: u8,
    /// Expected completion time of the current load, `HH:MM`.
    pub eta: Option<String>,
}

/// Counts per status plus utilization of in-service docks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockSummary {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
    pub out_of_order: usize,
    /// Occupied docks as a percentage of in-service docks, one decimal.
    pub utilization: f64,
}

/// Summarize a dock board.
pub fn summarize(docks: &[Dock]) -> DockSummary {
    let mut summary = DockSummary {
        total: docks.len(),
        ..DockSummary::default()
    };
    for dock in docks {
        match dock.status {
            DockStatus::Available => summary.available += 1,
            DockStatus::Occupied => summary.occupied += 1,
            DockStatus::Maintenance => summary.maintenance += 1,
            DockStatus::OutOfOrder => summary.out_of_order += 1,
        }
    }

    let in_service = summary.available + summary.occupied;
    if in_service > 0 {
        summary.utilization = round1(summary.occupied as f64 * 100.0 / in_service as f64);
    }
    summary
}
