//! Dockside domain core.
//!
//! Pure, synchronous logic for the inbound-operations dashboard: the zone
//! registry, temperature classification, trend estimation, alert
//! generation and aggregation helpers, plus the dock, load and SLA models
//! the dashboard serves. Nothing in this crate performs I/O except through
//! the [`source::SnapshotSource`] trait, whose networked implementations
//! live in outer crates.

pub mod aggregation;
pub mod alert;
pub mod dock;
pub mod error;
pub mod load;
pub mod mock;
pub mod sla;
pub mod snapshot;
pub mod source;
pub mod temperature;
pub mod trend;
pub mod types;
pub mod zones;
