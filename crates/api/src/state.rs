use std::sync::Arc;

use dockside_core::zones::ZoneRegistry;

use crate::config::ServerConfig;
use crate::store::SnapshotStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Known temperature zones, fixed for the life of the process.
    pub zones: Arc<ZoneRegistry>,
    /// Snapshot currently served, replaced by the refresh task.
    pub store: Arc<SnapshotStore>,
}
