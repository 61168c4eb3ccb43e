//! Holder for the snapshot currently being served.
//!
//! The refresh task swaps whole snapshots in; handlers clone the `Arc` under
//! a short read lock and work on the immutable snapshot without holding it.

use std::sync::Arc;

use dockside_core::snapshot::DashboardSnapshot;
use dockside_core::types::Timestamp;
use tokio::sync::RwLock;

/// A snapshot together with where and when it was obtained.
#[derive(Debug, Clone)]
pub struct StoredSnapshot {
    pub snapshot: Arc<DashboardSnapshot>,
    /// Name of the source that produced the snapshot.
    pub source: &'static str,
    pub refreshed_at: Timestamp,
    /// `true` when some section of the last refresh failed and is served
    /// from fallback data.
    pub fallback: bool,
}

#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<StoredSnapshot>,
}

impl SnapshotStore {
    pub fn new(initial: StoredSnapshot) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// The snapshot being served right now.
    pub async fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.current.read().await.snapshot)
    }

    /// Snapshot plus provenance.
    pub async fn current(&self) -> StoredSnapshot {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, next: StoredSnapshot) {
        *self.current.write().await = next;
    }
}
