//! Periodic dashboard snapshot refresh.
//!
//! Fetches a new snapshot from the configured source on a fixed interval
//! using `tokio::time::interval`. Each section that fails to load is taken
//! from the previously served snapshot (or mock data, if nothing has been
//! served yet) and the failure is logged.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dockside_core::mock::MockSource;
use dockside_core::source::{fetch_with_fallback, Fetched, SnapshotSource, SOURCE_MOCK};
use dockside_core::types::Timestamp;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::store::{SnapshotStore, StoredSnapshot};

/// Fetch once, falling back to mock data generated at `now`.
///
/// Used at start-up, before there is a previous snapshot to fall back to.
pub async fn initial_snapshot(
    source: &dyn SnapshotSource,
    fallback: &MockSource,
    now: Timestamp,
) -> StoredSnapshot {
    let fetched = fetch_with_fallback(source, || fallback.generate(now), now).await;
    let complete_fallback = fetched.is_complete_fallback();
    let mut stored = into_stored(source, fetched, now);
    if complete_fallback {
        stored.source = SOURCE_MOCK;
    }
    stored
}

/// Fetch once and replace the stored snapshot.
///
/// Failed sections keep their currently stored data, flagged as fallback.
/// When every section fails the stored snapshot keeps its source and
/// refresh time.
pub async fn refresh_once(source: &dyn SnapshotSource, store: &SnapshotStore, now: Timestamp) {
    let previous = store.current().await;
    let fetched = fetch_with_fallback(source, || (*previous.snapshot).clone(), now).await;
    let complete_fallback = fetched.is_complete_fallback();
    let mut next = into_stored(source, fetched, now);
    if complete_fallback {
        next.source = previous.source;
        next.refreshed_at = previous.refreshed_at;
    }
    store.replace(next).await;
}

/// Run the refresh loop until `cancel` is triggered.
pub async fn run(
    source: Arc<dyn SnapshotSource>,
    store: Arc<SnapshotStore>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        source = source.name(),
        interval_secs = interval.as_secs(),
        "Snapshot refresh job started"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the initial snapshot is already loaded.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Snapshot refresh job stopping");
                break;
            }
            _ = ticker.tick() => {
                refresh_once(source.as_ref(), &store, Utc::now()).await;
            }
        }
    }
}

fn into_stored(source: &dyn SnapshotSource, fetched: Fetched, now: Timestamp) -> StoredSnapshot {
    let fallback = fetched.is_fallback();
    if fallback {
        log_fallback(source, &fetched);
    } else {
        tracing::debug!(source = source.name(), "Snapshot refreshed");
    }
    StoredSnapshot {
        snapshot: Arc::new(fetched.into_snapshot()),
        source: source.name(),
        refreshed_at: now,
        fallback,
    }
}

fn log_fallback(source: &dyn SnapshotSource, fetched: &Fetched) {
    for failure in &fetched.failures {
        tracing::warn!(
            source = source.name(),
            section = %failure.section,
            error = %failure.error,
            "Snapshot section refresh failed, serving fallback data"
        );
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::TimeZone;
    use dockside_core::error::CoreError;
    use dockside_core::sla::SlaMetric;
    use dockside_core::snapshot::DashboardSnapshot;
    use dockside_core::source::SnapshotParts;
    use dockside_core::zones::ZoneRegistry;

    use super::*;

    struct Unreachable;

    #[async_trait]
    impl SnapshotSource for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn fetch(&self, _now: Timestamp) -> Result<DashboardSnapshot, CoreError> {
            Err(CoreError::Internal("connection refused".into()))
        }
    }

    /// Serves mock data with the SLA document missing.
    struct SlaUnavailable(MockSource);

    #[async_trait]
    impl SnapshotSource for SlaUnavailable {
        fn name(&self) -> &'static str {
            "sla-unavailable"
        }

        async fn fetch(&self, now: Timestamp) -> Result<DashboardSnapshot, CoreError> {
            self.fetch_parts(now).await.into_snapshot()
        }

        async fn fetch_parts(&self, now: Timestamp) -> SnapshotParts {
            let mut parts = SnapshotParts::complete(self.0.generate(now));
            parts.sla = Err(CoreError::Internal("sla/sla-data.json: NoSuchKey".into()));
            parts
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
    }

    fn mock() -> MockSource {
        MockSource::new(ZoneRegistry::warehouse_default())
    }

    #[tokio::test]
    async fn initial_snapshot_from_healthy_source() {
        let stored = initial_snapshot(&mock(), &mock(), now()).await;
        assert!(!stored.fallback);
        assert_eq!(stored.source, "mock");
        assert_eq!(stored.refreshed_at, now());
    }

    #[tokio::test]
    async fn initial_snapshot_falls_back_to_mock() {
        let stored = initial_snapshot(&Unreachable, &mock(), now()).await;
        assert!(stored.fallback);
        assert_eq!(stored.source, SOURCE_MOCK);
        assert_eq!(*stored.snapshot, mock().generate(now()));
    }

    #[tokio::test]
    async fn partial_refresh_keeps_previous_failed_section() {
        let mut previous = mock().generate(now());
        previous.sla = vec![SlaMetric::new("Dock Turnaround", 90.0, 81.0)];
        let store = SnapshotStore::new(StoredSnapshot {
            snapshot: Arc::new(previous.clone()),
            source: SOURCE_MOCK,
            refreshed_at: now(),
            fallback: false,
        });
        let later = now() + chrono::Duration::hours(2);
        let source = SlaUnavailable(MockSource::with_seed(ZoneRegistry::warehouse_default(), 99));

        refresh_once(&source, &store, later).await;

        let current = store.current().await;
        assert!(current.fallback);
        assert_eq!(current.source, "sla-unavailable");
        assert_eq!(current.refreshed_at, later);
        assert_eq!(current.snapshot.sla, previous.sla);
        assert_eq!(current.snapshot.temperatures, source.0.generate(later).temperatures);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let store = SnapshotStore::new(initial_snapshot(&mock(), &mock(), now()).await);
        let later = now() + chrono::Duration::hours(2);

        refresh_once(&Unreachable, &store, later).await;

        let current = store.current().await;
        assert!(current.fallback);
        assert_eq!(current.source, "mock");
        assert_eq!(current.refreshed_at, now());
        assert_eq!(current.snapshot.generated_at, now());
    }

    #[tokio::test]
    async fn successful_refresh_replaces_snapshot() {
        let store = SnapshotStore::new(initial_snapshot(&Unreachable, &mock(), now()).await);
        let later = now() + chrono::Duration::hours(2);

        refresh_once(&mock(), &store, later).await;

        let current = store.current().await;
        assert!(!current.fallback);
        assert_eq!(current.snapshot.generated_at, later);
    }

    #[tokio::test]
    async fn loop_stops_on_cancel() {
        let store = Arc::new(SnapshotStore::new(
            initial_snapshot(&mock(), &mock(), now()).await,
        ));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            Arc::new(mock()),
            Arc::clone(&store),
            Duration::from_secs(3600),
            cancel.clone(),
        ));
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresh loop should stop")
            .expect("refresh task should not panic");
    }
}
