use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dockside_cloud::{S3Config, S3SnapshotSource};
use dockside_core::mock::MockSource;
use dockside_core::source::SnapshotSource;
use dockside_core::zones::ZoneRegistry;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dockside_api::background::refresh;
use dockside_api::config::{DataSourceKind, ServerConfig};
use dockside_api::router::build_app_router;
use dockside_api::state::AppState;
use dockside_api::store::SnapshotStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dockside_api=debug,dockside_cloud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        data_source = %config.data_source,
        refresh_interval_secs = config.refresh_interval_secs,
        "Loaded server configuration"
    );

    let zones = ZoneRegistry::warehouse_default();

    // --- Snapshot source ---
    let mock = MockSource::new(zones.clone());
    let source: Arc<dyn SnapshotSource> = match config.data_source {
        DataSourceKind::Mock => Arc::new(mock.clone()),
        DataSourceKind::S3 => {
            let s3_config = S3Config::from_env().expect("Invalid S3 configuration");
            Arc::new(S3SnapshotSource::connect(s3_config).await)
        }
    };

    let initial = refresh::initial_snapshot(source.as_ref(), &mock, Utc::now()).await;
    tracing::info!(
        source = initial.source,
        fallback = initial.fallback,
        "Initial snapshot loaded"
    );
    let store = Arc::new(SnapshotStore::new(initial));

    // --- Background refresh ---
    let refresh_cancel = CancellationToken::new();
    let refresh_handle = tokio::spawn(refresh::run(
        Arc::clone(&source),
        Arc::clone(&store),
        Duration::from_secs(config.refresh_interval_secs),
        refresh_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        zones: Arc::new(zones),
        store,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    refresh_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), refresh_handle).await;
    tracing::info!("Snapshot refresh stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
