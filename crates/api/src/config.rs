use std::fmt;
use std::str::FromStr;

/// Where dashboard snapshots come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    /// Deterministic in-process mock data.
    Mock,
    /// JSON documents in an S3 bucket (see `dockside_cloud::S3Config`).
    S3,
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "s3" => Ok(Self::S3),
            other => Err(format!("unknown data source '{other}', expected 'mock' or 's3'")),
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::S3 => f.write_str("s3"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between snapshot refreshes (default: `900`, 15 minutes).
    pub refresh_interval_secs: u64,
    /// Snapshot source (default: `mock`).
    pub data_source: DataSourceKind,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `REFRESH_INTERVAL_SECS` | `900`                      |
    /// | `DATA_SOURCE`           | `mock`                     |
    ///
    /// Panics on unparseable values so misconfiguration fails at start-up.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let refresh_interval_secs: u64 = std::env::var("REFRESH_INTERVAL_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("REFRESH_INTERVAL_SECS must be a valid u64");
        assert!(refresh_interval_secs > 0, "REFRESH_INTERVAL_SECS must be positive");

        let data_source: DataSourceKind = std::env::var("DATA_SOURCE")
            .unwrap_or_else(|_| "mock".into())
            .parse()
            .unwrap_or_else(|e| panic!("DATA_SOURCE: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            refresh_interval_secs,
            data_source,
        }
    }
}
