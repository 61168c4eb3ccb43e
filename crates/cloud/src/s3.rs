//! S3-backed snapshot source.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use dockside_core::error::CoreError;
use dockside_core::snapshot::DashboardSnapshot;
use dockside_core::source::{SnapshotParts, SnapshotSource, SOURCE_S3};
use dockside_core::types::Timestamp;
use serde::de::DeserializeOwned;

use crate::documents::{
    assemble, decode, DocksDocument, LoadsDocument, SlaDocument, TemperatureDocument, KEY_DOCKS,
    KEY_LOADS, KEY_SLA, KEY_TEMPERATURE,
};
use crate::error::CloudError;

/// Bucket location of the dashboard documents.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Prepended to every object key, e.g. `"warehouse-7/"`.
    pub key_prefix: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    pub endpoint_url: Option<String>,
}

impl S3Config {
    /// Load from environment variables.
    ///
    /// | Env Var           | Default     |
    /// |-------------------|-------------|
    /// | `S3_BUCKET_NAME`  | (required)  |
    /// | `AWS_REGION`      | `us-east-1` |
    /// | `S3_KEY_PREFIX`   | (empty)     |
    /// | `S3_ENDPOINT_URL` | (none)      |
    ///
    /// Credentials come from the default AWS provider chain.
    pub fn from_env() -> Result<Self, CloudError> {
        let bucket = std::env::var("S3_BUCKET_NAME")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| CloudError::Config("S3_BUCKET_NAME must be set".into()))?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());
        let key_prefix = std::env::var("S3_KEY_PREFIX").unwrap_or_default();
        let endpoint_url = std::env::var("S3_ENDPOINT_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        Ok(Self {
            bucket,
            region,
            key_prefix,
            endpoint_url,
        })
    }

    /// Full object key for a document key.
    pub fn object_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.key_prefix.trim_end_matches('/'), key)
        }
    }
}

/// Reads the four dashboard documents from a bucket.
pub struct S3SnapshotSource {
    client: Client,
    config: S3Config,
}

impl S3SnapshotSource {
    /// Build a client from the default AWS configuration chain.
    pub async fn connect(config: S3Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(url) = &config.endpoint_url {
            builder = builder.endpoint_url(url).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            prefix = %config.key_prefix,
            custom_endpoint = config.endpoint_url.is_some(),
            "S3 snapshot source configured"
        );

        Self { client, config }
    }

    /// Fetch and decode one JSON document.
    async fn fetch_object<T: DeserializeOwned>(&self, key: &str) -> Result<T, CloudError> {
        let object_key = self.config.object_key(key);

        let output = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| CloudError::Request {
                key: object_key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| CloudError::Body {
                key: object_key.clone(),
                message: e.to_string(),
            })?
            .into_bytes();

        tracing::debug!(key = %object_key, bytes = bytes.len(), "Fetched S3 object");
        decode(&object_key, &bytes)
    }

    /// [`fetch_object`](Self::fetch_object), logging one warning per failed key.
    async fn get_document<T: DeserializeOwned>(&self, key: &str) -> Result<T, CloudError> {
        self.fetch_object(key).await.inspect_err(|e| {
            tracing::warn!(
                key,
                bucket = %self.config.bucket,
                error = %e,
                "S3 document fetch failed"
            );
        })
    }
}

#[async_trait]
impl SnapshotSource for S3SnapshotSource {
    fn name(&self) -> &'static str {
        SOURCE_S3
    }

    async fn fetch(&self, now: Timestamp) -> Result<DashboardSnapshot, CoreError> {
        self.fetch_parts(now).await.into_snapshot()
    }

    async fn fetch_parts(&self, now: Timestamp) -> SnapshotParts {
        let (temperature, docks, loads, sla) = tokio::join!(
            self.get_document::<TemperatureDocument>(KEY_TEMPERATURE),
            self.get_document::<DocksDocument>(KEY_DOCKS),
            self.get_document::<LoadsDocument>(KEY_LOADS),
            self.get_document::<SlaDocument>(KEY_SLA),
        );
        assemble(now, temperature, docks, loads, sla)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(prefix: &str) -> S3Config {
        S3Config {
            bucket: "inbound".into(),
            region: "us-east-1".into(),
            key_prefix: prefix.into(),
            endpoint_url: None,
        }
    }

    #[test]
    fn object_key_without_prefix() {
        assert_eq!(config("").object_key(KEY_SLA), "sla/sla-data.json");
    }

    #[test]
    fn object_key_with_prefix_normalizes_slash() {
        assert_eq!(
            config("dc-7/").object_key(KEY_DOCKS),
            "dc-7/docks/docks-data.json"
        );
        assert_eq!(
            config("dc-7").object_key(KEY_DOCKS),
            "dc-7/docks/docks-data.json"
        );
    }
}
