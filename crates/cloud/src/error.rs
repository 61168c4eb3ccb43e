use dockside_core::error::CoreError;

/// Errors raised while reading dashboard objects from storage.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// Missing or invalid storage configuration.
    #[error("Storage configuration error: {0}")]
    Config(String),

    /// The object request failed (network, permissions, missing key).
    #[error("Failed to fetch '{key}' from bucket: {message}")]
    Request { key: String, message: String },

    /// The object body could not be read to completion.
    #[error("Failed to read body of '{key}': {message}")]
    Body { key: String, message: String },

    /// The object was not the expected JSON document.
    #[error("Failed to decode '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CloudError> for CoreError {
    fn from(err: CloudError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
