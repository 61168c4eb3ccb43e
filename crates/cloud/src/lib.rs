//! Object-storage snapshot source for the dashboard.
//!
//! [`S3SnapshotSource`] reads the dashboard data set from JSON objects in an
//! S3 (or S3-compatible) bucket and implements
//! [`SnapshotSource`](dockside_core::source::SnapshotSource).

pub mod documents;
pub mod error;
pub mod s3;

pub use error::CloudError;
pub use s3::{S3Config, S3SnapshotSource};
