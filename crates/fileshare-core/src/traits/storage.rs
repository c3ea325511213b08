//! Storage provider trait for the bytes behind storage-type directories.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageObjectMeta {
    /// Path the metadata was read from.
    pub path: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// Whether this is a directory.
    pub is_directory: bool,
}

/// Result of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The bytes existed and were removed.
    Deleted,
    /// Nothing existed at the path; treated as success.
    AlreadyAbsent,
}

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for physical file storage.
///
/// Writes take a bare object name and return the full path the bytes were
/// stored at; that path is what file records keep. Reads, stats, and
/// deletes take such a recorded path, which for link-type directories is
/// an arbitrary external location.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store bytes under `name` and return the recorded path.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<String>;

    /// Open a recorded path as a byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Read a recorded path into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Stat a recorded path.
    async fn metadata(&self, path: &str) -> AppResult<StorageObjectMeta>;

    /// Delete the bytes at a recorded path. A missing file is not an error.
    async fn delete(&self, path: &str) -> AppResult<DeleteOutcome>;
}
