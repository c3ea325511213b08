//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::{ByteStream, DeleteOutcome, StorageObjectMeta, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Directory new uploads are written into.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The directory uploads are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object name to a path within the root.
    fn resolve(&self, name: &str) -> PathBuf {
        let clean = name.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

fn not_found_or_storage(e: std::io::Error, action: &str, path: &str) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("File not found: {path}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to {action}: {path}"), e)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<String> {
        let full_path = self.resolve(name);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {}", full_path.display()),
                e,
            )
        })?;

        let recorded = full_path.to_string_lossy().into_owned();
        debug!(path = %recorded, bytes = data.len(), "Wrote file");
        Ok(recorded)
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let file = fs::File::open(path)
            .await
            .map_err(|e| not_found_or_storage(e, "open file", path))?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let data = fs::read(path)
            .await
            .map_err(|e| not_found_or_storage(e, "read file", path))?;
        Ok(Bytes::from(data))
    }

    async fn metadata(&self, path: &str) -> AppResult<StorageObjectMeta> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| not_found_or_storage(e, "get metadata", path))?;

        let last_modified = meta
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);

        Ok(StorageObjectMeta {
            path: path.to_string(),
            size_bytes: meta.len(),
            last_modified,
            is_directory: meta.is_dir(),
        })
    }

    async fn delete(&self, path: &str) -> AppResult<DeleteOutcome> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path, "Deleted file");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }
}
