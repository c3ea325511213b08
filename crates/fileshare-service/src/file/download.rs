//! Reading file contents back out of storage.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::{ByteStream, StorageProvider};
use fileshare_core::types::FileId;
use fileshare_entity::file::File;

use crate::state::SharedRepository;

/// Serves file contents.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Shared in-memory state.
    repo: SharedRepository,
    /// Byte store.
    storage: Arc<dyn StorageProvider>,
}

/// File record and content for a download.
#[derive(Debug)]
pub struct DownloadResult {
    /// File record.
    pub file: File,
    /// File content.
    pub data: Bytes,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(repo: SharedRepository, storage: Arc<dyn StorageProvider>) -> Self {
        Self { repo, storage }
    }

    async fn lookup(&self, id: &FileId) -> AppResult<File> {
        self.repo
            .read()
            .await
            .find_file(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Reads any file, shared or not.
    pub async fn download_file(&self, id: &FileId) -> AppResult<DownloadResult> {
        let file = self.lookup(id).await?;
        let data = self.storage.read_bytes(&file.path).await?;
        debug!(file_id = %id, bytes = data.len(), "File read");
        Ok(DownloadResult { file, data })
    }

    /// Reads a file from the shared view; unshared files are refused.
    pub async fn download_shared_file(&self, id: &FileId) -> AppResult<DownloadResult> {
        let file = self.lookup(id).await?;
        if !file.is_shared {
            return Err(AppError::forbidden(format!("File {id} is not shared")));
        }
        let data = self.storage.read_bytes(&file.path).await?;
        debug!(file_id = %id, bytes = data.len(), "Shared file read");
        Ok(DownloadResult { file, data })
    }

    /// Opens any file as a byte stream.
    pub async fn open_stream(&self, id: &FileId) -> AppResult<(File, ByteStream)> {
        let file = self.lookup(id).await?;
        let stream = self.storage.read(&file.path).await?;
        Ok((file, stream))
    }
}
