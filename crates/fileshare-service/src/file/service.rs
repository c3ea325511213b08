//! File record CRUD.

use std::sync::Arc;

use tracing::info;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_core::types::{DirectoryId, FileId};
use fileshare_entity::file::File;
use fileshare_persistence::PersistenceGateway;

use crate::state::{SharedRepository, purge_bytes};

/// Manages file records.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Shared in-memory state.
    repo: SharedRepository,
    /// Where the file list is saved.
    gateway: Arc<dyn PersistenceGateway>,
    /// Byte store for deleted storage files.
    storage: Arc<dyn StorageProvider>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        repo: SharedRepository,
        gateway: Arc<dyn PersistenceGateway>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            repo,
            gateway,
            storage,
        }
    }

    /// Lists all file records, or those of one directory.
    pub async fn list(&self, directory_id: Option<&DirectoryId>) -> Vec<File> {
        self.repo.read().await.files_in(directory_id)
    }

    /// Lists shared file records, optionally for one directory.
    pub async fn list_shared(&self, directory_id: Option<&DirectoryId>) -> Vec<File> {
        self.repo.read().await.shared_files(directory_id)
    }

    /// Gets a file record by id.
    pub async fn get(&self, id: &FileId) -> AppResult<File> {
        self.repo
            .read()
            .await
            .find_file(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Renames a file record. The stored bytes keep their path.
    pub async fn rename(&self, id: &FileId, name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let mut repo = self.repo.write().await;
        repo.rename_file(id, name)?;
        self.gateway.save_files(repo.files()).await?;

        info!(file_id = %id, name, "File renamed");
        Ok(())
    }

    /// Shares or unshares a file.
    pub async fn set_shared(&self, id: &FileId, is_shared: bool) -> AppResult<()> {
        let mut repo = self.repo.write().await;
        repo.set_file_shared(id, is_shared)?;
        self.gateway.save_files(repo.files()).await?;

        info!(file_id = %id, is_shared, "File share flag updated");
        Ok(())
    }

    /// Deletes a file record, and its bytes unless it belongs to a link
    /// directory.
    pub async fn delete(&self, id: &FileId) -> AppResult<File> {
        let mut repo = self.repo.write().await;
        let removed = repo.remove_file(id)?;

        purge_bytes(self.storage.as_ref(), std::slice::from_ref(&removed)).await;
        self.gateway.save_files(repo.files()).await?;

        info!(
            file_id = %id,
            directory_id = %removed.file.directory_id,
            bytes_deleted = removed.owns_bytes(),
            "File deleted"
        );
        Ok(removed.file)
    }
}
