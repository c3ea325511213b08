//! Directory operations with persistence after every mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::{CreateDirectory, DirType, Directory};
use fileshare_persistence::PersistenceGateway;

use crate::repository::DeletedDirectory;
use crate::state::{SharedRepository, purge_bytes, save_all};

/// Manages the directory forest.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    /// Shared in-memory state.
    repo: SharedRepository,
    /// Where the forest and file list are saved.
    gateway: Arc<dyn PersistenceGateway>,
    /// Byte store for files removed by a cascade.
    storage: Arc<dyn StorageProvider>,
    /// Operation policy.
    policy: PolicyConfig,
}

/// Request to create a directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDirectoryRequest {
    /// Directory name.
    #[validate(length(min = 1, message = "Directory name is required"))]
    pub name: String,
    /// Parent directory; absent or empty creates a root.
    #[serde(default)]
    pub parent_id: Option<DirectoryId>,
    /// Storage or link directory.
    #[serde(default)]
    pub dir_type: DirType,
}

impl CreateDirectoryRequest {
    /// A storage directory request.
    pub fn new(name: impl Into<String>, parent_id: Option<DirectoryId>) -> Self {
        Self {
            name: name.into(),
            parent_id,
            dir_type: DirType::Storage,
        }
    }

    /// Set the directory type.
    pub fn with_type(mut self, dir_type: DirType) -> Self {
        self.dir_type = dir_type;
        self
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Directory name cannot be empty"));
    }
    Ok(())
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(
        repo: SharedRepository,
        gateway: Arc<dyn PersistenceGateway>,
        storage: Arc<dyn StorageProvider>,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            repo,
            gateway,
            storage,
            policy,
        }
    }

    /// Owned snapshot of the whole forest.
    pub async fn list(&self) -> Vec<Directory> {
        self.repo.read().await.forest().to_vec()
    }

    /// Owned snapshot of the shared view.
    pub async fn list_shared(&self) -> Vec<Directory> {
        self.repo.read().await.shared_forest()
    }

    /// Gets a directory (with its subtree) by id.
    pub async fn get(&self, id: &DirectoryId) -> AppResult<Directory> {
        self.repo
            .read()
            .await
            .find_directory(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))
    }

    /// Creates a directory under its parent, or as a new root.
    pub async fn create(&self, req: CreateDirectoryRequest) -> AppResult<Directory> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid directory request: {e}")))?;
        validate_name(&req.name)?;

        if req.dir_type == DirType::Link && !self.policy.link_dir_add {
            return Err(AppError::forbidden("Link directories are disabled"));
        }

        let dir = Directory::create(CreateDirectory {
            name: req.name,
            parent_id: req.parent_id.filter(|id| !id.is_empty()),
            dir_type: req.dir_type,
        });

        let mut repo = self.repo.write().await;
        repo.insert_directory(dir.clone())?;
        self.gateway.save_forest(repo.forest()).await?;

        info!(
            directory_id = %dir.id,
            parent_id = ?dir.parent_id.as_ref().map(DirectoryId::as_str),
            dir_type = %dir.dir_type,
            name = %dir.name,
            "Directory created"
        );

        Ok(dir)
    }

    /// Renames a directory.
    pub async fn rename(&self, id: &DirectoryId, name: &str) -> AppResult<()> {
        validate_name(name)?;

        let mut repo = self.repo.write().await;
        repo.rename_directory(id, name)?;
        self.gateway.save_forest(repo.forest()).await?;

        info!(directory_id = %id, name, "Directory renamed");
        Ok(())
    }

    /// Shares or unshares a single directory.
    pub async fn set_shared(&self, id: &DirectoryId, is_shared: bool) -> AppResult<()> {
        let mut repo = self.repo.write().await;
        repo.set_directory_shared(id, is_shared)?;
        self.gateway.save_forest(repo.forest()).await?;

        info!(directory_id = %id, is_shared, "Directory share flag updated");
        Ok(())
    }

    /// Sets the password of a directory; an empty string clears it.
    pub async fn set_password(&self, id: &DirectoryId, password: &str) -> AppResult<()> {
        let mut repo = self.repo.write().await;
        repo.set_directory_password(id, password)?;
        self.gateway.save_forest(repo.forest()).await?;

        info!(
            directory_id = %id,
            protected = !password.is_empty(),
            "Directory password updated"
        );
        Ok(())
    }

    /// Checks a supplied password against a directory.
    pub async fn verify_password(&self, id: &DirectoryId, supplied: &str) -> AppResult<()> {
        self.repo.read().await.verify_password(id, supplied)
    }

    /// Deletes a directory, its subtree and every file record under it.
    ///
    /// Bytes of files owned by storage directories are deleted as well;
    /// external files behind link directories are left alone.
    pub async fn delete(&self, id: &DirectoryId) -> AppResult<DeletedDirectory> {
        let mut repo = self.repo.write().await;
        let deleted = repo.delete_directory(id)?;

        purge_bytes(self.storage.as_ref(), &deleted.files).await;
        save_all(self.gateway.as_ref(), &repo).await?;

        info!(
            directory_id = %id,
            removed_files = deleted.files.len(),
            "Directory deleted"
        );
        Ok(deleted)
    }
}
