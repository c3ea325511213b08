//! Adding files: uploading bytes into storage directories and linking
//! external paths into link directories.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_core::types::{DirectoryId, FileId};
use fileshare_entity::directory::DirType;
use fileshare_entity::file::{CreateFile, File, extension_of};
use fileshare_persistence::PersistenceGateway;

use crate::repository::Repository;
use crate::state::SharedRepository;

/// One file to upload.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name; its extension is kept on the stored copy.
    pub name: String,
    /// File content.
    pub data: Bytes,
}

impl Upload {
    /// Creates an upload from a name and its content.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Handles uploads and links.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Shared in-memory state.
    repo: SharedRepository,
    /// Where the file list is saved.
    gateway: Arc<dyn PersistenceGateway>,
    /// Byte store for uploads and stat for links.
    storage: Arc<dyn StorageProvider>,
    /// Operation policy.
    policy: PolicyConfig,
}

/// Require `directory_id` to exist with the given type.
fn require_directory(repo: &Repository, directory_id: &DirectoryId, expected: DirType) -> AppResult<()> {
    let dir = repo
        .find_directory(directory_id)
        .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))?;
    if dir.dir_type != expected {
        return Err(AppError::validation(format!(
            "Directory {directory_id} is a {} directory, expected {expected}",
            dir.dir_type
        )));
    }
    Ok(())
}

/// Object name for stored bytes: the new id plus the original extension.
fn stored_name(id: &FileId, name: &str) -> String {
    match extension_of(name) {
        ext if ext.is_empty() => id.to_string(),
        ext => format!("{id}.{ext}"),
    }
}

impl UploadService {
    /// Creates a new upload service.
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

    /// Stores each upload and records it under a storage directory.
    ///
    /// A failed write stops the batch with a `Storage` error. Files stored
    /// before the failure keep their records, which are saved.
    pub async fn upload_files(
        &self,
        directory_id: &DirectoryId,
        uploads: Vec<Upload>,
    ) -> AppResult<Vec<File>> {
        if uploads.is_empty() {
            return Err(AppError::validation("No files to upload"));
        }

        let mut repo = self.repo.write().await;
        require_directory(&repo, directory_id, DirType::Storage)?;

        let mut created = Vec::with_capacity(uploads.len());
        let mut failure = None;

        for upload in uploads {
            let id = FileId::generate();
            let size = upload.data.len() as u64;
            let path = match self.storage.write(&stored_name(&id, &upload.name), upload.data).await {
                Ok(path) => path,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            };

            let file = File::create(
                id,
                CreateFile {
                    directory_id: directory_id.clone(),
                    name: upload.name,
                    path,
                    size,
                },
            );
            repo.add_file(file.clone())?;
            created.push(file);
        }

        if !created.is_empty() {
            self.gateway.save_files(repo.files()).await?;
        }

        info!(
            directory_id = %directory_id,
            count = created.len(),
            failed = failure.is_some(),
            "Files uploaded"
        );

        match failure {
            Some(e) => Err(e),
            None => Ok(created),
        }
    }

    /// Records external files under a link directory.
    ///
    /// Paths that do not exist or name a directory are skipped. The
    /// records keep the given path; their bytes are never deleted.
    pub async fn link_files(
        &self,
        directory_id: &DirectoryId,
        paths: Vec<String>,
    ) -> AppResult<Vec<File>> {
        if !self.policy.link_dir_add {
            return Err(AppError::forbidden("Link directories are disabled"));
        }
        if paths.is_empty() {
            return Err(AppError::validation("No paths to link"));
        }

        let mut repo = self.repo.write().await;
        require_directory(&repo, directory_id, DirType::Link)?;

        let mut created = Vec::new();
        for path in paths {
            let meta = match self.storage.metadata(&path).await {
                Ok(meta) => meta,
                Err(e) if e.is(ErrorKind::NotFound) => {
                    warn!(path = %path, "Skipping missing path");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if meta.is_directory {
                warn!(path = %path, "Skipping directory path");
                continue;
            }
            let Some(name) = Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };

            let file = File::create(
                FileId::generate(),
                CreateFile {
                    directory_id: directory_id.clone(),
                    name,
                    path,
                    size: meta.size_bytes,
                },
            );
            repo.add_file(file.clone())?;
            created.push(file);
        }

        if !created.is_empty() {
            self.gateway.save_files(repo.files()).await?;
        }

        info!(directory_id = %directory_id, count = created.len(), "Files linked");
        Ok(created)
    }
}
