//! Shared service state and the collaborators every service works with.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::result::AppResult;
use fileshare_core::traits::storage::{DeleteOutcome, StorageProvider};
use fileshare_persistence::PersistenceGateway;

use crate::directory::DirectoryService;
use crate::file::{DownloadService, FileService, UploadService};
use crate::repository::Repository;
use crate::tree::RemovedFile;

/// The repository shared by all services of one instance.
///
/// Mutations hold the write guard across the in-memory change and the
/// following save; reads share the read guard.
pub type SharedRepository = Arc<RwLock<Repository>>;

/// Wires the repository, the persistence gateway and the byte store.
#[derive(Debug, Clone)]
pub struct ShareContext {
    repo: SharedRepository,
    gateway: Arc<dyn PersistenceGateway>,
    storage: Arc<dyn StorageProvider>,
    policy: PolicyConfig,
}

impl ShareContext {
    /// Build a context around an already-populated repository.
    pub fn new(
        repo: Repository,
        gateway: Arc<dyn PersistenceGateway>,
        storage: Arc<dyn StorageProvider>,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            repo: Arc::new(RwLock::new(repo)),
            gateway,
            storage,
            policy,
        }
    }

    /// Load persisted state through `gateway` and build a context over it.
    pub async fn load(
        gateway: Arc<dyn PersistenceGateway>,
        storage: Arc<dyn StorageProvider>,
        policy: PolicyConfig,
    ) -> AppResult<Self> {
        let forest = gateway.load_forest().await?;
        let files = gateway.load_files().await?;
        info!(
            roots = forest.len(),
            files = files.len(),
            storage = storage.provider_type(),
            "Loaded persisted state"
        );
        Ok(Self::new(Repository::new(forest, files), gateway, storage, policy))
    }

    /// The shared repository.
    pub fn repository(&self) -> SharedRepository {
        Arc::clone(&self.repo)
    }

    /// The persistence gateway.
    pub fn gateway(&self) -> Arc<dyn PersistenceGateway> {
        Arc::clone(&self.gateway)
    }

    /// The byte store.
    pub fn storage(&self) -> Arc<dyn StorageProvider> {
        Arc::clone(&self.storage)
    }

    /// The active policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Directory operations.
    pub fn directories(&self) -> DirectoryService {
        DirectoryService::new(
            self.repository(),
            self.gateway(),
            self.storage(),
            self.policy.clone(),
        )
    }

    /// File record operations.
    pub fn files(&self) -> FileService {
        FileService::new(self.repository(), self.gateway(), self.storage())
    }

    /// Uploading and linking files.
    pub fn uploads(&self) -> UploadService {
        UploadService::new(
            self.repository(),
            self.gateway(),
            self.storage(),
            self.policy.clone(),
        )
    }

    /// Reading file contents.
    pub fn downloads(&self) -> DownloadService {
        DownloadService::new(self.repository(), self.storage())
    }
}

/// Delete the stored bytes of every removed file whose owner holds them.
///
/// Failures are logged and skipped; the records are already gone.
pub(crate) async fn purge_bytes(storage: &dyn StorageProvider, removed: &[RemovedFile]) {
    for entry in removed.iter().filter(|entry| entry.owns_bytes()) {
        match storage.delete(&entry.file.path).await {
            Ok(DeleteOutcome::Deleted) => {}
            Ok(DeleteOutcome::AlreadyAbsent) => {
                warn!(
                    file_id = %entry.file.id,
                    path = %entry.file.path,
                    "Stored bytes already absent"
                );
            }
            Err(e) => {
                warn!(
                    file_id = %entry.file.id,
                    path = %entry.file.path,
                    error = %e,
                    "Failed to delete stored bytes"
                );
            }
        }
    }
}

/// Save both collections, returning the first failure.
///
/// The second save is attempted even when the first fails.
pub(crate) async fn save_all(gateway: &dyn PersistenceGateway, repo: &Repository) -> AppResult<()> {
    let forest = gateway.save_forest(repo.forest()).await;
    let files = gateway.save_files(repo.files()).await;
    forest.and(files)
}
