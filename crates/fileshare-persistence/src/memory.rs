//! In-memory gateway, used by tests and dry runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_entity::directory::Directory;
use fileshare_entity::file::File;

use crate::gateway::PersistenceGateway;

/// Holds the "persisted" collections in memory.
///
/// Saves can be made to fail on demand so callers can observe how a
/// failed save interacts with an already-applied in-memory mutation.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    forest: Arc<RwLock<Vec<Directory>>>,
    files: Arc<RwLock<Vec<File>>>,
    fail_saves: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway pre-loaded with state.
    pub fn with_state(forest: Vec<Directory>, files: Vec<File>) -> Self {
        Self {
            forest: Arc::new(RwLock::new(forest)),
            files: Arc::new(RwLock::new(files)),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The last saved forest.
    pub async fn saved_forest(&self) -> Vec<Directory> {
        self.forest.read().await.clone()
    }

    /// The last saved file list.
    pub async fn saved_files(&self) -> Vec<File> {
        self.files.read().await.clone()
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::persistence("Simulated save failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn load_forest(&self) -> AppResult<Vec<Directory>> {
        Ok(self.forest.read().await.clone())
    }

    async fn save_forest(&self, forest: &[Directory]) -> AppResult<()> {
        self.check_writable()?;
        *self.forest.write().await = forest.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_files(&self) -> AppResult<Vec<File>> {
        Ok(self.files.read().await.clone())
    }

    async fn save_files(&self, files: &[File]) -> AppResult<()> {
        self.check_writable()?;
        *self.files.write().await = files.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
