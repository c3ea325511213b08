//! Persistence gateway trait.

use async_trait::async_trait;

use fileshare_core::result::AppResult;
use fileshare_entity::directory::Directory;
use fileshare_entity::file::File;

/// Loads and saves the two persisted collections.
///
/// Loading state that was never saved yields an empty collection. Saves
/// replace the whole collection; there is no partial update.
#[async_trait]
pub trait PersistenceGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Load the directory forest.
    async fn load_forest(&self) -> AppResult<Vec<Directory>>;

    /// Replace the persisted directory forest.
    async fn save_forest(&self, forest: &[Directory]) -> AppResult<()>;

    /// Load the file list.
    async fn load_files(&self) -> AppResult<Vec<File>>;

    /// Replace the persisted file list.
    async fn save_files(&self, files: &[File]) -> AppResult<()>;
}
