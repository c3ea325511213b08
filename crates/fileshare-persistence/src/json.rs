//! JSON document gateway.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use fileshare_core::config::storage::StorageConfig;
use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::result::AppResult;
use fileshare_entity::directory::Directory;
use fileshare_entity::file::File;

use crate::gateway::PersistenceGateway;

/// Stores the forest and the file list as two JSON documents.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    /// Path of the forest document.
    directories_path: PathBuf,
    /// Path of the file list document.
    files_path: PathBuf,
}

impl JsonFileGateway {
    /// Create a gateway over explicit document paths.
    pub fn new(directories_path: impl Into<PathBuf>, files_path: impl Into<PathBuf>) -> Self {
        Self {
            directories_path: directories_path.into(),
            files_path: files_path.into(),
        }
    }

    /// Create a gateway over the document paths named in configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.directories_path(), config.files_path())
    }

    /// Path of the forest document.
    pub fn directories_path(&self) -> &Path {
        &self.directories_path
    }

    /// Path of the file list document.
    pub fn files_path(&self) -> &Path {
        &self.files_path
    }

    /// Write empty documents for any collection that has none yet.
    ///
    /// Returns `true` if anything was created.
    pub async fn ensure_initialized(&self) -> AppResult<bool> {
        let mut created = false;
        if !document_exists(&self.directories_path).await? {
            write_document::<Directory>(&self.directories_path, &[]).await?;
            created = true;
        }
        if !document_exists(&self.files_path).await? {
            write_document::<File>(&self.files_path, &[]).await?;
            created = true;
        }
        if created {
            info!(
                directories = %self.directories_path.display(),
                files = %self.files_path.display(),
                "Initialized persisted state"
            );
        }
        Ok(created)
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn load_forest(&self) -> AppResult<Vec<Directory>> {
        read_document(&self.directories_path).await
    }

    async fn save_forest(&self, forest: &[Directory]) -> AppResult<()> {
        write_document(&self.directories_path, forest).await
    }

    async fn load_files(&self) -> AppResult<Vec<File>> {
        read_document(&self.files_path).await
    }

    async fn save_files(&self, files: &[File]) -> AppResult<()> {
        write_document(&self.files_path, files).await
    }
}

/// Whether a document exists; errors other than "not found" are reported.
async fn document_exists(path: &Path) -> AppResult<bool> {
    fs::try_exists(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Persistence,
            format!("Failed to check {}", path.display()),
            e,
        )
    })
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No persisted document, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to read {}", path.display()),
                e,
            ));
        }
    };

    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&data).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to parse {}: {e}", path.display()),
            e,
        )
    })
}

/// Write to a sibling temp file and rename it over the target.
async fn write_document<T: Serialize>(path: &Path, items: &[T]) -> AppResult<()> {
    let data = serde_json::to_vec_pretty(items)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to create {}", parent.display()),
                e,
            )
        })?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &data).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Persistence,
            format!("Failed to write {}", tmp.display()),
            e,
        )
    })?;
    fs::rename(&tmp, path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Persistence,
            format!("Failed to replace {}", path.display()),
            e,
        )
    })?;

    debug!(path = %path.display(), count = items.len(), bytes = data.len(), "Saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use fileshare_core::types::DirectoryId;
    use fileshare_entity::directory::CreateDirectory;
    use fileshare_entity::file::CreateFile;

    fn gateway(dir: &tempfile::TempDir) -> JsonFileGateway {
        JsonFileGateway::new(
            dir.path().join("state/config-group.json"),
            dir.path().join("state/config-file.json"),
        )
    }

    #[tokio::test]
    async fn test_missing_documents_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(&dir);
        assert!(gw.load_forest().await.unwrap().is_empty());
        assert!(gw.load_files().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(&dir);

        let mut root = Directory::create(CreateDirectory::new("root", None));
        let child = Directory::create(CreateDirectory::new("child", Some(root.id.clone())));
        let child_id = child.id.clone();
        root.children.push(child);
        let file = File::create(
            "f1".into(),
            CreateFile {
                directory_id: child_id,
                name: "a.txt".to_string(),
                path: "/tmp/a.txt".to_string(),
                size: 1,
            },
        );

        gw.save_forest(std::slice::from_ref(&root)).await.unwrap();
        gw.save_files(std::slice::from_ref(&file)).await.unwrap();

        assert_eq!(gw.load_forest().await.unwrap(), vec![root]);
        assert_eq!(gw.load_files().await.unwrap(), vec![file]);
        assert!(!gw.directories_path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(&dir);
        std::fs::create_dir_all(dir.path().join("state")).unwrap();
        std::fs::write(gw.directories_path(), b"{ not json").unwrap();

        let err = gw.load_forest().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_ensure_initialized_writes_empty_arrays_once() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(&dir);

        assert!(gw.ensure_initialized().await.unwrap());
        assert_eq!(
            std::fs::read_to_string(gw.files_path()).unwrap().trim(),
            "[]"
        );
        assert!(!gw.ensure_initialized().await.unwrap());
    }

    #[tokio::test]
    async fn test_existence_check_errors_are_not_treated_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let doc = blocker.join("config-group.json");

        let err = document_exists(&doc).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);

        let gw = JsonFileGateway::new(doc, dir.path().join("config-file.json"));
        let err = gw.ensure_initialized().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert!(!dir.path().join("config-file.json").exists());
        assert_eq!(std::fs::read(&blocker).unwrap(), b"not a directory");
    }

    #[tokio::test]
    async fn test_reads_legacy_camel_case_layout() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(&dir);
        std::fs::create_dir_all(dir.path().join("state")).unwrap();
        std::fs::write(
            gw.directories_path(),
            r#"[{"id":"1","name":"root","isShared":false,
                 "children":[{"id":"2","name":"pub","parentId":"1","isShared":true}]}]"#,
        )
        .unwrap();

        let forest = gw.load_forest().await.unwrap();
        assert_eq!(forest[0].children[0].id, DirectoryId::new("2"));
        assert!(forest[0].children[0].is_shared);
    }
}
