//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::{DirType, Directory};
use fileshare_persistence::MemoryGateway;
use fileshare_service::{CreateDirectoryRequest, Repository, ShareContext};
use fileshare_storage::LocalStorageProvider;

/// A fresh service stack over an in-memory gateway and a temporary file store.
pub struct TestShare {
    /// Wired services.
    pub ctx: ShareContext,
    /// The gateway, kept to inspect saves and inject failures.
    pub gateway: MemoryGateway,
    /// Root of the temporary file store.
    pub store: PathBuf,
    /// Scratch space for files outside the store.
    pub outside: PathBuf,
    _tmp: TempDir,
}

impl TestShare {
    /// Create a stack with the default policy.
    pub async fn new() -> Self {
        Self::with_policy(PolicyConfig::default()).await
    }

    /// Create a stack with the given policy.
    pub async fn with_policy(policy: PolicyConfig) -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let store = tmp.path().join("static");
        let outside = tmp.path().join("outside");
        std::fs::create_dir_all(&outside).expect("Failed to create scratch dir");

        let storage = LocalStorageProvider::new(store.to_str().expect("utf8 path"))
            .await
            .expect("Failed to init storage");
        let gateway = MemoryGateway::new();

        let ctx = ShareContext::new(
            Repository::default(),
            Arc::new(gateway.clone()),
            Arc::new(storage),
            policy,
        );

        Self {
            ctx,
            gateway,
            store,
            outside,
            _tmp: tmp,
        }
    }

    /// Create a storage directory.
    pub async fn mkdir(&self, name: &str, parent: Option<&DirectoryId>) -> Directory {
        self.ctx
            .directories()
            .create(CreateDirectoryRequest::new(name, parent.cloned()))
            .await
            .expect("Failed to create directory")
    }

    /// Create a link directory.
    pub async fn mklink(&self, name: &str, parent: Option<&DirectoryId>) -> Directory {
        self.ctx
            .directories()
            .create(CreateDirectoryRequest::new(name, parent.cloned()).with_type(DirType::Link))
            .await
            .expect("Failed to create link directory")
    }

    /// Write a file outside the store and return its path.
    pub fn external_file(&self, name: &str, contents: &[u8]) -> String {
        let path = self.outside.join(name);
        std::fs::write(&path, contents).expect("Failed to write external file");
        path.to_string_lossy().into_owned()
    }
}

/// Number of regular files directly inside `dir`.
pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).filter(|e| e.path().is_file()).count())
        .unwrap_or(0)
}
