//! Persisted state and file store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locations of the persisted forest, the file list, and uploaded bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the directory forest document.
    #[serde(default = "default_directories_file")]
    pub directories_file: String,
    /// File name of the file list document.
    #[serde(default = "default_files_file")]
    pub files_file: String,
    /// Root path where uploaded bytes of storage-type directories live.
    #[serde(default = "default_filestore_path")]
    pub filestore_path: String,
}

impl StorageConfig {
    /// Full path of the directory forest document.
    pub fn directories_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.directories_file)
    }

    /// Full path of the file list document.
    pub fn files_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.files_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            directories_file: default_directories_file(),
            files_file: default_files_file(),
            filestore_path: default_filestore_path(),
        }
    }
}

fn default_data_dir() -> String {
    "./config".to_string()
}

fn default_directories_file() -> String {
    "config-group.json".to_string()
}

fn default_files_file() -> String {
    "config-file.json".to_string()
}

fn default_filestore_path() -> String {
    "./static".to_string()
}
