//! File entity model.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use fileshare_core::types::{DirectoryId, FileId, now_truncated};

/// A file record owned by exactly one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name.
    pub name: String,
    /// Stored path for storage directories, external path for link ones.
    pub path: String,
    /// Size in bytes, captured at upload or link time.
    pub size: u64,
    /// Extension without the leading dot.
    #[serde(rename = "type", default)]
    pub file_type: String,
    /// When the record was created.
    #[serde(with = "fileshare_core::types::timestamp")]
    pub add_time: NaiveDateTime,
    /// Whether the file is downloadable from the shared view.
    #[serde(default)]
    pub is_shared: bool,
    /// The owning directory.
    pub directory_id: DirectoryId,
}

impl File {
    /// Build an unshared record stamped with the current time.
    pub fn create(id: FileId, req: CreateFile) -> Self {
        let file_type = extension_of(&req.name);
        Self {
            id,
            name: req.name,
            path: req.path,
            size: req.size,
            file_type,
            add_time: now_truncated(),
            is_shared: false,
            directory_id: req.directory_id,
        }
    }

    /// Whether the record belongs to `directory_id`.
    pub fn belongs_to(&self, directory_id: &DirectoryId) -> bool {
        &self.directory_id == directory_id
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The owning directory.
    pub directory_id: DirectoryId,
    /// Display name; its extension becomes the record type.
    pub name: String,
    /// Recorded path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
}

/// Extension of `name` without the dot, or empty if it has none.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}
