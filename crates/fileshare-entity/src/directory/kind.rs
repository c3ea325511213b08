//! Directory type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a directory relates to the bytes of its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirType {
    /// Files are uploaded; their bytes are owned and deleted by FileShare.
    #[default]
    Storage,
    /// Files reference external paths; their bytes are never touched.
    Link,
}

impl DirType {
    /// Return the directory type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Link => "link",
        }
    }

    /// Whether deleting a file of this directory also deletes its bytes.
    pub fn owns_bytes(&self) -> bool {
        matches!(self, Self::Storage)
    }
}

impl fmt::Display for DirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DirType {
    type Err = fileshare_core::AppError;

    /// Parses a directory type; the empty string means `storage`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "storage" => Ok(Self::Storage),
            "link" => Ok(Self::Link),
            _ => Err(fileshare_core::AppError::validation(format!(
                "Invalid directory type: '{s}'. Expected one of: storage, link"
            ))),
        }
    }
}
