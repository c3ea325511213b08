//! Core type definitions used across the FileShare workspace.

pub mod id;
pub mod timestamp;

pub use id::{DirectoryId, FileId};
pub use timestamp::{ADD_TIME_FORMAT, now_truncated};
