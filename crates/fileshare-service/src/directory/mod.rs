//! Directory management: creating, renaming, sharing, protecting and
//! deleting directories, plus the shared view.

pub mod service;

pub use service::{CreateDirectoryRequest, DirectoryService};
