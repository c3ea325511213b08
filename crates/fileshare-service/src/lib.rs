//! # fileshare-service
//!
//! The directory tree engine and the services built on it.
//!
//! [`tree`] holds the pure, synchronous algorithms over the forest:
//! pre-order search, in-place mutation, cascade deletion of file records,
//! the shared projection and password checks. [`Repository`] applies them
//! to the forest and file list of one instance. The async services lock a
//! [`SharedRepository`], mutate it, and persist through a
//! `PersistenceGateway`, deleting stored bytes through a `StorageProvider`
//! where a removal calls for it.
//!
//! Services follow constructor injection; [`ShareContext`] wires them.

pub mod directory;
pub mod file;
pub mod repository;
pub mod state;
pub mod tree;

pub use directory::{CreateDirectoryRequest, DirectoryService};
pub use file::{DownloadResult, DownloadService, FileService, Upload, UploadService};
pub use repository::{DeletedDirectory, Repository};
pub use state::{ShareContext, SharedRepository};
pub use tree::RemovedFile;
