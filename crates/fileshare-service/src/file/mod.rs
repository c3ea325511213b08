//! File records: listing, renaming, sharing, deleting, uploading, linking
//! and downloading.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadResult, DownloadService};
pub use service::FileService;
pub use upload::{Upload, UploadService};
