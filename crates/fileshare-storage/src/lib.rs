//! # fileshare-storage
//!
//! Physical storage for the bytes behind storage-type directories.
//! Link-type directories never write here; their recorded paths are only
//! read and stat'ed through the same provider.

pub mod providers;

#[cfg(feature = "local")]
pub use providers::LocalStorageProvider;
