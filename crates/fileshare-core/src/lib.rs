//! # fileshare-core
//!
//! Core crate for FileShare. Contains the configuration schema, typed
//! identifiers, the physical storage trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
