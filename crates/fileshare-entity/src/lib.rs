//! # fileshare-entity
//!
//! Domain entity models for FileShare. A [`directory::Directory`] owns its
//! children directly, so the forest is a nested value; a [`file::File`]
//! points at its owning directory by id. Both derive `Serialize` and
//! `Deserialize` in the camelCase layout of the persisted JSON documents.

pub mod directory;
pub mod file;
