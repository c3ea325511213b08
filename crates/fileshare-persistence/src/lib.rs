//! # fileshare-persistence
//!
//! Durable storage for the directory forest and the flat file list.
//! [`JsonFileGateway`] keeps each collection in its own pretty-printed
//! JSON document; [`MemoryGateway`] keeps them in memory for tests.

pub mod gateway;
pub mod json;
pub mod memory;

pub use gateway::PersistenceGateway;
pub use json::JsonFileGateway;
pub use memory::MemoryGateway;
