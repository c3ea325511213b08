//! Directory domain entities.

pub mod kind;
pub mod model;

pub use kind::DirType;
pub use model::{CreateDirectory, Directory};
