//! The directory tree engine.
//!
//! Every function here is a synchronous walk over an owned, nested forest
//! (`&[Directory]` / `&mut Vec<Directory>`). Nothing in this module does
//! I/O or locking; callers serialize mutations and persist the result.

pub mod access;
pub mod cascade;
pub mod mutation;
pub mod projection;
pub mod search;

pub use access::verify_password;
pub use cascade::{RemovedFile, descendant_ids, remove_files_under};
pub use mutation::{insert, remove, rename, set_password, set_shared};
pub use projection::project;
pub use search::{Preorder, exists, find, find_mut, preorder};
