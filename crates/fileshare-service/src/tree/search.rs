//! Depth-first, pre-order lookup in the forest.
//!
//! A node is checked before any of its children, and a whole subtree is
//! visited before the next sibling. The first match wins.

use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::Directory;

/// Pre-order iterator over every directory of a forest.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a Directory>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Directory;

    fn next(&mut self) -> Option<Self::Item> {
        let dir = self.stack.pop()?;
        self.stack.extend(dir.children.iter().rev());
        Some(dir)
    }
}

/// Walk `forest` in pre-order.
pub fn preorder(forest: &[Directory]) -> Preorder<'_> {
    Preorder {
        stack: forest.iter().rev().collect(),
    }
}

/// Find a directory by id anywhere in the forest.
pub fn find<'a>(forest: &'a [Directory], id: &DirectoryId) -> Option<&'a Directory> {
    preorder(forest).find(|dir| &dir.id == id)
}

/// Whether a directory with `id` exists anywhere in the forest.
pub fn exists(forest: &[Directory], id: &DirectoryId) -> bool {
    preorder(forest).any(|dir| &dir.id == id)
}

/// Mutable lookup with the same visiting order as [`find`].
pub fn find_mut<'a>(forest: &'a mut [Directory], id: &DirectoryId) -> Option<&'a mut Directory> {
    for dir in forest.iter_mut() {
        if &dir.id == id {
            return Some(dir);
        }
        if let Some(found) = find_mut(&mut dir.children, id) {
            return Some(found);
        }
    }
    None
}
