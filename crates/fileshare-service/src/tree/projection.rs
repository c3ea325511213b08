//! The shared view of the forest.

use fileshare_entity::directory::Directory;

/// Pruned, owned copy of `forest` holding only what a visitor may see.
///
/// A directory survives if it is shared itself or if anything below it is.
/// Survivors that are not shared themselves are kept as pass-through
/// ancestors with `is_shared == false`, so shared descendants stay
/// reachable. Sharing is never inherited: every child of a shared
/// directory is judged on its own. Sibling order is preserved.
pub fn project(forest: &[Directory]) -> Vec<Directory> {
    forest
        .iter()
        .filter_map(|dir| {
            let children = project(&dir.children);
            if !dir.is_shared && children.is_empty() {
                return None;
            }
            let mut copy = dir.shallow_copy();
            copy.children = children;
            Some(copy)
        })
        .collect()
}
