//! In-place forest mutations: insert, rename, share, password, remove.

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::Directory;

use super::search;

/// Insert `dir` under its `parent_id`, or as a new root if it has none.
///
/// An empty `parent_id` counts as none. When the parent cannot be found the
/// forest is left untouched and `ParentNotFound` is returned.
pub fn insert(forest: &mut Vec<Directory>, mut dir: Directory) -> AppResult<()> {
    if dir.parent_id.as_ref().is_some_and(DirectoryId::is_empty) {
        dir.parent_id = None;
    }

    let Some(parent_id) = dir.parent_id.clone() else {
        forest.push(dir);
        return Ok(());
    };

    let parent = search::find_mut(forest, &parent_id).ok_or_else(|| {
        AppError::parent_not_found(format!("Parent directory {parent_id} not found"))
    })?;
    parent.children.push(dir);
    Ok(())
}

/// Locate a directory and apply `change` to it.
fn update(
    forest: &mut [Directory],
    id: &DirectoryId,
    change: impl FnOnce(&mut Directory),
) -> AppResult<()> {
    let dir = search::find_mut(forest, id)
        .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))?;
    change(dir);
    Ok(())
}

/// Rename a directory.
pub fn rename(forest: &mut [Directory], id: &DirectoryId, name: &str) -> AppResult<()> {
    update(forest, id, |dir| dir.name = name.to_string())
}

/// Set the share flag of one directory; children keep their own flags.
pub fn set_shared(forest: &mut [Directory], id: &DirectoryId, is_shared: bool) -> AppResult<()> {
    update(forest, id, |dir| dir.is_shared = is_shared)
}

/// Set the password of one directory; empty clears it.
pub fn set_password(forest: &mut [Directory], id: &DirectoryId, password: &str) -> AppResult<()> {
    update(forest, id, |dir| dir.password = password.to_string())
}

/// Splice a directory (with its whole subtree) out of the forest.
///
/// Root entries are checked first; only then are nested children searched,
/// one parent at a time in pre-order.
pub fn remove(forest: &mut Vec<Directory>, id: &DirectoryId) -> AppResult<Directory> {
    if let Some(pos) = forest.iter().position(|dir| &dir.id == id) {
        return Ok(forest.remove(pos));
    }
    remove_nested(forest, id).ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))
}

fn remove_nested(dirs: &mut [Directory], id: &DirectoryId) -> Option<Directory> {
    for dir in dirs.iter_mut() {
        if let Some(pos) = dir.children.iter().position(|child| &child.id == id) {
            return Some(dir.children.remove(pos));
        }
        if let Some(removed) = remove_nested(&mut dir.children, id) {
            return Some(removed);
        }
    }
    None
}
