//! Cascade deletion of file records under a directory.
//!
//! Descendants are discovered from two signals: the `parent_id` field of
//! every node, and physical nesting under `children`. Either one alone is
//! enough to pull a directory (and so its files) into the cascade.

use std::collections::{HashMap, HashSet, VecDeque};

use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::{DirType, Directory};
use fileshare_entity::file::File;

use super::search::preorder;

/// A file record taken out of the file list, with its owner's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedFile {
    /// The removed record.
    pub file: File,
    /// Type of the owning directory at removal time.
    pub owner_type: DirType,
}

impl RemovedFile {
    /// Whether the stored bytes of this file should be deleted too.
    pub fn owns_bytes(&self) -> bool {
        self.owner_type.owns_bytes()
    }
}

/// Every directory below `id`, in discovery order, excluding `id` itself.
pub fn descendant_ids(forest: &[Directory], id: &DirectoryId) -> Vec<DirectoryId> {
    let mut found = Vec::new();
    let mut seen: HashSet<DirectoryId> = HashSet::from([id.clone()]);
    let mut queue: VecDeque<DirectoryId> = VecDeque::from([id.clone()]);

    while let Some(current) = queue.pop_front() {
        for node in preorder(forest) {
            let mut claim = |candidate: &DirectoryId| {
                if seen.insert(candidate.clone()) {
                    found.push(candidate.clone());
                    queue.push_back(candidate.clone());
                }
            };

            if node.parent_id.as_ref() == Some(&current) {
                claim(&node.id);
            }
            if node.id == current {
                for child in &node.children {
                    claim(&child.id);
                }
            }
        }
    }

    found
}

/// Remove every file of `id` and of all its descendants from `files`.
///
/// Direct files are removed first, then those of descendants. The forest is
/// not modified. Files whose owner cannot be found are reported as
/// `storage`-owned.
pub fn remove_files_under(
    forest: &[Directory],
    files: &mut Vec<File>,
    id: &DirectoryId,
) -> Vec<RemovedFile> {
    let mut owner_types: HashMap<&DirectoryId, DirType> = HashMap::new();
    for dir in preorder(forest) {
        owner_types.entry(&dir.id).or_insert(dir.dir_type);
    }
    let owner_type = |dir_id: &DirectoryId| owner_types.get(dir_id).copied().unwrap_or_default();

    let mut removed = take_files(files, |file| &file.directory_id == id);

    let descendants: HashSet<DirectoryId> = descendant_ids(forest, id).into_iter().collect();
    if !descendants.is_empty() {
        removed.extend(take_files(files, |file| {
            descendants.contains(&file.directory_id)
        }));
    }

    removed
        .into_iter()
        .map(|file| RemovedFile {
            owner_type: owner_type(&file.directory_id),
            file,
        })
        .collect()
}

/// Split `files` in place, returning the matching records in order.
fn take_files(files: &mut Vec<File>, matches: impl Fn(&File) -> bool) -> Vec<File> {
    let (taken, kept): (Vec<File>, Vec<File>) =
        std::mem::take(files).into_iter().partition(|file| matches(file));
    *files = kept;
    taken
}
