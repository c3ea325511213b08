//! In-memory state: the directory forest and the file list.
//!
//! [`Repository`] owns both collections and applies every operation of the
//! tree engine to them. It performs no I/O and has no internal locking;
//! the service layer wraps it in a [`SharedRepository`](crate::state::SharedRepository)
//! and persists after each mutation.

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::{DirectoryId, FileId};
use fileshare_entity::directory::{DirType, Directory};
use fileshare_entity::file::File;

use crate::tree::{self, RemovedFile};

/// Everything removed by a directory delete.
#[derive(Debug, Clone)]
pub struct DeletedDirectory {
    /// The spliced-out directory, with its subtree.
    pub directory: Directory,
    /// File records removed by the cascade, direct files first.
    pub files: Vec<RemovedFile>,
}

/// The forest and file list held by one running instance.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    forest: Vec<Directory>,
    files: Vec<File>,
}

impl Repository {
    /// Wrap already-loaded collections.
    pub fn new(forest: Vec<Directory>, files: Vec<File>) -> Self {
        Self { forest, files }
    }

    /// The live forest.
    pub fn forest(&self) -> &[Directory] {
        &self.forest
    }

    /// The live file list, in insertion order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    // -- Directories --------------------------------------------------------

    /// Look up a directory anywhere in the forest.
    pub fn find_directory(&self, id: &DirectoryId) -> Option<&Directory> {
        tree::find(&self.forest, id)
    }

    /// Whether a directory exists anywhere in the forest.
    pub fn directory_exists(&self, id: &DirectoryId) -> bool {
        tree::exists(&self.forest, id)
    }

    /// Insert a directory under its parent, or as a root.
    pub fn insert_directory(&mut self, dir: Directory) -> AppResult<()> {
        tree::insert(&mut self.forest, dir)
    }

    /// Rename a directory.
    pub fn rename_directory(&mut self, id: &DirectoryId, name: &str) -> AppResult<()> {
        tree::rename(&mut self.forest, id, name)
    }

    /// Set the share flag of a single directory.
    pub fn set_directory_shared(&mut self, id: &DirectoryId, is_shared: bool) -> AppResult<()> {
        tree::set_shared(&mut self.forest, id, is_shared)
    }

    /// Set or clear the password of a single directory.
    pub fn set_directory_password(&mut self, id: &DirectoryId, password: &str) -> AppResult<()> {
        tree::set_password(&mut self.forest, id, password)
    }

    /// Delete a directory, its subtree and every file record under it.
    ///
    /// File records are collected while the subtree is still in place, then
    /// the directory is spliced out. An unknown id changes nothing.
    pub fn delete_directory(&mut self, id: &DirectoryId) -> AppResult<DeletedDirectory> {
        if !self.directory_exists(id) {
            return Err(AppError::not_found(format!("Directory {id} not found")));
        }

        let files = tree::remove_files_under(&self.forest, &mut self.files, id);
        let directory = tree::remove(&mut self.forest, id)?;

        Ok(DeletedDirectory { directory, files })
    }

    /// Check a supplied password against a directory.
    pub fn verify_password(&self, id: &DirectoryId, supplied: &str) -> AppResult<()> {
        tree::verify_password(&self.forest, id, supplied)
    }

    /// Owned snapshot of the shared view.
    pub fn shared_forest(&self) -> Vec<Directory> {
        tree::project(&self.forest)
    }

    /// Type of a directory; unknown directories count as `storage`.
    pub fn owner_type(&self, id: &DirectoryId) -> DirType {
        self.find_directory(id)
            .map(|dir| dir.dir_type)
            .unwrap_or_default()
    }

    // -- Files --------------------------------------------------------------

    /// All file records, or only those of one directory.
    pub fn files_in(&self, directory_id: Option<&DirectoryId>) -> Vec<File> {
        self.files
            .iter()
            .filter(|file| directory_id.is_none_or(|id| file.belongs_to(id)))
            .cloned()
            .collect()
    }

    /// Shared file records, optionally restricted to one directory.
    pub fn shared_files(&self, directory_id: Option<&DirectoryId>) -> Vec<File> {
        self.files
            .iter()
            .filter(|file| file.is_shared)
            .filter(|file| directory_id.is_none_or(|id| file.belongs_to(id)))
            .cloned()
            .collect()
    }

    /// Look up a file record.
    pub fn find_file(&self, id: &FileId) -> Option<&File> {
        self.files.iter().find(|file| &file.id == id)
    }

    /// Append a file record; its directory must exist.
    pub fn add_file(&mut self, file: File) -> AppResult<()> {
        if !self.directory_exists(&file.directory_id) {
            return Err(AppError::not_found(format!(
                "Directory {} not found",
                file.directory_id
            )));
        }
        self.files.push(file);
        Ok(())
    }

    fn file_mut(&mut self, id: &FileId) -> AppResult<&mut File> {
        self.files
            .iter_mut()
            .find(|file| &file.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Rename a file record.
    pub fn rename_file(&mut self, id: &FileId, name: &str) -> AppResult<()> {
        self.file_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Set the share flag of a file record.
    pub fn set_file_shared(&mut self, id: &FileId, is_shared: bool) -> AppResult<()> {
        self.file_mut(id)?.is_shared = is_shared;
        Ok(())
    }

    /// Remove a single file record.
    pub fn remove_file(&mut self, id: &FileId) -> AppResult<RemovedFile> {
        let pos = self
            .files
            .iter()
            .position(|file| &file.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        let file = self.files.remove(pos);
        let owner_type = self.owner_type(&file.directory_id);
        Ok(RemovedFile { file, owner_type })
    }
}
