//! Directory password checks.

use fileshare_core::error::AppError;
use fileshare_core::result::AppResult;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::Directory;

use super::search;

/// Check `supplied` against the password of directory `id`.
///
/// A directory without a password accepts anything, including the empty
/// string. Otherwise the strings must match exactly.
pub fn verify_password(forest: &[Directory], id: &DirectoryId, supplied: &str) -> AppResult<()> {
    let dir = search::find(forest, id)
        .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))?;

    if !dir.accepts_password(supplied) {
        return Err(AppError::unauthorized("Invalid password"));
    }
    Ok(())
}
