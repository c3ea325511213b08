//! Convenience result type alias for FileShare.

use crate::error::AppError;

/// A specialized `Result` type for FileShare operations.
pub type AppResult<T> = Result<T, AppError>;
