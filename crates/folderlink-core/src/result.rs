//! Convenience result type alias for Folderlink.

use crate::error::AppError;

/// A specialized `Result` type for Folderlink operations.
pub type AppResult<T> = Result<T, AppError>;
