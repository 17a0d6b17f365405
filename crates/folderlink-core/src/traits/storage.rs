//! Storage provider trait for the filesystem backing folder records.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for the filesystem that folder records mirror.
///
/// All paths are relative to the provider root and use `/` separators.
/// The local implementation lives in `folderlink-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a directory exists at the given path.
    async fn dir_exists(&self, path: &str) -> AppResult<bool>;

    /// Create a directory (and any missing parents) with the given
    /// permission mask. Existing directories are left untouched.
    async fn create_dir(&self, path: &str, mode: u32) -> AppResult<()>;

    /// Move (rename) a directory. Missing parents of `to` are created.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Delete a directory and all its contents recursively.
    ///
    /// Deleting a missing directory is not an error.
    async fn delete_dir(&self, path: &str) -> AppResult<()>;

    /// Absolute filesystem location of a relative path.
    fn absolute_path(&self, path: &str) -> std::path::PathBuf;
}
