//! Folder records kept in step with their directories.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use folderlink_core::config::storage::StorageConfig;
use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;
use folderlink_core::traits::StorageProvider;
use folderlink_core::types::FolderId;
use folderlink_database::repositories::FolderRepository;
use folderlink_entity::folder::{CreateFolder, Folder, path};

use crate::store::FolderStore;

/// Manages folder records and the directories that back them.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Filesystem the folders live on.
    storage: Arc<dyn StorageProvider>,
    /// Filename prefix of every folder (e.g. `assets/`).
    prefix: String,
    /// Permission mask for created directories.
    directory_mode: u32,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        storage_config: &StorageConfig,
        directory_mode: u32,
    ) -> Self {
        Self {
            folder_repo,
            storage,
            prefix: storage_config.normalized_prefix(),
            directory_mode,
        }
    }

    /// Gets a folder by ID, failing if it does not exist.
    pub async fn get_folder(&self, folder_id: FolderId) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Whether the folder's directory exists on disk.
    pub async fn directory_exists(&self, folder: &Folder) -> AppResult<bool> {
        self.storage.dir_exists(&folder.filename).await
    }

    fn validate_name(name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if name.contains('/') || name == "." || name == ".." {
            return Err(AppError::validation(format!(
                "Invalid folder name '{name}'"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FolderStore for FolderService {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        self.folder_repo.find_by_id(id).await
    }

    async fn find_or_make(&self, folder_path: &str) -> AppResult<Folder> {
        let segments = path::segments(folder_path);
        for segment in &segments {
            Self::validate_name(segment)?;
        }

        let resolution = self
            .folder_repo
            .find_or_create_path(&segments, &self.prefix)
            .await?;

        for created in &resolution.created {
            info!(
                folder_id = %created.id,
                path = %created.filename,
                "Folder created"
            );
        }

        // Always ensure the directory, so a caller that lost the race for
        // the record still returns a folder that exists on disk.
        self.storage
            .create_dir(&resolution.folder.filename, self.directory_mode)
            .await?;

        Ok(resolution.folder)
    }

    async fn save(&self, folder: &Folder) -> AppResult<Folder> {
        Self::validate_name(&folder.name)?;

        let old = self.get_folder(folder.id).await?;

        let parent = match folder.parent_id {
            Some(parent_id) => {
                if parent_id == folder.id {
                    return Err(AppError::validation("Cannot move a folder into itself"));
                }
                let parent = self.folder_repo.find_by_id(parent_id).await?.ok_or_else(|| {
                    AppError::not_found(format!("Target folder {parent_id} not found"))
                })?;
                if old.is_ancestor_of(&parent) {
                    return Err(AppError::validation(
                        "Cannot move a folder into one of its descendants",
                    ));
                }
                Some(parent)
            }
            None => None,
        };

        let placement = CreateFolder::under(parent.as_ref(), &folder.name, &self.prefix);
        let mut updated = folder.clone();
        updated.filename = placement.filename;
        updated.depth = placement.depth;

        if old.filename != updated.filename {
            if let Some(clash) = self.folder_repo.find_by_filename(&updated.filename).await? {
                if clash.id != updated.id {
                    return Err(AppError::conflict(format!(
                        "A folder at path '{}' already exists",
                        updated.filename
                    )));
                }
            }

            if self.storage.dir_exists(&old.filename).await? {
                self.storage
                    .rename(&old.filename, &updated.filename)
                    .await?;
            } else {
                debug!(
                    folder_id = %updated.id,
                    path = %old.filename,
                    "Directory missing before move, creating at new location"
                );
                self.storage
                    .create_dir(&updated.filename, self.directory_mode)
                    .await?;
            }
        }

        let saved = self.folder_repo.update_with_descendants(&updated).await?;

        if old.filename != saved.filename {
            info!(
                folder_id = %saved.id,
                from = %old.filename,
                to = %saved.filename,
                "Folder moved"
            );
        }

        Ok(saved)
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let removed = self.folder_repo.delete_tree(id).await?;
        let Some(folder) = removed.first() else {
            return Ok(false);
        };

        self.storage.delete_dir(&folder.filename).await?;

        info!(
            folder_id = %folder.id,
            path = %folder.filename,
            descendants = removed.len() - 1,
            "Folder deleted"
        );
        Ok(true)
    }

    fn relative_path(&self, folder: &Folder) -> String {
        folder.relative_path(&self.prefix).to_string()
    }

    fn filesystem_path(&self, folder: &Folder) -> PathBuf {
        self.storage.absolute_path(&folder.filename)
    }
}
