//! Folder tree building and path resolution.

use std::sync::Arc;

use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;
use folderlink_core::types::FolderId;
use folderlink_database::repositories::FolderRepository;
use folderlink_entity::folder::{Folder, FolderTree};

/// Builds folder trees and breadcrumb trails.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Builds the complete folder tree.
    pub async fn get_tree(&self) -> AppResult<FolderTree> {
        let folders = self.folder_repo.find_all().await?;
        Ok(FolderTree::from_folders(&folders))
    }

    /// Gets the breadcrumb trail from the top level down to the given folder.
    pub async fn get_breadcrumbs(&self, folder_id: FolderId) -> AppResult<Vec<Folder>> {
        let mut breadcrumbs = Vec::new();
        let mut next = Some(folder_id);

        while let Some(id) = next {
            let folder = self
                .folder_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            if breadcrumbs.iter().any(|f: &Folder| f.id == folder.id) {
                return Err(AppError::internal(format!(
                    "Folder {folder_id} has a cyclic parent chain"
                )));
            }
            next = folder.parent_id;
            breadcrumbs.push(folder);
        }

        breadcrumbs.reverse();
        Ok(breadcrumbs)
    }
}
