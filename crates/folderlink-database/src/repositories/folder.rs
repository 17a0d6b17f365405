//! Folder repository implementation.
//!
//! Filenames are unique across the table. Path resolution and moves run
//! under a single write lock so concurrent callers always observe a
//! consistent folder namespace.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;
use folderlink_core::types::FolderId;
use folderlink_entity::folder::{CreateFolder, Folder};

/// Outcome of resolving a folder path.
#[derive(Debug, Clone)]
pub struct PathResolution {
    /// The folder at the end of the path.
    pub folder: Folder,
    /// Folders created along the way, outermost first.
    pub created: Vec<Folder>,
}

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Default)]
pub struct FolderRepository {
    table: RwLock<BTreeMap<FolderId, Folder>>,
}

impl FolderRepository {
    /// Create an empty folder repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with folder records.
    pub fn from_records(folders: Vec<Folder>) -> Self {
        Self {
            table: RwLock::new(folders.into_iter().map(|f| (f.id, f)).collect()),
        }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.table.read().await.get(&id).cloned())
    }

    /// Find a folder by its stored filename.
    pub async fn find_by_filename(&self, filename: &str) -> AppResult<Option<Folder>> {
        Ok(find_filename(&*self.table.read().await, filename).cloned())
    }

    /// List every folder, ordered by filename.
    pub async fn find_all(&self) -> AppResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self.table.read().await.values().cloned().collect();
        folders.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(folders)
    }

    /// Walk `segments` below `prefix`, creating any missing folders.
    ///
    /// The whole walk holds the write lock, so two callers resolving the
    /// same path always end up with the same folder.
    pub async fn find_or_create_path(
        &self,
        segments: &[&str],
        prefix: &str,
    ) -> AppResult<PathResolution> {
        if segments.is_empty() {
            return Err(AppError::validation("Folder path cannot be empty"));
        }

        let mut table = self.table.write().await;
        let mut parent: Option<Folder> = None;
        let mut created = Vec::new();

        for segment in segments {
            let data = CreateFolder::under(parent.as_ref(), segment, prefix);
            let folder = match find_filename(&table, &data.filename) {
                Some(existing) => existing.clone(),
                None => {
                    let folder = data.into_folder();
                    table.insert(folder.id, folder.clone());
                    created.push(folder.clone());
                    folder
                }
            };
            parent = Some(folder);
        }

        let folder = parent.ok_or_else(|| AppError::internal("Path walk produced no folder"))?;
        Ok(PathResolution { folder, created })
    }

    /// Replace a folder record and rewrite the filenames and depths of its
    /// descendants to follow it. Returns the stored record.
    pub async fn update_with_descendants(&self, folder: &Folder) -> AppResult<Folder> {
        let mut table = self.table.write().await;
        let old = table
            .get(&folder.id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;

        if let Some(clash) = find_filename(&table, &folder.filename) {
            if clash.id != folder.id {
                return Err(AppError::conflict(format!(
                    "Folder path '{}' already exists",
                    folder.filename
                )));
            }
        }

        let now = Utc::now();
        if old.filename != folder.filename || old.depth != folder.depth {
            let depth_delta = folder.depth - old.depth;
            for child in table.values_mut().filter(|f| old.is_ancestor_of(f)) {
                child.filename = format!(
                    "{}{}",
                    folder.filename,
                    &child.filename[old.filename.len()..]
                );
                child.depth += depth_delta;
                child.updated_at = now;
            }
        }

        let mut record = folder.clone();
        record.updated_at = now;
        table.insert(record.id, record.clone());
        Ok(record)
    }

    /// Delete a folder and all of its descendants. Returns the removed
    /// records, the requested folder first.
    pub async fn delete_tree(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let mut table = self.table.write().await;
        let Some(root) = table.remove(&id) else {
            return Ok(Vec::new());
        };
        let doomed: Vec<FolderId> = table
            .values()
            .filter(|f| root.is_ancestor_of(f))
            .map(|f| f.id)
            .collect();

        let mut removed = vec![root];
        for child_id in doomed {
            if let Some(child) = table.remove(&child_id) {
                removed.push(child);
            }
        }
        Ok(removed)
    }

    /// Count folders.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.table.read().await.len() as u64)
    }
}

fn find_filename<'a>(table: &'a BTreeMap<FolderId, Folder>, filename: &str) -> Option<&'a Folder> {
    table.values().find(|f| f.filename == filename)
}
