//! Store interfaces consumed by the folder-sync policy.
//!
//! The policy only talks to these traits. [`NodeStore`] is implemented for
//! the in-memory [`NodeRepository`]; [`FolderStore`] is implemented by
//! [`crate::folder::FolderService`], which keeps records and directories
//! together.

use std::path::PathBuf;

use async_trait::async_trait;

use folderlink_core::result::AppResult;
use folderlink_core::types::{FolderId, NodeId};
use folderlink_database::repositories::NodeRepository;
use folderlink_entity::folder::Folder;
use folderlink_entity::node::{Node, Stage};

/// Read/write access to content nodes.
#[async_trait]
pub trait NodeStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a node by ID in the given stage.
    async fn find_by_id(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>>;

    /// List direct children of a node, or top-level nodes for `None`.
    async fn find_children(
        &self,
        parent_id: Option<NodeId>,
        stage: Stage,
    ) -> AppResult<Vec<Node>>;

    /// Find the node associated with a folder.
    async fn find_by_folder(
        &self,
        folder_id: FolderId,
        stage: Stage,
    ) -> AppResult<Option<Node>>;

    /// Persist a node, returning the previously stored state.
    async fn save(&self, node: &Node, stage: Stage) -> AppResult<Option<Node>>;

    /// Remove a node, returning it if it existed.
    async fn delete(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>>;
}

/// Folder records together with their backing directories.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Return the folder at `path` (relative to the assets prefix),
    /// creating it and any missing ancestors.
    ///
    /// Idempotent: concurrent calls for one path resolve to one folder.
    async fn find_or_make(&self, path: &str) -> AppResult<Folder>;

    /// Persist a folder's name, title and parent, moving its directory.
    async fn save(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a folder, its descendants and its directory tree.
    async fn delete(&self, id: FolderId) -> AppResult<bool>;

    /// The folder's path relative to the assets prefix, suitable as a
    /// base for [`FolderStore::find_or_make`].
    fn relative_path(&self, folder: &Folder) -> String;

    /// Absolute location of the folder's directory.
    fn filesystem_path(&self, folder: &Folder) -> PathBuf;
}

#[async_trait]
impl NodeStore for NodeRepository {
    async fn find_by_id(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>> {
        NodeRepository::find_by_id(self, id, stage).await
    }

    async fn find_children(
        &self,
        parent_id: Option<NodeId>,
        stage: Stage,
    ) -> AppResult<Vec<Node>> {
        NodeRepository::find_children(self, parent_id, stage).await
    }

    async fn find_by_folder(
        &self,
        folder_id: FolderId,
        stage: Stage,
    ) -> AppResult<Option<Node>> {
        NodeRepository::find_by_folder(self, folder_id, stage).await
    }

    async fn save(&self, node: &Node, stage: Stage) -> AppResult<Option<Node>> {
        NodeRepository::save(self, node, stage).await
    }

    async fn delete(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>> {
        NodeRepository::delete(self, id, stage).await
    }
}
