//! The folder-sync policy: one folder per enabled node, named after the
//! node's slug and placed to mirror the node tree.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{error, info, warn};

use folderlink_core::config::sync::{RetireMode, SyncConfig};
use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;
use folderlink_core::traits::StorageProvider;
use folderlink_core::types::NodeId;
use folderlink_entity::folder::{Folder, path};
use folderlink_entity::node::{Node, NodeChanges, Stage};

use crate::capability::CapabilityCheck;
use crate::store::{FolderStore, NodeStore};

/// Keeps each policy-enabled node's associated folder consistent with the
/// node's slug, title and position in the tree.
#[derive(Debug, Clone)]
pub struct FolderSyncPolicy {
    /// Node store.
    nodes: Arc<dyn NodeStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Filesystem, used to repair missing directories.
    storage: Arc<dyn StorageProvider>,
    /// Which nodes carry the policy.
    capability: Arc<dyn CapabilityCheck>,
    /// Policy settings.
    config: SyncConfig,
}

impl FolderSyncPolicy {
    /// Creates a new folder-sync policy.
    pub fn new(
        nodes: Arc<dyn NodeStore>,
        folders: Arc<dyn FolderStore>,
        storage: Arc<dyn StorageProvider>,
        capability: Arc<dyn CapabilityCheck>,
        config: SyncConfig,
    ) -> Self {
        Self {
            nodes,
            folders,
            storage,
            capability,
            config,
        }
    }

    /// The policy settings.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The folder used when a node has no enabled parent.
    pub fn default_root_folder(&self) -> &str {
        &self.config.default_root_folder
    }

    /// Change the default root folder. Existing folders stay where they
    /// are; only later resolutions and moves use the new root.
    pub fn set_default_root_folder(&mut self, name: impl Into<String>) {
        self.config.default_root_folder = name.into();
    }

    /// Whether `node` carries the policy.
    pub fn is_enabled(&self, node: &Node) -> bool {
        self.capability.is_enabled(node)
    }

    /// Before-write step: make sure the node has a folder.
    ///
    /// Unassociated nodes get a folder resolved or created. Associated
    /// nodes have a missing directory recreated when repair is enabled.
    pub async fn prepare_write(&self, node: &mut Node) -> AppResult<()> {
        if !node.has_association() {
            self.resolve_or_create_folder(node).await?;
        } else if self.config.repair_missing_directories {
            self.repair_directory(node).await?;
        }
        Ok(())
    }

    /// Find or create the folder for `node` and record it on the node.
    ///
    /// The folder lives at `<base>/<slug>`, where the base is the enabled
    /// parent's folder path or the default root folder. A folder already
    /// associated with another stored node is a conflict.
    pub async fn resolve_or_create_folder(&self, node: &mut Node) -> AppResult<Folder> {
        let base = match self.enabled_parent(node.parent_id).await? {
            Some(parent) => {
                let parent_folder = self.require_folder(&parent, "resolve").await?;
                self.folders.relative_path(&parent_folder)
            }
            None => self.config.default_root_folder.clone(),
        };

        let folder_path = path::join(&base, &node.slug);
        let folder = self.folders.find_or_make(&folder_path).await?;
        if let Some(owner) = self.nodes.find_by_folder(folder.id, Stage::Draft).await? {
            if owner.id != node.id {
                return Err(AppError::conflict(format!(
                    "Folder '{}' already belongs to node {}",
                    folder.filename, owner.id
                )));
            }
        }
        node.associated_folder_id = Some(folder.id);

        info!(
            node_id = %node.id,
            folder_id = %folder.id,
            path = %folder.filename,
            "Associated folder resolved"
        );
        Ok(folder)
    }

    /// Recreate the directory of an existing folder record if it is gone.
    ///
    /// Returns `true` when the directory had to be recreated.
    pub async fn repair_directory(&self, node: &Node) -> AppResult<bool> {
        let Some(folder_id) = node.associated_folder_id else {
            return Ok(false);
        };
        let Some(folder) = self.folders.find_by_id(folder_id).await? else {
            return Ok(false);
        };
        if self.storage.dir_exists(&folder.filename).await? {
            return Ok(false);
        }

        self.storage
            .create_dir(&folder.filename, self.config.directory_mode)
            .await?;
        warn!(
            node_id = %node.id,
            folder_id = %folder.id,
            path = %folder.filename,
            "Associated folder directory was missing, recreated"
        );
        Ok(true)
    }

    /// After-write (or after-publish) step: push title and slug into the
    /// folder, and re-parent it when the node's parent changed.
    pub async fn sync_folder(&self, node: &Node, changes: &NodeChanges) -> AppResult<Folder> {
        let mut folder = self.require_folder(node, "sync").await?;

        folder.title = node.title.clone();
        folder.name = node.slug.clone();

        if let Some(new_parent) = changes.new_parent() {
            let target = match self.enabled_parent(new_parent).await? {
                Some(parent) => self.require_folder(&parent, "sync").await?,
                None => {
                    self.folders
                        .find_or_make(&self.config.default_root_folder)
                        .await?
                }
            };
            folder.parent_id = Some(target.id);
        }

        let saved = self.folders.save(&folder).await?;
        info!(
            node_id = %node.id,
            folder_id = %saved.id,
            path = %saved.filename,
            changed = ?changes.field_names(),
            "Associated folder synced"
        );
        Ok(saved)
    }

    /// Retire the node's folder according to the configured mode.
    pub async fn retire_folder(&self, node: &Node) -> AppResult<()> {
        match self.config.retire {
            RetireMode::HardDelete => self.delete_folder(node).await,
            RetireMode::SoftUnpublish => self.mark_folder_deleted(node).await.map(|_| ()),
        }
    }

    /// Hard retirement: delete every enabled child node (their folders go
    /// with them), then delete this node's folder tree.
    pub async fn delete_folder(&self, node: &Node) -> AppResult<()> {
        self.delete_enabled_children(node.id).await?;

        let folder = self.require_folder(node, "retire").await?;
        self.folders.delete(folder.id).await?;
        info!(
            node_id = %node.id,
            folder_id = %folder.id,
            "Associated folder deleted"
        );
        Ok(())
    }

    /// Soft retirement: rename the folder with the deleted suffix.
    pub async fn mark_folder_deleted(&self, node: &Node) -> AppResult<Folder> {
        let mut folder = self.require_folder(node, "retire").await?;
        if folder.name.ends_with(&self.config.deleted_suffix) {
            return Ok(folder);
        }

        folder.name = format!("{}{}", folder.name, self.config.deleted_suffix);
        let saved = self.folders.save(&folder).await?;
        info!(
            node_id = %node.id,
            folder_id = %saved.id,
            path = %saved.filename,
            "Associated folder marked deleted"
        );
        Ok(saved)
    }

    /// Deleting a folder removes its whole directory tree, so enabled
    /// children would be left pointing at nothing. Delete them first.
    fn delete_enabled_children(&self, parent_id: NodeId) -> BoxFuture<'_, AppResult<()>> {
        Box::pin(async move {
            let children = self.nodes.find_children(Some(parent_id), Stage::Draft).await?;
            for child in children.into_iter().filter(|c| self.is_enabled(c)) {
                info!(
                    node_id = %child.id,
                    parent_id = %parent_id,
                    "Deleting folder-associated child node"
                );
                self.delete_folder(&child).await?;
                self.nodes.delete(child.id, Stage::Draft).await?;
                self.nodes.delete(child.id, Stage::Live).await?;
            }
            Ok(())
        })
    }

    /// The parent node, if there is one and it carries the policy.
    async fn enabled_parent(&self, parent_id: Option<NodeId>) -> AppResult<Option<Node>> {
        let Some(parent_id) = parent_id else {
            return Ok(None);
        };
        let parent = self.nodes.find_by_id(parent_id, Stage::Draft).await?;
        Ok(parent.filter(|p| self.is_enabled(p)))
    }

    /// The node's associated folder. Its absence is fatal: it means the
    /// create step was skipped or the association was cleared externally.
    async fn require_folder(&self, node: &Node, step: &str) -> AppResult<Folder> {
        let folder = match node.associated_folder_id {
            Some(folder_id) => self.folders.find_by_id(folder_id).await?,
            None => None,
        };

        folder.ok_or_else(|| {
            error!(
                node_id = %node.id,
                folder_id = ?node.associated_folder_id,
                step,
                "Associated folder does not exist"
            );
            AppError::missing_association(format!(
                "Associated folder does not exist for node {} ({})",
                node.id, node.title
            ))
        })
    }
}
