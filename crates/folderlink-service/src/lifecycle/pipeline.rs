//! Write, publish, unpublish and delete pipelines for content nodes.
//!
//! | Operation   | Policy step                                   |
//! |-------------|-----------------------------------------------|
//! | `write`     | resolve/repair before save, sync after (on write) |
//! | `publish`   | sync after copying to live (on publish, or soft unpublish) |
//! | `unpublish` | soft retire before removing from live         |
//! | `delete`    | hard retire before removing the records       |

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use folderlink_core::config::sync::{RetireMode, SyncTrigger};
use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;
use folderlink_core::types::NodeId;
use folderlink_entity::node::{Node, NodeChanges, Stage, slug};

use crate::policy::FolderSyncPolicy;
use crate::store::NodeStore;

/// Persists nodes and fires the folder-sync policy at the right points.
#[derive(Debug, Clone)]
pub struct NodeLifecycle {
    /// Node store.
    nodes: Arc<dyn NodeStore>,
    /// Folder-sync policy.
    policy: FolderSyncPolicy,
}

impl NodeLifecycle {
    /// Creates a new lifecycle pipeline.
    pub fn new(nodes: Arc<dyn NodeStore>, policy: FolderSyncPolicy) -> Self {
        Self { nodes, policy }
    }

    /// The folder-sync policy.
    pub fn policy(&self) -> &FolderSyncPolicy {
        &self.policy
    }

    /// Mutable access to the folder-sync policy.
    pub fn policy_mut(&mut self) -> &mut FolderSyncPolicy {
        &mut self.policy
    }

    /// Gets a node by ID, failing if it does not exist in `stage`.
    pub async fn get_node(&self, id: NodeId, stage: Stage) -> AppResult<Node> {
        self.nodes
            .find_by_id(id, stage)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Node {id} not found ({stage})")))
    }

    /// Write a node to the draft stage.
    ///
    /// The slug is trimmed, derived when empty and suffixed (`-2`, `-3`,
    /// ...) when a sibling already uses it. A failed folder sync restores
    /// the previously stored record.
    pub async fn write(&self, mut node: Node) -> AppResult<Node> {
        slug::ensure_slug(&mut node);
        slug::validate_slug(&node.slug)?;
        let stored = self.nodes.find_by_id(node.id, Stage::Draft).await?;
        self.check_parent(&node, stored.as_ref()).await?;
        self.dedupe_slug(&mut node).await?;

        let enabled = self.policy.is_enabled(&node);
        if enabled {
            self.policy.prepare_write(&mut node).await?;
        }

        let previous = self.nodes.save(&node, Stage::Draft).await?;
        let changes = NodeChanges::between(previous.as_ref(), &node);

        info!(
            node_id = %node.id,
            created = previous.is_none(),
            changed = ?changes.field_names(),
            "Node written"
        );

        if enabled && self.policy.config().trigger == SyncTrigger::OnWrite {
            if let Err(e) = self.policy.sync_folder(&node, &changes).await {
                self.restore(node.id, previous, Stage::Draft).await?;
                return Err(e);
            }
        }

        self.get_node(node.id, Stage::Draft).await
    }

    /// Copy a node's draft to the live stage.
    ///
    /// In soft-unpublish mode the folder is always resynced, which clears
    /// the deleted marker left by an earlier unpublish.
    pub async fn publish(&self, id: NodeId) -> AppResult<Node> {
        let draft = self.get_node(id, Stage::Draft).await?;
        let previous = self.nodes.save(&draft, Stage::Live).await?;

        info!(node_id = %id, first = previous.is_none(), "Node published");

        if self.policy.is_enabled(&draft) {
            let config = self.policy.config();
            let changes = match (config.trigger, config.retire) {
                (SyncTrigger::OnPublish, _) => {
                    Some(NodeChanges::between(previous.as_ref(), &draft))
                }
                (SyncTrigger::OnWrite, RetireMode::SoftUnpublish) => Some(NodeChanges::default()),
                (SyncTrigger::OnWrite, RetireMode::HardDelete) => None,
            };

            if let Some(changes) = changes {
                if let Err(e) = self.policy.sync_folder(&draft, &changes).await {
                    self.restore(id, previous, Stage::Live).await?;
                    return Err(e);
                }
            }
        }

        Ok(draft)
    }

    /// Remove a node from the live stage.
    pub async fn unpublish(&self, id: NodeId) -> AppResult<Node> {
        let live = self.get_node(id, Stage::Live).await?;

        if self.policy.is_enabled(&live)
            && self.policy.config().retire == RetireMode::SoftUnpublish
        {
            self.policy.retire_folder(&live).await?;
        }

        self.nodes.delete(id, Stage::Live).await?;
        info!(node_id = %id, "Node unpublished");
        Ok(live)
    }

    /// Permanently delete a node from both stages.
    pub async fn delete(&self, id: NodeId) -> AppResult<Node> {
        let node = match self.nodes.find_by_id(id, Stage::Draft).await? {
            Some(node) => node,
            None => self.get_node(id, Stage::Live).await?,
        };

        if self.policy.is_enabled(&node) && self.policy.config().retire == RetireMode::HardDelete
        {
            self.policy.retire_folder(&node).await?;
        }

        self.nodes.delete(id, Stage::Draft).await?;
        self.nodes.delete(id, Stage::Live).await?;
        info!(node_id = %id, "Node deleted");
        Ok(node)
    }

    /// The parent must not be the node or one of its descendants, and a
    /// newly chosen parent must exist. A parent that was already stored
    /// and has since been deleted is tolerated, so orphans stay writable.
    async fn check_parent(&self, node: &Node, stored: Option<&Node>) -> AppResult<()> {
        let Some(parent_id) = node.parent_id else {
            return Ok(());
        };
        let parent_unchanged = stored.is_some_and(|s| s.parent_id == Some(parent_id));

        let mut visited = HashSet::from([node.id]);
        let mut next = Some(parent_id);

        while let Some(id) = next {
            if !visited.insert(id) {
                return Err(AppError::validation(format!(
                    "Node {} cannot be placed below itself",
                    node.id
                )));
            }
            next = match self.nodes.find_by_id(id, Stage::Draft).await? {
                Some(ancestor) => ancestor.parent_id,
                None if id == parent_id && !parent_unchanged => {
                    return Err(AppError::not_found(format!("Parent node {id} not found")));
                }
                None => {
                    debug!(
                        node_id = %node.id,
                        missing = %id,
                        "Ancestor chain ends at a deleted node"
                    );
                    None
                }
            };
        }
        Ok(())
    }

    /// Suffix the slug when a sibling already uses it.
    async fn dedupe_slug(&self, node: &mut Node) -> AppResult<()> {
        let siblings = self.nodes.find_children(node.parent_id, Stage::Draft).await?;
        let taken: HashSet<&str> = siblings
            .iter()
            .filter(|s| s.id != node.id)
            .map(|s| s.slug.as_str())
            .collect();

        let unique = slug::unique_slug(&node.slug, &taken);
        if unique != node.slug {
            info!(
                node_id = %node.id,
                requested = %node.slug,
                slug = %unique,
                "Slug taken by a sibling, suffixed"
            );
            node.slug = unique;
        }
        Ok(())
    }

    /// Put back the record replaced by a write whose folder sync failed.
    async fn restore(&self, id: NodeId, previous: Option<Node>, stage: Stage) -> AppResult<()> {
        match previous {
            Some(previous) => {
                self.nodes.save(&previous, stage).await?;
            }
            None => {
                self.nodes.delete(id, stage).await?;
            }
        }
        warn!(node_id = %id, %stage, "Folder sync failed, node write rolled back");
        Ok(())
    }
}
