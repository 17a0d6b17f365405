//! Node repository implementation.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use folderlink_core::result::AppResult;
use folderlink_core::types::{FolderId, NodeId};
use folderlink_entity::node::{Node, Stage};

/// Repository for node records, kept separately per stage.
#[derive(Debug, Default)]
pub struct NodeRepository {
    draft: RwLock<BTreeMap<NodeId, Node>>,
    live: RwLock<BTreeMap<NodeId, Node>>,
}

impl NodeRepository {
    /// Create an empty node repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with draft and live records.
    pub fn from_records(draft: Vec<Node>, live: Vec<Node>) -> Self {
        Self {
            draft: RwLock::new(draft.into_iter().map(|n| (n.id, n)).collect()),
            live: RwLock::new(live.into_iter().map(|n| (n.id, n)).collect()),
        }
    }

    fn table(&self, stage: Stage) -> &RwLock<BTreeMap<NodeId, Node>> {
        match stage {
            Stage::Draft => &self.draft,
            Stage::Live => &self.live,
        }
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>> {
        Ok(self.table(stage).read().await.get(&id).cloned())
    }

    /// List direct children of a node (top-level nodes for `None`),
    /// ordered by title.
    pub async fn find_children(
        &self,
        parent_id: Option<NodeId>,
        stage: Stage,
    ) -> AppResult<Vec<Node>> {
        let mut children: Vec<Node> = self
            .table(stage)
            .read()
            .await
            .values()
            .filter(|n| n.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(children)
    }

    /// Find the node associated with a folder.
    pub async fn find_by_folder(
        &self,
        folder_id: FolderId,
        stage: Stage,
    ) -> AppResult<Option<Node>> {
        Ok(self
            .table(stage)
            .read()
            .await
            .values()
            .find(|n| n.associated_folder_id == Some(folder_id))
            .cloned())
    }

    /// List every node in a stage.
    pub async fn find_all(&self, stage: Stage) -> AppResult<Vec<Node>> {
        Ok(self.table(stage).read().await.values().cloned().collect())
    }

    /// Insert or replace a node, returning the previously stored version.
    pub async fn save(&self, node: &Node, stage: Stage) -> AppResult<Option<Node>> {
        let mut record = node.clone();
        record.updated_at = Utc::now();
        Ok(self.table(stage).write().await.insert(record.id, record))
    }

    /// Remove a node, returning it if it existed.
    pub async fn delete(&self, id: NodeId, stage: Stage) -> AppResult<Option<Node>> {
        Ok(self.table(stage).write().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_returns_previous() {
        let repo = NodeRepository::new();
        let mut node = Node::new("Page", "Photos").with_slug("photos");

        assert!(repo.save(&node, Stage::Draft).await.unwrap().is_none());

        node.title = "Pictures".to_string();
        let previous = repo.save(&node, Stage::Draft).await.unwrap().unwrap();
        assert_eq!(previous.title, "Photos");

        let stored = repo.find_by_id(node.id, Stage::Draft).await.unwrap().unwrap();
        assert_eq!(stored.title, "Pictures");
    }

    #[tokio::test]
    async fn test_stages_are_independent() {
        let repo = NodeRepository::new();
        let node = Node::new("Page", "Photos");
        repo.save(&node, Stage::Draft).await.unwrap();

        assert!(repo.find_by_id(node.id, Stage::Live).await.unwrap().is_none());
        repo.save(&node, Stage::Live).await.unwrap();
        repo.delete(node.id, Stage::Draft).await.unwrap();
        assert!(repo.find_by_id(node.id, Stage::Live).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_children() {
        let repo = NodeRepository::new();
        let parent = Node::new("Page", "Gallery");
        let b = Node::new("Page", "Beta").with_parent(parent.id);
        let a = Node::new("Page", "Alpha").with_parent(parent.id);
        let other = Node::new("Page", "Other");
        for n in [&parent, &b, &a, &other] {
            repo.save(n, Stage::Draft).await.unwrap();
        }

        let children = repo.find_children(Some(parent.id), Stage::Draft).await.unwrap();
        let titles: Vec<_> = children.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);

        let top = repo.find_children(None, Stage::Draft).await.unwrap();
        let titles: Vec<_> = top.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Gallery", "Other"]);
    }

    #[tokio::test]
    async fn test_find_by_folder() {
        let repo = NodeRepository::new();
        let folder_id = FolderId::new();
        let mut owner = Node::new("Page", "Photos");
        owner.associated_folder_id = Some(folder_id);
        repo.save(&owner, Stage::Draft).await.unwrap();
        repo.save(&Node::new("Page", "Other"), Stage::Draft)
            .await
            .unwrap();

        let found = repo.find_by_folder(folder_id, Stage::Draft).await.unwrap();
        assert_eq!(found.map(|n| n.id), Some(owner.id));
        assert!(
            repo.find_by_folder(FolderId::new(), Stage::Draft)
                .await
                .unwrap()
                .is_none()
        );
    }
}
