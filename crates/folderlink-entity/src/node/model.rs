//! Node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folderlink_core::types::{FolderId, NodeId};

/// Storage stage of a node record.
///
/// Drafts are what editors write; the live stage holds the published copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Editable working copy.
    Draft,
    /// Published copy.
    Live,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// A content record in the hierarchical node tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Node type name, used to decide whether the node carries a folder.
    pub node_type: String,
    /// Display title.
    pub title: String,
    /// URL-safe slug; doubles as the associated folder's name.
    pub slug: String,
    /// Parent node (None at the top level).
    pub parent_id: Option<NodeId>,
    /// The folder that lives and dies with this node.
    pub associated_folder_id: Option<FolderId>,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last written.
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a new top-level node with an empty slug.
    pub fn new(node_type: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::new(),
            node_type: node_type.into(),
            title: title.into(),
            slug: String::new(),
            parent_id: None,
            associated_folder_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the parent node.
    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Whether a folder has been associated with this node.
    pub fn has_association(&self) -> bool {
        self.associated_folder_id.is_some()
    }
}
