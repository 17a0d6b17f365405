//! Field-level change tracking between two persisted states of a node.

use serde::{Deserialize, Serialize};

use folderlink_core::types::NodeId;

use super::model::Node;

/// A single field's value before and after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange<T> {
    /// Value in the previous persisted state.
    pub before: T,
    /// Value in the new state.
    pub after: T,
}

/// The folder-relevant fields that differ between two node states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeChanges {
    /// Title change, if any.
    pub title: Option<FieldChange<String>>,
    /// Slug change, if any.
    pub slug: Option<FieldChange<String>>,
    /// Parent change, if any.
    pub parent_id: Option<FieldChange<Option<NodeId>>>,
}

impl NodeChanges {
    /// Compare `current` against the previously persisted state.
    ///
    /// With no previous state every non-empty field counts as changed, so a
    /// first write under a parent reports a parent change from `None`.
    pub fn between(previous: Option<&Node>, current: &Node) -> Self {
        let (title, slug, parent_id) = match previous {
            Some(prev) => (prev.title.clone(), prev.slug.clone(), prev.parent_id),
            None => (String::new(), String::new(), None),
        };

        Self {
            title: diff(title, current.title.clone()),
            slug: diff(slug, current.slug.clone()),
            parent_id: diff(parent_id, current.parent_id),
        }
    }

    /// Whether the parent reference changed.
    pub fn parent_changed(&self) -> bool {
        self.parent_id.is_some()
    }

    /// The new parent, if the parent changed.
    pub fn new_parent(&self) -> Option<Option<NodeId>> {
        self.parent_id.as_ref().map(|c| c.after)
    }

    /// Whether nothing folder-relevant changed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.parent_id.is_none()
    }

    /// Names of the changed fields, for logging.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("title");
        }
        if self.slug.is_some() {
            names.push("slug");
        }
        if self.parent_id.is_some() {
            names.push("parent_id");
        }
        names
    }
}

fn diff<T: PartialEq>(before: T, after: T) -> Option<FieldChange<T>> {
    if before == after {
        None
    } else {
        Some(FieldChange { before, after })
    }
}
