//! Which nodes carry the folder association.

use std::collections::HashSet;

use folderlink_core::config::sync::SyncConfig;
use folderlink_core::types::NodeId;
use folderlink_entity::node::Node;

/// Predicate deciding whether a node carries the folder-sync policy.
pub trait CapabilityCheck: Send + Sync + std::fmt::Debug + 'static {
    /// Whether `node` has an associated folder managed by the policy.
    fn is_enabled(&self, node: &Node) -> bool;
}

/// Registry of extended node types plus individually enabled nodes.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    node_types: HashSet<String>,
    node_ids: HashSet<NodeId>,
}

impl ExtensionRegistry {
    /// Create an empty registry; no node is enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry enabling the node types listed in the sync configuration.
    pub fn from_config(config: &SyncConfig) -> Self {
        let mut registry = Self::new();
        for node_type in &config.extended_node_types {
            registry.enable_type(node_type);
        }
        registry
    }

    /// Enable every node of `node_type`.
    pub fn enable_type(&mut self, node_type: impl Into<String>) -> &mut Self {
        self.node_types.insert(node_type.into());
        self
    }

    /// Enable one specific node regardless of its type.
    pub fn enable_node(&mut self, id: NodeId) -> &mut Self {
        self.node_ids.insert(id);
        self
    }
}

impl CapabilityCheck for ExtensionRegistry {
    fn is_enabled(&self, node: &Node) -> bool {
        self.node_types.contains(&node.node_type) || self.node_ids.contains(&node.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_enables_pages() {
        let registry = ExtensionRegistry::from_config(&SyncConfig::default());
        assert!(registry.is_enabled(&Node::new("Page", "Photos")));
        assert!(!registry.is_enabled(&Node::new("RedirectorPage", "Elsewhere")));
    }

    #[test]
    fn test_enable_single_node() {
        let mut registry = ExtensionRegistry::new();
        let node = Node::new("Record", "Invoice");
        assert!(!registry.is_enabled(&node));

        registry.enable_node(node.id);
        assert!(registry.is_enabled(&node));
        assert!(!registry.is_enabled(&Node::new("Record", "Other")));
    }
}
