//! Folder-sync policy configuration.

use serde::{Deserialize, Serialize};

/// Which lifecycle event pushes node state into the associated folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    /// Sync right after every draft write.
    #[default]
    OnWrite,
    /// Sync after the node is published to the live stage.
    OnPublish,
}

/// What happens to the associated folder when its node goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetireMode {
    /// Before deletion: cascade to enabled children, then delete the folder.
    #[default]
    HardDelete,
    /// Before unpublish: rename the folder with the deleted suffix.
    SoftUnpublish,
}

/// Configuration for the folder-sync policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Folder that associations attach under when no enabled ancestor exists.
    #[serde(default = "default_root_folder")]
    pub default_root_folder: String,
    /// When folder title, name and parent are synced.
    #[serde(default)]
    pub trigger: SyncTrigger,
    /// How folders are retired.
    #[serde(default)]
    pub retire: RetireMode,
    /// Suffix appended to a folder name by soft retirement.
    #[serde(default = "default_deleted_suffix")]
    pub deleted_suffix: String,
    /// Recreate a folder's directory on write when the record exists but
    /// the directory does not.
    #[serde(default)]
    pub repair_missing_directories: bool,
    /// Permission mask for directories created by the policy.
    #[serde(default = "default_directory_mode")]
    pub directory_mode: u32,
    /// Node types that carry the folder association.
    #[serde(default = "default_extended_node_types")]
    pub extended_node_types: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_root_folder: default_root_folder(),
            trigger: SyncTrigger::default(),
            retire: RetireMode::default(),
            deleted_suffix: default_deleted_suffix(),
            repair_missing_directories: false,
            directory_mode: default_directory_mode(),
            extended_node_types: default_extended_node_types(),
        }
    }
}

fn default_root_folder() -> String {
    "associated-folders".to_string()
}

fn default_deleted_suffix() -> String {
    "__deleted".to_string()
}

fn default_directory_mode() -> u32 {
    0o2775
}

fn default_extended_node_types() -> Vec<String> {
    vec!["Page".to_string()]
}
