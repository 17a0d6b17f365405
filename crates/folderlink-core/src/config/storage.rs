//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory that folder filenames are resolved against.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Prefix carried by every stored folder filename (e.g. `assets/`).
    ///
    /// Folder paths handed to find-or-make are relative to this prefix.
    #[serde(default = "default_assets_prefix")]
    pub assets_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            assets_prefix: default_assets_prefix(),
        }
    }
}

impl StorageConfig {
    /// The assets prefix normalized to exactly one trailing slash.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.assets_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_assets_prefix() -> String {
    "assets/".to_string()
}
