//! JSON state snapshots of the node and folder tables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use folderlink_core::error::{AppError, ErrorKind};
use folderlink_core::result::AppResult;
use folderlink_entity::folder::Folder;
use folderlink_entity::node::{Node, Stage};

use crate::repositories::{FolderRepository, NodeRepository};

const SNAPSHOT_VERSION: u32 = 1;

/// Serialized contents of both repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Draft node records.
    pub draft_nodes: Vec<Node>,
    /// Live node records.
    pub live_nodes: Vec<Node>,
    /// Folder records.
    pub folders: Vec<Folder>,
}

impl StateSnapshot {
    /// Read a snapshot from disk. A missing file yields an empty snapshot.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No state snapshot, starting empty");
                return Ok(Self {
                    version: SNAPSHOT_VERSION,
                    ..Self::default()
                });
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read state snapshot: {}", path.display()),
                    e,
                ));
            }
        };

        let snapshot: Self = serde_json::from_str(&raw)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AppError::configuration(format!(
                "Unsupported state snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    /// Write the snapshot to disk via a temporary file and rename.
    pub async fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?).await?;
        fs::rename(&tmp, path).await?;

        info!(
            path = %path.display(),
            nodes = self.draft_nodes.len(),
            folders = self.folders.len(),
            "Saved state snapshot"
        );
        Ok(())
    }

    /// Capture the current contents of both repositories.
    pub async fn capture(nodes: &NodeRepository, folders: &FolderRepository) -> AppResult<Self> {
        Ok(Self {
            version: SNAPSHOT_VERSION,
            draft_nodes: nodes.find_all(Stage::Draft).await?,
            live_nodes: nodes.find_all(Stage::Live).await?,
            folders: folders.find_all().await?,
        })
    }

    /// Build repositories holding the snapshot's records.
    pub fn into_repositories(self) -> (NodeRepository, FolderRepository) {
        (
            NodeRepository::from_records(self.draft_nodes, self.live_nodes),
            FolderRepository::from_records(self.folders),
        )
    }
}
