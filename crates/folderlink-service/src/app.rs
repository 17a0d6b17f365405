//! Wiring of repositories, storage and services into one bundle.

use std::sync::Arc;

use folderlink_core::config::AppConfig;
use folderlink_core::result::AppResult;
use folderlink_core::traits::StorageProvider;
use folderlink_database::repositories::{FolderRepository, NodeRepository};
use folderlink_database::StateSnapshot;
use folderlink_storage::LocalStorageProvider;

use crate::capability::{CapabilityCheck, ExtensionRegistry};
use crate::folder::{FolderService, TreeService};
use crate::lifecycle::NodeLifecycle;
use crate::policy::FolderSyncPolicy;
use crate::store::{FolderStore, NodeStore};

/// All services needed to run node lifecycles against one state.
#[derive(Debug, Clone)]
pub struct AppServices {
    /// Node repository.
    pub nodes: Arc<NodeRepository>,
    /// Folder repository.
    pub folder_repo: Arc<FolderRepository>,
    /// Folder service (records plus directories).
    pub folders: Arc<FolderService>,
    /// Folder tree queries.
    pub tree: TreeService,
    /// Node lifecycle pipeline.
    pub lifecycle: NodeLifecycle,
}

impl AppServices {
    /// Build services over existing repositories and storage.
    pub fn build(
        config: &AppConfig,
        nodes: Arc<NodeRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<dyn StorageProvider>,
        capability: Arc<dyn CapabilityCheck>,
    ) -> Self {
        let folders = Arc::new(FolderService::new(
            folder_repo.clone(),
            storage.clone(),
            &config.storage,
            config.sync.directory_mode,
        ));
        let node_store: Arc<dyn NodeStore> = nodes.clone();
        let folder_store: Arc<dyn FolderStore> = folders.clone();

        let policy = FolderSyncPolicy::new(
            node_store.clone(),
            folder_store,
            storage,
            capability,
            config.sync.clone(),
        );

        Self {
            nodes,
            tree: TreeService::new(folder_repo.clone()),
            folder_repo,
            folders,
            lifecycle: NodeLifecycle::new(node_store, policy),
        }
    }

    /// Build services from configuration: local storage under the data
    /// root, repositories restored from the state snapshot, and the
    /// extension registry from the sync settings.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let storage = Arc::new(LocalStorageProvider::new(&config.storage.data_root).await?);
        let snapshot = StateSnapshot::load(std::path::Path::new(&config.state.path)).await?;
        let (nodes, folder_repo) = snapshot.into_repositories();

        Ok(Self::build(
            config,
            Arc::new(nodes),
            Arc::new(folder_repo),
            storage,
            Arc::new(ExtensionRegistry::from_config(&config.sync)),
        ))
    }

    /// Write the current repositories back to the state snapshot.
    pub async fn persist(&self, config: &AppConfig) -> AppResult<()> {
        StateSnapshot::capture(&self.nodes, &self.folder_repo)
            .await?
            .save(std::path::Path::new(&config.state.path))
            .await
    }
}
