//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use folderlink_core::config::AppConfig;
use folderlink_core::types::{FolderId, NodeId};
use folderlink_database::repositories::{FolderRepository, NodeRepository};
use folderlink_entity::folder::Folder;
use folderlink_entity::node::{Node, Stage};
use folderlink_service::{AppServices, ExtensionRegistry, FolderStore};
use folderlink_storage::LocalStorageProvider;

/// Node type that carries the folder association in tests.
pub const ENABLED: &str = "Page";
/// Node type that does not.
pub const PLAIN: &str = "Record";

/// Test application context
pub struct TestApp {
    /// Wired services
    pub services: AppServices,
    /// Configuration the services were built with
    pub config: AppConfig,
    /// Storage root, removed on drop
    pub dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a test application with default settings
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the configuration
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.data_root = dir.path().to_string_lossy().to_string();
        config.state.path = dir.path().join("state.json").to_string_lossy().to_string();
        config.sync.directory_mode = 0o755;
        config.sync.extended_node_types = vec![ENABLED.to_string()];
        adjust(&mut config);

        let storage = LocalStorageProvider::new(&config.storage.data_root)
            .await
            .expect("Failed to init storage");

        let services = AppServices::build(
            &config,
            Arc::new(NodeRepository::new()),
            Arc::new(FolderRepository::new()),
            Arc::new(storage),
            Arc::new(ExtensionRegistry::from_config(&config.sync)),
        );

        Self {
            services,
            config,
            dir,
        }
    }

    /// Write a new enabled node
    pub async fn page(&self, title: &str, slug: &str, parent: Option<NodeId>) -> Node {
        self.create(ENABLED, title, slug, parent).await
    }

    /// Write a new node that does not carry the policy
    pub async fn record(&self, title: &str, slug: &str, parent: Option<NodeId>) -> Node {
        self.create(PLAIN, title, slug, parent).await
    }

    async fn create(&self, node_type: &str, title: &str, slug: &str, parent: Option<NodeId>) -> Node {
        let mut node = Node::new(node_type, title).with_slug(slug);
        node.parent_id = parent;
        self.services
            .lifecycle
            .write(node)
            .await
            .expect("Failed to write node")
    }

    /// Re-read a draft node
    pub async fn node(&self, id: NodeId) -> Option<Node> {
        self.services
            .nodes
            .find_by_id(id, Stage::Draft)
            .await
            .expect("Failed to read node")
    }

    /// Read a folder record
    pub async fn folder(&self, id: FolderId) -> Option<Folder> {
        self.services
            .folders
            .find_by_id(id)
            .await
            .expect("Failed to read folder")
    }

    /// The folder associated with a node (panics if none)
    pub async fn folder_of(&self, node: &Node) -> Folder {
        let id = node
            .associated_folder_id
            .expect("node has no associated folder");
        self.folder(id).await.expect("associated folder missing")
    }

    /// The folder at a filename, if any
    pub async fn folder_at(&self, filename: &str) -> Option<Folder> {
        self.services
            .folder_repo
            .find_by_filename(filename)
            .await
            .expect("Failed to query folder")
    }

    /// Number of folder records
    pub async fn folder_count(&self) -> u64 {
        self.services
            .folder_repo
            .count()
            .await
            .expect("Failed to count folders")
    }

    /// Absolute path of a stored filename
    pub fn disk(&self, filename: &str) -> PathBuf {
        self.dir.path().join(filename)
    }
}
