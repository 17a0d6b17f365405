//! # folderlink-service
//!
//! Business logic for Folderlink. The [`FolderSyncPolicy`] keeps a
//! filesystem folder in step with a content node; [`NodeLifecycle`]
//! drives it from the node persistence pipeline.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod app;
pub mod capability;
pub mod folder;
pub mod lifecycle;
pub mod policy;
pub mod store;

pub use app::AppServices;
pub use capability::{CapabilityCheck, ExtensionRegistry};
pub use folder::{FolderService, TreeService};
pub use lifecycle::NodeLifecycle;
pub use policy::FolderSyncPolicy;
pub use store::{FolderStore, NodeStore};
