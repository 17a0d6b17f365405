//! Folder-sync policy.

pub mod folder_sync;

pub use folder_sync::FolderSyncPolicy;
