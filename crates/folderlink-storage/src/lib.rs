//! # folderlink-storage
//!
//! Filesystem provider implementations for Folderlink. Folder records are
//! mirrored as directories under the provider root.

pub mod providers;

pub use providers::local::LocalStorageProvider;
