//! Core traits defined in `folderlink-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
