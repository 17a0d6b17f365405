//! Repository implementations for all Folderlink entities.

pub mod folder;
pub mod node;

pub use folder::FolderRepository;
pub use node::NodeRepository;
