//! Folder domain entities.

pub mod model;
pub mod path;
pub mod tree;

pub use model::{CreateFolder, Folder};
pub use tree::{FolderNode, FolderTree};
