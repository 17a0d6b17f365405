//! Core type definitions used across the Folderlink workspace.

pub mod id;

pub use id::*;
