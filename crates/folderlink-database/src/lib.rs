//! # folderlink-database
//!
//! Record storage for Folderlink. Node and folder tables are held in
//! memory behind async locks and persisted as a single JSON snapshot.

pub mod repositories;
pub mod snapshot;

pub use snapshot::StateSnapshot;
