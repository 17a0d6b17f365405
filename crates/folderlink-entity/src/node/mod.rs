//! Content node entities.

pub mod changes;
pub mod model;
pub mod slug;

pub use changes::{FieldChange, NodeChanges};
pub use model::{Node, Stage};
