//! Node persistence pipeline that invokes the folder-sync policy.

pub mod pipeline;

pub use pipeline::NodeLifecycle;
