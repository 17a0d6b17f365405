//! # folderlink-entity
//!
//! Domain entity models for Folderlink. Every struct in this crate is a
//! stored record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod folder;
pub mod node;
