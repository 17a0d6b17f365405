//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folderlink_core::types::FolderId;

/// A filesystem-backed folder record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Parent folder ID (null for top-level folders).
    pub parent_id: Option<FolderId>,
    /// Directory name on disk.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Stored filename including the assets prefix and a trailing slash
    /// (e.g., `assets/associated-folders/photos/`).
    pub filename: String,
    /// Depth in the folder tree (0 for top-level).
    pub depth: i32,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// The filename with `prefix` removed from the front, without the
    /// trailing slash.
    ///
    /// Only a leading prefix is stripped; a nested directory that happens to
    /// share the prefix's name is kept.
    pub fn relative_path(&self, prefix: &str) -> &str {
        self.filename
            .strip_prefix(prefix)
            .unwrap_or(&self.filename)
            .trim_end_matches('/')
    }

    /// Filename of a child folder called `name`.
    pub fn child_filename(&self, name: &str) -> String {
        format!("{}{}/", self.filename, name)
    }

    /// Whether `other` lives somewhere below this folder.
    pub fn is_ancestor_of(&self, other: &Folder) -> bool {
        other.filename.len() > self.filename.len() && other.filename.starts_with(&self.filename)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Parent folder (None for top-level).
    pub parent_id: Option<FolderId>,
    /// Directory name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Stored filename.
    pub filename: String,
    /// Depth in the tree.
    pub depth: i32,
}

impl CreateFolder {
    /// Describe a folder called `name` under `parent`, or at the top level
    /// under `prefix`. The title starts out equal to the name.
    pub fn under(parent: Option<&Folder>, name: &str, prefix: &str) -> Self {
        let (filename, depth) = match parent {
            Some(p) => (p.child_filename(name), p.depth + 1),
            None => (format!("{prefix}{name}/"), 0),
        };
        Self {
            parent_id: parent.map(|p| p.id),
            name: name.to_string(),
            title: name.to_string(),
            filename,
            depth,
        }
    }

    /// Materialize the record with a fresh id.
    pub fn into_folder(self) -> Folder {
        let now = Utc::now();
        Folder {
            id: FolderId::new(),
            parent_id: self.parent_id,
            name: self.name,
            title: self.title,
            filename: self.filename,
            depth: self.depth,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(filename: &str) -> Folder {
        CreateFolder {
            parent_id: None,
            name: "x".to_string(),
            title: "x".to_string(),
            filename: filename.to_string(),
            depth: 0,
        }
        .into_folder()
    }

    #[test]
    fn test_relative_path_strips_leading_prefix_only() {
        let f = folder("assets/associated-folders/assets/photos/");
        assert_eq!(f.relative_path("assets/"), "associated-folders/assets/photos");
    }

    #[test]
    fn test_under_parent() {
        let parent = folder("assets/associated-folders/");
        let child = CreateFolder::under(Some(&parent), "photos", "assets/");
        assert_eq!(child.filename, "assets/associated-folders/photos/");
        assert_eq!(child.depth, 1);
        assert_eq!(child.parent_id, Some(parent.id));
        assert_eq!(child.title, "photos");
    }

    #[test]
    fn test_is_ancestor_of() {
        let a = folder("assets/a/");
        let ab = folder("assets/a/b/");
        let abc = folder("assets/abc/");
        assert!(a.is_ancestor_of(&ab));
        assert!(!a.is_ancestor_of(&abc));
        assert!(!a.is_ancestor_of(&a));
    }
}
