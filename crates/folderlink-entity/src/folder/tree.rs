//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use folderlink_core::types::FolderId;

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Stored filename.
    pub filename: String,
    /// Depth level.
    pub depth: i32,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

/// A complete folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Build a tree from a flat list of folders. Children are sorted by name.
    pub fn from_folders(folders: &[Folder]) -> Self {
        let mut roots: Vec<FolderNode> = folders
            .iter()
            .filter(|f| f.parent_id.is_none())
            .map(|f| build_node(f, folders))
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            roots,
            total_folders: folders.len() as u64,
        }
    }

    /// Render as indented text, one folder per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            render_node(root, 0, &mut out);
        }
        out
    }
}

fn build_node(folder: &Folder, all_folders: &[Folder]) -> FolderNode {
    let mut children: Vec<FolderNode> = all_folders
        .iter()
        .filter(|f| f.parent_id == Some(folder.id))
        .map(|child| build_node(child, all_folders))
        .collect();
    children.sort_by(|a, b| a.name.cmp(&b.name));

    FolderNode {
        id: folder.id,
        name: folder.name.clone(),
        title: folder.title.clone(),
        filename: folder.filename.clone(),
        depth: folder.depth,
        children,
    }
}

fn render_node(node: &FolderNode, indent: usize, out: &mut String) {
    out.push_str(&"  ".repeat(indent));
    out.push_str(&node.name);
    out.push('/');
    if node.title != node.name {
        out.push_str(&format!("  ({})", node.title));
    }
    out.push('\n');
    for child in &node.children {
        render_node(child, indent + 1, out);
    }
}
