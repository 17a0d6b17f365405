//! Content node CLI commands.

use std::collections::HashSet;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use folderlink_core::config::AppConfig;
use folderlink_core::error::AppError;
use folderlink_core::types::NodeId;
use folderlink_entity::node::{Node, Stage};

/// Arguments for node commands
#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Node subcommand
    #[command(subcommand)]
    pub command: NodeCommand,
}

/// Node subcommands
#[derive(Debug, Subcommand)]
pub enum NodeCommand {
    /// Create a node in the draft stage
    Create {
        /// Node title
        #[arg(short, long)]
        title: String,
        /// URL slug (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,
        /// Parent node ID (omit for a top-level node)
        #[arg(short, long)]
        parent: Option<String>,
        /// Node type
        #[arg(short, long, default_value = "Page")]
        node_type: String,
    },
    /// Change a node's title or slug
    Update {
        /// Node ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New slug
        #[arg(short, long)]
        slug: Option<String>,
    },
    /// Move a node under another parent
    Move {
        /// Node ID
        id: String,
        /// New parent node ID (omit to move to the top level)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Copy a node's draft to the live stage
    Publish {
        /// Node ID
        id: String,
    },
    /// Remove a node from the live stage
    Unpublish {
        /// Node ID
        id: String,
    },
    /// Delete a node from both stages
    Delete {
        /// Node ID
        id: String,
    },
    /// List draft nodes
    List,
}

/// Node display row
#[derive(Debug, Serialize, Tabled)]
struct NodeRow {
    /// Node ID
    id: String,
    /// Node type
    #[tabled(rename = "type")]
    node_type: String,
    /// Title
    title: String,
    /// Slug
    slug: String,
    /// Parent ID
    parent: String,
    /// Associated folder ID
    folder: String,
    /// Whether a live copy exists
    live: bool,
    /// Updated at
    updated_at: String,
}

impl NodeRow {
    fn new(node: &Node, live: bool) -> Self {
        Self {
            id: node.id.to_string(),
            node_type: node.node_type.clone(),
            title: node.title.clone(),
            slug: node.slug.clone(),
            parent: node
                .parent_id
                .map(|p| p.short())
                .unwrap_or_else(|| "-".to_string()),
            folder: node
                .associated_folder_id
                .map(|f| f.short())
                .unwrap_or_else(|| "-".to_string()),
            live,
            updated_at: node.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute node commands
pub async fn execute(
    args: &NodeArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;
    let lifecycle = &services.lifecycle;

    match &args.command {
        NodeCommand::Create {
            title,
            slug,
            parent,
            node_type,
        } => {
            let mut node = Node::new(node_type.as_str(), title.as_str());
            if let Some(slug) = slug {
                node.slug = slug.clone();
            }
            node.parent_id = parent
                .as_deref()
                .map(|p| super::parse_id::<NodeId>(p, "parent"))
                .transpose()?;

            let node = lifecycle.write(node).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' created (id: {})", node.title, node.id));
            output::print_row(&NodeRow::new(&node, false), format);
        }
        NodeCommand::Update { id, title, slug } => {
            let id = super::parse_id::<NodeId>(id, "node")?;
            let mut node = lifecycle.get_node(id, Stage::Draft).await?;
            if let Some(title) = title {
                node.title = title.clone();
            }
            if let Some(slug) = slug {
                node.slug = slug.clone();
            }

            let node = lifecycle.write(node).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' updated", node.title));
            output::print_row(&NodeRow::new(&node, is_live(&services, id).await?), format);
        }
        NodeCommand::Move { id, parent } => {
            let id = super::parse_id::<NodeId>(id, "node")?;
            let mut node = lifecycle.get_node(id, Stage::Draft).await?;
            node.parent_id = parent
                .as_deref()
                .map(|p| super::parse_id::<NodeId>(p, "parent"))
                .transpose()?;

            let node = lifecycle.write(node).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' moved", node.title));
            output::print_row(&NodeRow::new(&node, is_live(&services, id).await?), format);
        }
        NodeCommand::Publish { id } => {
            let id = super::parse_id::<NodeId>(id, "node")?;
            let node = lifecycle.publish(id).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' published", node.title));
        }
        NodeCommand::Unpublish { id } => {
            let id = super::parse_id::<NodeId>(id, "node")?;
            let node = lifecycle.unpublish(id).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' unpublished", node.title));
        }
        NodeCommand::Delete { id } => {
            let id = super::parse_id::<NodeId>(id, "node")?;
            let node = lifecycle.delete(id).await?;
            services.persist(config).await?;

            output::print_success(&format!("Node '{}' deleted", node.title));
        }
        NodeCommand::List => {
            let live: HashSet<NodeId> = services
                .nodes
                .find_all(Stage::Live)
                .await?
                .into_iter()
                .map(|n| n.id)
                .collect();

            let rows: Vec<NodeRow> = services
                .nodes
                .find_all(Stage::Draft)
                .await?
                .iter()
                .map(|n| NodeRow::new(n, live.contains(&n.id)))
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}

async fn is_live(
    services: &folderlink_service::AppServices,
    id: NodeId,
) -> Result<bool, AppError> {
    Ok(services.nodes.find_by_id(id, Stage::Live).await?.is_some())
}
