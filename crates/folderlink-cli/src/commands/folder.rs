//! Associated folder CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use folderlink_core::config::AppConfig;
use folderlink_core::error::AppError;
use folderlink_core::types::FolderId;
use folderlink_service::FolderStore;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the folder tree
    Tree,
    /// Show one folder with its breadcrumb trail
    Show {
        /// Folder ID
        id: String,
    },
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;

    match &args.command {
        FolderCommand::Tree => {
            let tree = services.tree.get_tree().await?;
            match format {
                OutputFormat::Json => output::print_item(&tree, format),
                OutputFormat::Table if tree.roots.is_empty() => println!("No folders."),
                OutputFormat::Table => {
                    print!("{}", tree.render());
                    println!("({} folders)", tree.total_folders);
                }
            }
        }
        FolderCommand::Show { id } => {
            let id = super::parse_id::<FolderId>(id, "folder")?;
            let folder = services.folders.get_folder(id).await?;

            if format == OutputFormat::Json {
                output::print_item(&folder, format);
                return Ok(());
            }

            let trail = services.tree.get_breadcrumbs(id).await?;
            let trail = trail
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(" > ");
            let on_disk = services.folders.filesystem_path(&folder);

            output::print_kv("ID", &folder.id.to_string());
            output::print_kv("Name", &folder.name);
            output::print_kv("Title", &folder.title);
            output::print_kv("Filename", &folder.filename);
            output::print_kv("Depth", &folder.depth.to_string());
            output::print_kv("Breadcrumbs", &trail);
            output::print_kv("Path", &on_disk.display().to_string());
            output::print_kv(
                "Updated",
                &folder.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            );

            if !services.folders.directory_exists(&folder).await? {
                output::print_warning("Directory is missing on disk");
            }
        }
    }

    Ok(())
}
