//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;
pub mod node;

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use folderlink_core::config::AppConfig;
use folderlink_core::error::AppError;
use folderlink_service::AppServices;

/// Folderlink: keep a folder tree in step with a content tree
#[derive(Debug, Parser)]
#[command(name = "folderlink", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Content node lifecycle
    Node(node::NodeArgs),
    /// Associated folder inspection
    Folder(folder::FolderArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Node(args) => node::execute(args, config, self.format).await,
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, self.format).await,
        }
    }
}

/// Helper: restore services from the state snapshot
pub async fn open_services(config: &AppConfig) -> Result<AppServices, AppError> {
    AppServices::from_config(config).await
}

/// Helper: parse a typed ID argument
pub fn parse_id<T>(value: &str, what: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| AppError::validation(format!("Invalid {what} ID '{value}': {e}")))
}
