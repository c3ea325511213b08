//! CLI command definitions and dispatch.

pub mod config;
pub mod dir;
pub mod file;
pub mod init;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use fileshare_core::config::AppConfig;
use fileshare_core::error::AppError;
use fileshare_persistence::JsonFileGateway;
use fileshare_service::ShareContext;
use fileshare_storage::LocalStorageProvider;

/// FileShare: directory sharing with password-protected folders
#[derive(Debug, Parser)]
#[command(name = "fileshare", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fileshare.toml")]
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
    /// Create the state documents and the file store
    Init,
    /// Directory management
    Dir(dir::DirArgs),
    /// File management
    File(file::FileArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Init => init::execute(app_config).await,
            Commands::Dir(args) => dir::execute(args, app_config, self.format).await,
            Commands::File(args) => file::execute(args, app_config, self.format).await,
            Commands::Config(args) => config::execute(args, app_config, &self.config, self.format),
        }
    }
}

/// Helper: load persisted state and wire the services
pub async fn open_context(config: &AppConfig) -> Result<ShareContext, AppError> {
    let gateway = Arc::new(JsonFileGateway::from_config(&config.storage));
    let storage = Arc::new(LocalStorageProvider::new(&config.storage.filestore_path).await?);
    debug!(
        directories = %gateway.directories_path().display(),
        files = %gateway.files_path().display(),
        filestore = %storage.root().display(),
        "Opening FileShare state"
    );
    ShareContext::load(gateway, storage, config.policy.clone()).await
}
