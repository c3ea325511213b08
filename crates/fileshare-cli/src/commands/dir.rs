//! Directory management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use fileshare_core::config::AppConfig;
use fileshare_core::error::AppError;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::{DirType, Directory};
use fileshare_service::CreateDirectoryRequest;

/// Arguments for directory commands
#[derive(Debug, Args)]
pub struct DirArgs {
    /// Directory subcommand
    #[command(subcommand)]
    pub command: DirCommand,
}

/// Directory subcommands
#[derive(Debug, Subcommand)]
pub enum DirCommand {
    /// Show the whole directory tree
    List,
    /// Show the tree as visitors see it
    Shared,
    /// Create a directory
    Create {
        /// Directory name
        name: String,
        /// Parent directory ID (omit for a root)
        #[arg(short, long)]
        parent: Option<String>,
        /// Create a link directory instead of a storage directory
        #[arg(short, long)]
        link: bool,
    },
    /// Rename a directory
    Rename {
        /// Directory ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a directory, its subdirectories and all their files
    Delete {
        /// Directory ID
        id: String,
    },
    /// Share or unshare a directory
    Share {
        /// Directory ID
        id: String,
        /// Unshare instead
        #[arg(long)]
        off: bool,
    },
    /// Set a directory password; omit it to clear
    Password {
        /// Directory ID
        id: String,
        /// New password
        password: Option<String>,
    },
    /// Check a password against a directory
    Verify {
        /// Directory ID
        id: String,
        /// Password to check
        #[arg(default_value = "")]
        password: String,
    },
}

/// Directory display row
#[derive(Debug, Serialize, Tabled)]
struct DirRow {
    /// Directory ID
    id: String,
    /// Name, indented by depth
    name: String,
    /// Type
    #[tabled(rename = "type")]
    dir_type: String,
    /// Shared
    shared: bool,
    /// Password protected
    protected: bool,
}

/// Flatten a forest into indented rows, parents before children.
fn rows(forest: &[Directory]) -> Vec<DirRow> {
    fn walk(dirs: &[Directory], depth: usize, out: &mut Vec<DirRow>) {
        for dir in dirs {
            out.push(DirRow {
                id: dir.id.to_string(),
                name: format!("{}{}", "  ".repeat(depth), dir.name),
                dir_type: dir.dir_type.to_string(),
                shared: dir.is_shared,
                protected: dir.has_password(),
            });
            walk(&dir.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(forest, 0, &mut out);
    out
}

/// Execute directory commands
pub async fn execute(
    args: &DirArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config).await?;
    let dirs = ctx.directories();

    match &args.command {
        DirCommand::List => {
            let forest = dirs.list().await;
            output::print_rows(&rows(&forest), &forest, format);
        }
        DirCommand::Shared => {
            let forest = dirs.list_shared().await;
            output::print_rows(&rows(&forest), &forest, format);
        }
        DirCommand::Create { name, parent, link } => {
            let dir_type = if *link { DirType::Link } else { DirType::Storage };
            let req = CreateDirectoryRequest::new(name.clone(), parent.as_deref().map(DirectoryId::from))
                .with_type(dir_type);
            let dir = dirs.create(req).await?;
            match format {
                OutputFormat::Json => output::print_json(&dir),
                OutputFormat::Table => {
                    output::print_success(&format!("Directory '{}' created (id: {})", dir.name, dir.id));
                }
            }
        }
        DirCommand::Rename { id, name } => {
            dirs.rename(&DirectoryId::from(id.as_str()), name).await?;
            output::print_success(&format!("Directory {id} renamed to '{name}'"));
        }
        DirCommand::Delete { id } => {
            let deleted = dirs.delete(&DirectoryId::from(id.as_str())).await?;
            output::print_success(&format!(
                "Directory '{}' deleted with {} file(s)",
                deleted.directory.name,
                deleted.files.len()
            ));
        }
        DirCommand::Share { id, off } => {
            dirs.set_shared(&DirectoryId::from(id.as_str()), !off).await?;
            let state = if *off { "unshared" } else { "shared" };
            output::print_success(&format!("Directory {id} {state}"));
        }
        DirCommand::Password { id, password } => {
            let password = password.as_deref().unwrap_or_default();
            dirs.set_password(&DirectoryId::from(id.as_str()), password).await?;
            if password.is_empty() {
                output::print_success(&format!("Password of directory {id} cleared"));
            } else {
                output::print_success(&format!("Password of directory {id} set"));
            }
        }
        DirCommand::Verify { id, password } => {
            dirs.verify_password(&DirectoryId::from(id.as_str()), password).await?;
            output::print_success("Password accepted");
        }
    }

    Ok(())
}
