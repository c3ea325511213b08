//! File management CLI commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use fileshare_core::config::AppConfig;
use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::types::{ADD_TIME_FORMAT, DirectoryId, FileId};
use fileshare_entity::file::File;
use fileshare_service::Upload;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List file records
    List {
        /// Only files of this directory
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// List shared file records
    Shared {
        /// Only files of this directory
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Upload local files into a storage directory
    Upload {
        /// Target directory ID
        dir: String,
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Link external files into a link directory
    Link {
        /// Target directory ID
        dir: String,
        /// Paths to link; missing ones are skipped
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Rename a file
    Rename {
        /// File ID
        id: String,
        /// New name
        name: String,
    },
    /// Share or unshare a file
    Share {
        /// File ID
        id: String,
        /// Unshare instead
        #[arg(long)]
        off: bool,
    },
    /// Delete a file record (and its bytes, for storage directories)
    Delete {
        /// File ID
        id: String,
    },
    /// Copy a file's contents to a local path
    Download {
        /// File ID
        id: String,
        /// Destination path (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only allow shared files
        #[arg(long)]
        shared: bool,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Size in bytes
    size: u64,
    /// Type
    #[tabled(rename = "type")]
    file_type: String,
    /// Added at
    added: String,
    /// Shared
    shared: bool,
    /// Directory ID
    directory: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            size: f.size,
            file_type: f.file_type.clone(),
            added: f.add_time.format(ADD_TIME_FORMAT).to_string(),
            shared: f.is_shared,
            directory: f.directory_id.to_string(),
        }
    }
}

fn print_files(files: &[File], format: OutputFormat) {
    let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
    output::print_rows(&rows, files, format);
}

/// Read local files into uploads, keeping their file names.
async fn read_uploads(paths: &[PathBuf]) -> Result<Vec<Upload>, AppError> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?;
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read {}", path.display()),
                e,
            )
        })?;
        uploads.push(Upload::new(name, Bytes::from(data)));
    }
    Ok(uploads)
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::open_context(config).await?;

    match &args.command {
        FileCommand::List { dir } => {
            let dir = dir.as_deref().map(DirectoryId::from);
            print_files(&ctx.files().list(dir.as_ref()).await, format);
        }
        FileCommand::Shared { dir } => {
            let dir = dir.as_deref().map(DirectoryId::from);
            print_files(&ctx.files().list_shared(dir.as_ref()).await, format);
        }
        FileCommand::Upload { dir, paths } => {
            let uploads = read_uploads(paths).await?;
            let files = ctx
                .uploads()
                .upload_files(&DirectoryId::from(dir.as_str()), uploads)
                .await?;
            print_files(&files, format);
        }
        FileCommand::Link { dir, paths } => {
            let files = ctx
                .uploads()
                .link_files(&DirectoryId::from(dir.as_str()), paths.clone())
                .await?;
            if files.len() < paths.len() {
                output::print_warning(&format!(
                    "{} of {} path(s) skipped",
                    paths.len() - files.len(),
                    paths.len()
                ));
            }
            print_files(&files, format);
        }
        FileCommand::Rename { id, name } => {
            ctx.files().rename(&FileId::from(id.as_str()), name).await?;
            output::print_success(&format!("File {id} renamed to '{name}'"));
        }
        FileCommand::Share { id, off } => {
            ctx.files().set_shared(&FileId::from(id.as_str()), !off).await?;
            let state = if *off { "unshared" } else { "shared" };
            output::print_success(&format!("File {id} {state}"));
        }
        FileCommand::Delete { id } => {
            let file = ctx.files().delete(&FileId::from(id.as_str())).await?;
            output::print_success(&format!("File '{}' deleted", file.name));
        }
        FileCommand::Download { id, output: dest, shared } => {
            let id = FileId::from(id.as_str());
            let downloads = ctx.downloads();
            let result = if *shared {
                downloads.download_shared_file(&id).await?
            } else {
                downloads.download_file(&id).await?
            };

            let dest = dest.clone().unwrap_or_else(|| PathBuf::from(&result.file.name));
            tokio::fs::write(&dest, &result.data).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write {}", dest.display()),
                    e,
                )
            })?;
            output::print_success(&format!(
                "Saved '{}' ({} bytes) to {}",
                result.file.name,
                result.data.len(),
                dest.display()
            ));
        }
    }

    Ok(())
}
