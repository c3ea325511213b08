//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use fileshare_core::config::AppConfig;
use fileshare_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => print_summary(config),
        },
        ConfigCommand::Validate => {
            if let Err(e) = validate(config) {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            print_summary(config);
        }
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    output::print_kv("Link directories", &config.policy.link_dir_add.to_string());
    output::print_kv(
        "Directories file",
        &config.storage.directories_path().display().to_string(),
    );
    output::print_kv("Files file", &config.storage.files_path().display().to_string());
    output::print_kv("File store", &config.storage.filestore_path);
    output::print_kv(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}

/// Checks that loading alone cannot catch.
fn validate(config: &AppConfig) -> Result<(), AppError> {
    if config.storage.directories_file.trim().is_empty() || config.storage.files_file.trim().is_empty() {
        return Err(AppError::configuration("State document names must not be empty"));
    }
    if config.storage.directories_path() == config.storage.files_path() {
        return Err(AppError::configuration(
            "Directories and files must be stored in different documents",
        ));
    }
    if config.storage.filestore_path.trim().is_empty() {
        return Err(AppError::configuration("File store path must not be empty"));
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        return Err(AppError::configuration(format!(
            "Unknown log format '{}', expected 'json' or 'pretty'",
            config.logging.format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_same_document_for_both_collections_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.files_file = config.storage.directories_file.clone();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate(&config).is_err());
    }
}
