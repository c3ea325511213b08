//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file overlaid with `FILESHARE__*` environment
//! variables. Each sub-module represents a logical configuration section.

pub mod logging;
pub mod policy;
pub mod storage;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::policy::PolicyConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Operation policy switches.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Persisted state and file store locations.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; every field has a default. Environment
    /// variables use the `FILESHARE` prefix and `__` as the section
    /// separator, e.g. `FILESHARE__POLICY__LINK_DIR_ADD=false`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(Path::new(path))
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("FILESHARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist.toml").expect("defaults");
        assert!(config.policy.link_dir_add);
        assert_eq!(config.storage.filestore_path, "./static");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fileshare.toml");
        std::fs::write(
            &path,
            "[policy]\nlink_dir_add = false\n\n[storage]\ndata_dir = \"/srv/share\"\n",
        )
        .expect("write");

        let config = AppConfig::load(path.to_str().expect("utf8")).expect("load");
        assert!(!config.policy.link_dir_add);
        assert_eq!(config.storage.data_dir, "/srv/share");
        assert_eq!(config.storage.files_file, "config-file.json");
    }
}
