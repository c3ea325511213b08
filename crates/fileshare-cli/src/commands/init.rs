//! `init`: prepare a fresh instance.

use crate::output;
use fileshare_core::config::AppConfig;
use fileshare_core::error::AppError;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_persistence::JsonFileGateway;
use fileshare_storage::LocalStorageProvider;

/// Execute the init command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let gateway = JsonFileGateway::from_config(&config.storage);
    let created = gateway.ensure_initialized().await?;

    let storage = LocalStorageProvider::new(&config.storage.filestore_path).await?;
    if !storage.health_check().await? {
        return Err(AppError::storage(format!(
            "File store {} is not a directory",
            storage.root().display()
        )));
    }

    if created {
        output::print_success("Initialized FileShare state");
    } else {
        output::print_warning("State documents already exist; left unchanged");
    }
    output::print_kv("Directories", &gateway.directories_path().display().to_string());
    output::print_kv("Files", &gateway.files_path().display().to_string());
    output::print_kv("File store", &storage.root().display().to_string());
    Ok(())
}
