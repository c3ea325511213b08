//! Integration tests for loading persisted state.

use std::sync::Arc;

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::types::DirectoryId;
use fileshare_persistence::JsonFileGateway;
use fileshare_service::{CreateDirectoryRequest, ShareContext};
use fileshare_storage::LocalStorageProvider;

#[tokio::test]
async fn test_state_survives_reload() {
    let tmp = tempfile::tempdir().unwrap();
    let gateway = Arc::new(JsonFileGateway::new(
        tmp.path().join("config/config-group.json"),
        tmp.path().join("config/config-file.json"),
    ));
    let storage = Arc::new(
        LocalStorageProvider::new(tmp.path().join("static").to_str().unwrap())
            .await
            .unwrap(),
    );

    let ctx = ShareContext::load(gateway.clone(), storage.clone(), PolicyConfig::default())
        .await
        .unwrap();
    let root = ctx
        .directories()
        .create(CreateDirectoryRequest::new("root", None))
        .await
        .unwrap();
    let child = ctx
        .directories()
        .create(CreateDirectoryRequest::new("child", Some(root.id.clone())))
        .await
        .unwrap();
    ctx.directories().set_shared(&child.id, true).await.unwrap();

    let reloaded = ShareContext::load(gateway, storage, PolicyConfig::default())
        .await
        .unwrap();
    assert_eq!(reloaded.directories().list().await, ctx.directories().list().await);
    assert_eq!(
        reloaded.directories().list_shared().await[0].children[0].id,
        child.id
    );
    assert!(
        reloaded
            .directories()
            .get(&DirectoryId::new("ghost"))
            .await
            .is_err()
    );
}
