//! Integration tests for directory operations.

mod helpers;

use fileshare_core::config::policy::PolicyConfig;
use fileshare_core::error::ErrorKind;
use fileshare_core::types::DirectoryId;
use fileshare_entity::directory::DirType;
use fileshare_service::{CreateDirectoryRequest, Upload};

#[tokio::test]
async fn test_create_nested_and_find() {
    let app = helpers::TestShare::new().await;
    let root = app.mkdir("root", None).await;
    let a = app.mkdir("A", Some(&root.id)).await;
    let b = app.mkdir("B", Some(&a.id)).await;

    let dirs = app.ctx.directories();
    let found = dirs.get(&b.id).await.unwrap();
    assert_eq!(found.parent_id, Some(a.id.clone()));
    assert!(dirs.get(&root.id).await.unwrap().parent_id.is_none());

    let forest = dirs.list().await;
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children[0].children[0].id, b.id);
    assert_eq!(app.gateway.saved_forest().await, forest);
}

#[tokio::test]
async fn test_create_under_unknown_parent() {
    let app = helpers::TestShare::new().await;
    app.mkdir("root", None).await;
    let saves = app.gateway.save_count();

    let err = app
        .ctx
        .directories()
        .create(CreateDirectoryRequest::new("x", Some(DirectoryId::new("ghost"))))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::ParentNotFound);
    assert_eq!(app.ctx.directories().list().await.len(), 1);
    assert_eq!(app.gateway.save_count(), saves);
}

#[tokio::test]
async fn test_create_with_empty_parent_is_root() {
    let app = helpers::TestShare::new().await;
    let dir = app
        .ctx
        .directories()
        .create(CreateDirectoryRequest::new("r", Some(DirectoryId::new(""))))
        .await
        .unwrap();
    assert!(dir.is_root());
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let app = helpers::TestShare::new().await;
    for name in ["", "   "] {
        let err = app
            .ctx
            .directories()
            .create(CreateDirectoryRequest::new(name, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_link_directory_forbidden_by_policy() {
    let app = helpers::TestShare::with_policy(PolicyConfig {
        link_dir_add: false,
    })
    .await;

    let err = app
        .ctx
        .directories()
        .create(CreateDirectoryRequest::new("links", None).with_type(DirType::Link))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert!(app.ctx.directories().list().await.is_empty());
}

#[tokio::test]
async fn test_shared_view_scenario() {
    let app = helpers::TestShare::new().await;
    let dirs = app.ctx.directories();
    let root = app.mkdir("root", None).await;
    let child = app.mkdir("pub", Some(&root.id)).await;
    dirs.set_shared(&child.id, true).await.unwrap();

    let shared = dirs.list_shared().await;
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, root.id);
    assert!(!shared[0].is_shared);
    assert_eq!(shared[0].children.len(), 1);
    assert_eq!(shared[0].children[0].id, child.id);
    assert!(shared[0].children[0].is_shared);

    let uploaded = app
        .ctx
        .uploads()
        .upload_files(&child.id, vec![Upload::new("f1.txt", "hello")])
        .await
        .unwrap();

    dirs.delete(&root.id).await.unwrap();
    assert!(dirs.list().await.is_empty());
    assert!(app.ctx.files().list(None).await.is_empty());
    assert!(!std::path::Path::new(&uploaded[0].path).exists());
}

#[tokio::test]
async fn test_delete_cascades_to_descendant_files() {
    let app = helpers::TestShare::new().await;
    let root = app.mkdir("root", None).await;
    let a = app.mkdir("A", Some(&root.id)).await;
    let b = app.mkdir("B", Some(&a.id)).await;

    let uploads = app.ctx.uploads();
    uploads
        .upload_files(&a.id, vec![Upload::new("a.txt", "a")])
        .await
        .unwrap();
    uploads
        .upload_files(&b.id, vec![Upload::new("b.txt", "b")])
        .await
        .unwrap();
    uploads
        .upload_files(&root.id, vec![Upload::new("keep.txt", "k")])
        .await
        .unwrap();
    assert_eq!(helpers::count_files(&app.store), 3);

    let deleted = app.ctx.directories().delete(&a.id).await.unwrap();
    assert_eq!(deleted.directory.id, a.id);
    assert_eq!(deleted.files.len(), 2);

    let dirs = app.ctx.directories();
    assert_eq!(dirs.get(&a.id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(dirs.get(&b.id).await.unwrap_err().kind, ErrorKind::NotFound);

    let remaining = app.ctx.files().list(None).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "keep.txt");
    assert_eq!(app.gateway.saved_files().await, remaining);
    assert_eq!(helpers::count_files(&app.store), 1);
}

#[tokio::test]
async fn test_delete_link_directory_keeps_external_files() {
    let app = helpers::TestShare::new().await;
    let links = app.mklink("links", None).await;
    let external = app.external_file("movie.mkv", b"frames");

    app.ctx
        .uploads()
        .link_files(&links.id, vec![external.clone()])
        .await
        .unwrap();

    let deleted = app.ctx.directories().delete(&links.id).await.unwrap();
    assert_eq!(deleted.files.len(), 1);
    assert!(!deleted.files[0].owns_bytes());
    assert!(std::path::Path::new(&external).exists());
}

#[tokio::test]
async fn test_delete_unknown_directory() {
    let app = helpers::TestShare::new().await;
    app.mkdir("root", None).await;
    let err = app
        .ctx
        .directories()
        .delete(&DirectoryId::new("ghost"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.ctx.directories().list().await.len(), 1);
}

#[tokio::test]
async fn test_updates_on_unknown_directory() {
    let app = helpers::TestShare::new().await;
    let root = app.mkdir("root", None).await;
    let dirs = app.ctx.directories();
    let ghost = DirectoryId::new("ghost");

    assert_eq!(dirs.rename(&ghost, "x").await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(dirs.set_shared(&ghost, true).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(
        dirs.set_password(&ghost, "pw").await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(dirs.list().await, vec![root]);
}

#[tokio::test]
async fn test_password_flow() {
    let app = helpers::TestShare::new().await;
    let dir = app.mkdir("vault", None).await;
    let dirs = app.ctx.directories();

    dirs.verify_password(&dir.id, "").await.unwrap();
    dirs.verify_password(&dir.id, "anything").await.unwrap();

    dirs.set_password(&dir.id, "x").await.unwrap();
    for wrong in ["", "y"] {
        let err = dirs.verify_password(&dir.id, wrong).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
    dirs.verify_password(&dir.id, "x").await.unwrap();

    let err = dirs
        .verify_password(&DirectoryId::new("ghost"), "x")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_failed_save_keeps_in_memory_change() {
    let app = helpers::TestShare::new().await;
    let dir = app.mkdir("before", None).await;
    app.gateway.set_fail_saves(true);

    let err = app
        .ctx
        .directories()
        .rename(&dir.id, "after")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    assert_eq!(app.ctx.directories().get(&dir.id).await.unwrap().name, "after");
    assert_eq!(app.gateway.saved_forest().await[0].name, "before");
}

#[tokio::test]
async fn test_long_names_are_accepted_by_create_and_rename() {
    let app = helpers::TestShare::new().await;
    let dirs = app.ctx.directories();

    let long = "a".repeat(256);
    let dir = dirs
        .create(CreateDirectoryRequest::new(long.clone(), None))
        .await
        .unwrap();
    assert_eq!(dir.name, long);

    let longer = "b".repeat(1024);
    dirs.rename(&dir.id, &longer).await.unwrap();
    assert_eq!(dirs.get(&dir.id).await.unwrap().name, longer);

    assert_eq!(
        dirs.rename(&dir.id, "  ").await.unwrap_err().kind,
        ErrorKind::Validation
    );
}
