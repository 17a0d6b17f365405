//! Integration tests for publish, unpublish, delete and repair.

mod helpers;

use folderlink_core::config::sync::{RetireMode, SyncTrigger};
use folderlink_core::error::ErrorKind;
use folderlink_core::types::NodeId;
use folderlink_entity::node::{Node, NodeChanges, Stage};

use helpers::{ENABLED, TestApp};

#[tokio::test]
async fn test_hard_delete_removes_enabled_children_and_folders() {
    let app = TestApp::new().await;
    let gallery = app.page("Gallery", "gallery", None).await;
    let photos = app.page("Photos", "photos", Some(gallery.id)).await;
    let notes = app.record("Notes", "notes", Some(gallery.id)).await;

    let gallery_folder = app.folder_of(&gallery).await;
    let photos_folder = app.folder_of(&photos).await;

    app.services.lifecycle.delete(gallery.id).await.unwrap();

    assert!(app.node(gallery.id).await.is_none());
    assert!(app.node(photos.id).await.is_none());
    assert!(app.node(notes.id).await.is_some());

    assert!(app.folder(gallery_folder.id).await.is_none());
    assert!(app.folder(photos_folder.id).await.is_none());
    assert!(!app.disk(&gallery_folder.filename).exists());

    // The default root stays.
    assert!(app.folder_at("assets/associated-folders/").await.is_some());
    assert!(app.disk("assets/associated-folders").is_dir());
}

#[tokio::test]
async fn test_hard_delete_removes_live_records() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    app.services.lifecycle.publish(photos.id).await.unwrap();

    app.services.lifecycle.delete(photos.id).await.unwrap();

    let live = app
        .services
        .nodes
        .find_by_id(photos.id, Stage::Live)
        .await
        .unwrap();
    assert!(live.is_none());
}

#[tokio::test]
async fn test_unpublish_keeps_folder_in_hard_delete_mode() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    app.services.lifecycle.publish(photos.id).await.unwrap();

    app.services.lifecycle.unpublish(photos.id).await.unwrap();

    let folder = app.folder_of(&photos).await;
    assert_eq!(folder.name, "photos");
    assert!(app.disk(&folder.filename).is_dir());
}

#[tokio::test]
async fn test_soft_unpublish_renames_folder() {
    let app = TestApp::with_config(|c| c.sync.retire = RetireMode::SoftUnpublish).await;
    let photos = app.page("Photos", "photos", None).await;
    app.services.lifecycle.publish(photos.id).await.unwrap();

    app.services.lifecycle.unpublish(photos.id).await.unwrap();

    let folder = app.folder_of(&photos).await;
    assert_eq!(folder.name, "photos__deleted");
    assert_eq!(folder.filename, "assets/associated-folders/photos__deleted/");
    assert!(app.disk(&folder.filename).is_dir());
    assert!(!app.disk("assets/associated-folders/photos").exists());

    // The draft node survives unpublishing.
    assert!(app.node(photos.id).await.is_some());
}

#[tokio::test]
async fn test_soft_mode_delete_keeps_folder() {
    let app = TestApp::with_config(|c| c.sync.retire = RetireMode::SoftUnpublish).await;
    let photos = app.page("Photos", "photos", None).await;
    let folder = app.folder_of(&photos).await;

    app.services.lifecycle.delete(photos.id).await.unwrap();

    assert!(app.node(photos.id).await.is_none());
    assert!(app.folder(folder.id).await.is_some());
}

#[tokio::test]
async fn test_mark_deleted_is_not_repeated() {
    let app = TestApp::with_config(|c| c.sync.retire = RetireMode::SoftUnpublish).await;
    let photos = app.page("Photos", "photos", None).await;
    let policy = app.services.lifecycle.policy();

    policy.mark_folder_deleted(&photos).await.unwrap();
    let again = policy.mark_folder_deleted(&photos).await.unwrap();

    assert_eq!(again.name, "photos__deleted");
}

#[tokio::test]
async fn test_missing_association_is_fatal() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;

    let mut detached = photos.clone();
    detached.associated_folder_id = None;
    app.services
        .nodes
        .save(&detached, Stage::Draft)
        .await
        .unwrap();

    let policy = app.services.lifecycle.policy();
    let err = policy
        .sync_folder(&detached, &NodeChanges::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAssociation);

    let err = policy.retire_folder(&detached).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAssociation);

    let err = app.services.lifecycle.delete(photos.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAssociation);
    assert!(app.node(photos.id).await.is_some());
}

#[tokio::test]
async fn test_dangling_association_fails_write() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    let folder = app.folder_of(&photos).await;
    app.services.folder_repo.delete_tree(folder.id).await.unwrap();

    let mut edited = photos.clone();
    edited.title = "Renamed".to_string();
    let err = app.services.lifecycle.write(edited).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingAssociation);
}

#[tokio::test]
async fn test_repair_recreates_missing_directory() {
    let app = TestApp::with_config(|c| c.sync.repair_missing_directories = true).await;
    let photos = app.page("Photos", "photos", None).await;
    let folder = app.folder_of(&photos).await;
    std::fs::remove_dir_all(app.disk(&folder.filename)).unwrap();

    app.services.lifecycle.write(photos.clone()).await.unwrap();

    assert!(app.disk(&folder.filename).is_dir());
    assert_eq!(app.folder_of(&photos).await.id, folder.id);
}

#[tokio::test]
async fn test_missing_directory_left_alone_without_repair() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    let folder = app.folder_of(&photos).await;
    std::fs::remove_dir_all(app.disk(&folder.filename)).unwrap();

    app.services.lifecycle.write(photos.clone()).await.unwrap();

    assert!(!app.disk(&folder.filename).exists());
}

#[tokio::test]
async fn test_on_publish_trigger_defers_sync() {
    let app = TestApp::with_config(|c| c.sync.trigger = SyncTrigger::OnPublish).await;
    let photos = app.page("Photos", "photos", None).await;

    let mut edited = photos.clone();
    edited.title = "Holiday".to_string();
    let photos = app.services.lifecycle.write(edited).await.unwrap();
    assert_ne!(app.folder_of(&photos).await.title, "Holiday");

    app.services.lifecycle.publish(photos.id).await.unwrap();
    assert_eq!(app.folder_of(&photos).await.title, "Holiday");
}

#[tokio::test]
async fn test_unpublish_without_live_record() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;

    let err = app.services.lifecycle.unpublish(photos.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_unknown_node() {
    let app = TestApp::new().await;

    let err = app.services.lifecycle.delete(NodeId::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_state_survives_persist_and_reload() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    app.services.persist(&app.config).await.unwrap();

    let reloaded = folderlink_service::AppServices::from_config(&app.config)
        .await
        .unwrap();
    let node = reloaded
        .lifecycle
        .get_node(photos.id, Stage::Draft)
        .await
        .unwrap();
    assert_eq!(node.associated_folder_id, photos.associated_folder_id);
    assert_eq!(reloaded.folder_repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_hard_delete_cascades_through_grandchildren() {
    let app = TestApp::new().await;
    let gallery = app.page("Gallery", "gallery", None).await;
    let photos = app.page("Photos", "photos", Some(gallery.id)).await;
    let year = app.page("2024", "2024", Some(photos.id)).await;
    let year_folder = app.folder_of(&year).await;
    assert_eq!(
        year_folder.filename,
        "assets/associated-folders/gallery/photos/2024/"
    );

    app.services.lifecycle.delete(gallery.id).await.unwrap();

    for id in [gallery.id, photos.id, year.id] {
        assert!(app.node(id).await.is_none());
    }
    assert!(app.folder(year_folder.id).await.is_none());
    assert_eq!(app.folder_count().await, 1);
    assert!(!app.disk("assets/associated-folders/gallery").exists());
}

#[tokio::test]
async fn test_sibling_with_same_title_gets_own_folder() {
    let app = TestApp::new().await;
    let gallery = app.page("Gallery", "gallery", None).await;
    let first = app.page("Photos", "", Some(gallery.id)).await;
    let second = app.page("Photos", "", Some(gallery.id)).await;

    assert_eq!(first.slug, "photos");
    assert_eq!(second.slug, "photos-2");
    let second_folder = app.folder_of(&second).await;
    assert_ne!(app.folder_of(&first).await.id, second_folder.id);
    assert_eq!(
        second_folder.filename,
        "assets/associated-folders/gallery/photos-2/"
    );

    app.services.lifecycle.delete(first.id).await.unwrap();

    let mut edited = second.clone();
    edited.title = "Photos again".to_string();
    let second = app.services.lifecycle.write(edited).await.unwrap();
    assert_eq!(app.folder_of(&second).await.id, second_folder.id);
    assert!(app.disk(&second_folder.filename).is_dir());
}

#[tokio::test]
async fn test_claimed_default_root_folder_is_conflict() {
    let app = TestApp::new().await;
    let north = app.record("North", "north", None).await;
    let south = app.record("South", "south", None).await;
    app.page("Photos", "photos", Some(north.id)).await;

    let mut other = Node::new(ENABLED, "Photos").with_slug("photos");
    other.parent_id = Some(south.id);
    let err = app.services.lifecycle.write(other.clone()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(app.node(other.id).await.is_none());
}

#[tokio::test]
async fn test_failed_sync_restores_previous_record() {
    let app = TestApp::new().await;
    let archive = app.record("Archive", "archive", None).await;
    let attic = app.record("Attic", "attic", None).await;
    let gallery = app.page("Gallery", "gallery", None).await;
    app.page("Photos", "photos", Some(archive.id)).await;
    let nested = app.page("Photos", "photos", Some(gallery.id)).await;
    let before = app.folder_of(&nested).await;

    // The default root already holds another node's `photos` folder.
    let mut moved = nested.clone();
    moved.parent_id = Some(attic.id);
    let err = app.services.lifecycle.write(moved).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let stored = app.node(nested.id).await.unwrap();
    assert_eq!(stored.parent_id, Some(gallery.id));
    assert_eq!(stored.slug, "photos");
    let after = app.folder_of(&stored).await;
    assert_eq!(after.filename, before.filename);
    assert!(app.disk(&after.filename).is_dir());
}

#[tokio::test]
async fn test_failed_sync_on_first_write_leaves_no_record() {
    let app = TestApp::new().await;
    let photos = app.page("Photos", "photos", None).await;
    let folder = app.folder_of(&photos).await;
    app.services.folder_repo.delete_tree(folder.id).await.unwrap();

    // A new node pointing at a vanished folder cannot be synced.
    let mut stray = Node::new(ENABLED, "Stray").with_slug("stray");
    stray.associated_folder_id = Some(folder.id);
    let err = app.services.lifecycle.write(stray.clone()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::MissingAssociation);
    assert!(app.node(stray.id).await.is_none());
}

#[tokio::test]
async fn test_republish_clears_soft_delete_marker() {
    let app = TestApp::with_config(|c| c.sync.retire = RetireMode::SoftUnpublish).await;
    let photos = app.page("Photos", "photos", None).await;
    let lifecycle = &app.services.lifecycle;

    lifecycle.publish(photos.id).await.unwrap();
    lifecycle.unpublish(photos.id).await.unwrap();
    assert_eq!(app.folder_of(&photos).await.name, "photos__deleted");

    lifecycle.publish(photos.id).await.unwrap();

    let folder = app.folder_of(&photos).await;
    assert_eq!(folder.name, "photos");
    assert_eq!(folder.filename, "assets/associated-folders/photos/");
    assert!(app.disk(&folder.filename).is_dir());
    assert!(!app.disk("assets/associated-folders/photos__deleted").exists());
}

#[tokio::test]
async fn test_orphan_of_hard_delete_stays_writable() {
    let app = TestApp::new().await;
    let gallery = app.page("Gallery", "gallery", None).await;
    let notes = app.record("Notes", "notes", Some(gallery.id)).await;
    app.services.lifecycle.delete(gallery.id).await.unwrap();

    let mut edited = notes.clone();
    edited.title = "Loose notes".to_string();
    let notes = app.services.lifecycle.write(edited).await.unwrap();
    assert_eq!(notes.title, "Loose notes");
    assert_eq!(notes.parent_id, Some(gallery.id));

    // Choosing the deleted node as a new parent is still rejected.
    let fresh = Node::new(ENABLED, "Fresh")
        .with_slug("fresh")
        .with_parent(gallery.id);
    let err = app.services.lifecycle.write(fresh).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
