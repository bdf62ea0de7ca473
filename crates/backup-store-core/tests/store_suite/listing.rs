//! Listing and archive-pattern filtering.

use backup_store_core::{BackupStore, Error, StorageError};
use tempfile::TempDir;

use super::helpers::{failing_store, memory_store, stage_archive};

#[tokio::test]
async fn test_list_keeps_only_archive_filenames() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    for name in ["a.tar.gz", "B.TGZ", "notes.txt", "archive.zip"] {
        let source = stage_archive(&dir, name, b"data").await;
        store
            .upload_file(name, &source, "application/octet-stream")
            .await
            .unwrap();
    }

    let mut names: Vec<_> = store
        .list_backup_files()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.filename)
        .collect();
    names.sort();

    assert_eq!(names, ["B.TGZ", "a.tar.gz"]);
}

#[tokio::test]
async fn test_list_never_attaches_download_sources() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    let source = stage_archive(&dir, "site.tar.gz", b"data").await;
    store
        .upload_file("site.tar.gz", &source, "application/gzip")
        .await
        .unwrap();

    let files = store.list_backup_files().await.unwrap();
    assert!(files.iter().all(|f| f.download_source.is_none()));
}

#[tokio::test]
async fn test_listing_failure_collapses_to_one_kind() {
    let store = failing_store();

    let result = store.list_backup_files().await;
    match result {
        Err(Error::Storage(StorageError::ListFailed)) => {}
        other => panic!("Expected ListFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_listing_failure_hides_backend_detail() {
    let store = failing_store();

    let message = store.list_backup_files().await.unwrap_err().to_string();
    assert!(!message.contains("injected"));
}
