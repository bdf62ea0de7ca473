//! Full archive lifecycle over the public store surface.

use backup_store_core::storage::ObjectStorageConfig;
use backup_store_core::{create_store, BackupStore, Config, Error};
use tempfile::TempDir;

use super::helpers::{failing_store, memory_store, stage_archive};

#[tokio::test]
async fn test_upload_list_download_delete() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        storage: ObjectStorageConfig::Memory,
        disable_cleanup: false,
    };
    let store = create_store(&config).unwrap();
    assert!(store.is_remote());

    let source = stage_archive(&dir, "site-2026-08-07.tar.gz", b"site archive bytes").await;
    store
        .upload_file("site-2026-08-07.tar.gz", &source, "application/gzip")
        .await
        .unwrap();

    let files = store.list_backup_files().await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "site-2026-08-07.tar.gz");
    assert_eq!(files[0].size, 18);

    let file = store
        .file("site-2026-08-07.tar.gz", false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(file.size, 18);
    assert_eq!(file.last_modified, files[0].last_modified);

    let destination = dir.path().join("restored.tar.gz");
    store
        .download_file("site-2026-08-07.tar.gz", &destination, None)
        .await
        .unwrap();
    assert_eq!(
        tokio::fs::read(&destination).await.unwrap(),
        b"site archive bytes"
    );

    store.delete_file("site-2026-08-07.tar.gz").await.unwrap();
    store.delete_file("site-2026-08-07.tar.gz").await.unwrap();
    assert!(store.list_backup_files().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_succeeds_exactly_once() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    let source = stage_archive(&dir, "site.tar.gz", b"bytes").await;
    assert!(store.file("site.tar.gz", false).await.unwrap().is_none());

    store
        .upload_file("site.tar.gz", &source, "application/gzip")
        .await
        .unwrap();

    let again = store
        .upload_file("site.tar.gz", &source, "application/gzip")
        .await;
    assert!(matches!(again, Err(Error::BackupFileExists(f)) if f == "site.tar.gz"));
}

#[tokio::test]
async fn test_download_missing_file_uses_default_message() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    let destination = dir.path().join("restored.tar.gz");
    let result = store.download_file("site.tar.gz", &destination, None).await;

    match result {
        Err(Error::DownloadFailed(message)) => {
            assert_eq!(message, "Failed to download file");
        }
        other => panic!("Expected DownloadFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_failure_uses_caller_message() {
    let dir = TempDir::new().unwrap();
    let store = failing_store();

    let destination = dir.path().join("restored.tar.gz");
    let result = store
        .download_file("site.tar.gz", &destination, Some("Nightly restore failed"))
        .await;

    match result {
        Err(Error::DownloadFailed(message)) => {
            assert_eq!(message, "Nightly restore failed");
            // Backend detail stays out of the caller-facing error
            assert!(!message.contains("injected"));
        }
        other => panic!("Expected DownloadFailed, got {:?}", other),
    }
}
