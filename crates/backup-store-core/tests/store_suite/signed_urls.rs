//! Signed-URL issuance policies.

use backup_store_core::{
    BackupStore, Error, DOWNLOAD_URL_EXPIRES_AFTER_SECONDS, UPLOAD_URL_EXPIRES_AFTER_SECONDS,
};
use tempfile::TempDir;
use url::Url;

use super::helpers::{memory_store, stage_archive};

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.to_string())
}

#[tokio::test]
async fn test_download_source_attached_only_on_request() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    let source = stage_archive(&dir, "site.tar.gz", b"data").await;
    store
        .upload_file("site.tar.gz", &source, "application/gzip")
        .await
        .unwrap();

    let plain = store.file("site.tar.gz", false).await.unwrap().unwrap();
    assert!(plain.download_source.is_none());

    let with_source = store.file("site.tar.gz", true).await.unwrap().unwrap();
    let url = with_source.download_source.expect("signed URL requested");
    assert_eq!(query_param(&url, "method").as_deref(), Some("GET"));
    assert_eq!(
        query_param(&url, "expires").as_deref(),
        Some(DOWNLOAD_URL_EXPIRES_AFTER_SECONDS.to_string().as_str())
    );
}

#[tokio::test]
async fn test_upload_url_is_write_scoped_with_long_expiry() {
    let store = memory_store();

    let url = store.generate_upload_url("site.tar.gz").await.unwrap();
    assert_eq!(query_param(&url, "method").as_deref(), Some("PUT"));
    assert_eq!(
        query_param(&url, "expires").as_deref(),
        Some(UPLOAD_URL_EXPIRES_AFTER_SECONDS.to_string().as_str())
    );
}

#[tokio::test]
async fn test_upload_url_gated_by_existing_archive() {
    let dir = TempDir::new().unwrap();
    let store = memory_store();

    // Gate tracks presence: absent key signs, present key refuses
    assert!(store.generate_upload_url("site.tar.gz").await.is_ok());

    let source = stage_archive(&dir, "site.tar.gz", b"data").await;
    store
        .upload_file("site.tar.gz", &source, "application/gzip")
        .await
        .unwrap();

    let gated = store.generate_upload_url("site.tar.gz").await;
    assert!(matches!(gated, Err(Error::BackupFileExists(f)) if f == "site.tar.gz"));
}
