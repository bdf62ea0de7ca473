//! Backup archive store abstraction.
//!
//! A [`BackupStore`] mediates access to backup archives held in a remote
//! namespace: existence-gated create-only uploads, idempotent deletes,
//! streaming transfers, signed-URL issuance, and archive discovery. The
//! remote implementation lives in [`remote`]; additional variants conform to
//! the same trait and are selected by configuration at composition time.

mod remote;

pub use remote::{
    RemoteBackupStore, DOWNLOAD_URL_EXPIRES_AFTER_SECONDS, UPLOAD_URL_EXPIRES_AFTER_SECONDS,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use url::Url;

use crate::config::Config;
use crate::Result;

/// A read-only snapshot describing one backup archive.
///
/// Values are only as fresh as the call that produced them; a concurrent
/// writer can make `size` stale, and an attached `download_source` expires on
/// its own schedule. Callers must not cache a `BackupFile` beyond the signed
/// URL's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupFile {
    /// Object key; unique within the namespace and used as the archive's name
    pub filename: String,
    /// Byte length as reported by the backend at query time
    pub size: u64,
    /// Last modified timestamp as reported by the backend
    pub last_modified: DateTime<Utc>,
    /// Signed read URL, present only when explicitly requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_source: Option<Url>,
}

/// Trait for backup archive stores.
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Whether archives live in a remote object store. Remote stores transfer
    /// large files through signed URLs instead of local paths.
    fn is_remote(&self) -> bool;

    /// Whether retention sweeps may delete archives. The store never runs
    /// cleanup itself; it only answers the policy question.
    fn cleanup_allowed(&self) -> bool;

    /// Look up one archive. Returns `None` when the key is absent. With
    /// `include_download_source` a short-lived signed read URL is attached.
    async fn file(&self, filename: &str, include_download_source: bool)
        -> Result<Option<BackupFile>>;

    /// Delete an archive. Deleting an absent key is a no-op, not an error.
    async fn delete_file(&self, filename: &str) -> Result<()>;

    /// Stream an archive to a local destination. Fails with
    /// [`Error::DownloadFailed`](crate::Error::DownloadFailed) carrying
    /// `failure_message` (or a generic default). On failure the destination
    /// may hold a partial write and must be removed or overwritten.
    async fn download_file(
        &self,
        filename: &str,
        destination: &Path,
        failure_message: Option<&str>,
    ) -> Result<()>;

    /// Stream a local file up under `filename`. Create-only: fails with
    /// [`Error::BackupFileExists`](crate::Error::BackupFileExists) when the
    /// key is already taken.
    async fn upload_file(&self, filename: &str, source: &Path, content_type: &str) -> Result<()>;

    /// Mint a signed PUT URL valid for the fixed upload window. Gated by the
    /// same create-only rule as [`upload_file`](Self::upload_file).
    async fn generate_upload_url(&self, filename: &str) -> Result<Url>;

    /// Enumerate every archive in the namespace. Non-archive keys are
    /// silently excluded; no download sources are attached. Order is
    /// backend-defined.
    async fn list_backup_files(&self) -> Result<Vec<BackupFile>>;
}

/// Create a backup store from configuration.
pub fn create_store(config: &Config) -> Result<Arc<dyn BackupStore>> {
    let storage = crate::storage::create_storage(&config.storage)?;
    Ok(Arc::new(RemoteBackupStore::new(
        storage,
        config.disable_cleanup,
    )))
}

/// Recognize backup archives among arbitrary namespace keys by filename
/// suffix: `.gz` or `.tgz`, case-insensitive.
pub(crate) fn is_backup_archive(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    lower.ends_with(".gz") || lower.ends_with(".tgz")
}
