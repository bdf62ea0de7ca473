//! Remote backup store over an object storage backend.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

use super::{is_backup_archive, BackupFile, BackupStore};
use crate::error::{Error, Result, StorageError};
use crate::storage::{ObjectEntry, ObjectMetadata, ObjectStorage, SignMethod};

/// Read URLs are consumed immediately by a redirect, never stored or shared.
pub const DOWNLOAD_URL_EXPIRES_AFTER_SECONDS: u64 = 15;

/// Write URLs must outlast a slow, large upload from a remote client.
pub const UPLOAD_URL_EXPIRES_AFTER_SECONDS: u64 = 21_600; // 6 hours

const DEFAULT_DOWNLOAD_FAILURE_MESSAGE: &str = "Failed to download file";

/// Backup store holding archives in a remote object store namespace.
///
/// The store keeps no local state over the namespace; every operation
/// re-reads the remote. Sharing one instance across tasks is safe as long as
/// the storage handle itself is.
pub struct RemoteBackupStore {
    storage: Arc<dyn ObjectStorage>,
    disable_cleanup: bool,
}

impl RemoteBackupStore {
    /// Create a store over an already-configured storage backend.
    pub fn new(storage: Arc<dyn ObjectStorage>, disable_cleanup: bool) -> Self {
        Self {
            storage,
            disable_cleanup,
        }
    }

    /// Fail with `BackupFileExists` when the key is already taken.
    ///
    /// The check and the subsequent write are separate remote calls, so two
    /// concurrent creators can both pass; the namespace's last writer wins.
    async fn ensure_absent(&self, filename: &str) -> Result<()> {
        if self.storage.exists(filename).await? {
            return Err(Error::BackupFileExists(filename.to_string()));
        }
        Ok(())
    }

    async fn describe(
        &self,
        filename: &str,
        meta: ObjectMetadata,
        include_download_source: bool,
    ) -> Result<BackupFile> {
        let download_source = if include_download_source {
            let url = self
                .storage
                .signed_url(
                    filename,
                    SignMethod::Read,
                    Duration::from_secs(DOWNLOAD_URL_EXPIRES_AFTER_SECONDS),
                )
                .await?;
            Some(url)
        } else {
            None
        };

        Ok(BackupFile {
            filename: filename.to_string(),
            size: meta.size,
            last_modified: meta.last_modified,
            download_source,
        })
    }

    fn describe_entry(entry: ObjectEntry) -> BackupFile {
        BackupFile {
            filename: entry.key,
            size: entry.size,
            last_modified: entry.last_modified,
            download_source: None,
        }
    }
}

#[async_trait]
impl BackupStore for RemoteBackupStore {
    fn is_remote(&self) -> bool {
        true
    }

    fn cleanup_allowed(&self) -> bool {
        !self.disable_cleanup
    }

    async fn file(
        &self,
        filename: &str,
        include_download_source: bool,
    ) -> Result<Option<BackupFile>> {
        match self.storage.head(filename).await {
            Ok(meta) => Ok(Some(
                self.describe(filename, meta, include_download_source)
                    .await?,
            )),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_file(&self, filename: &str) -> Result<()> {
        match self.storage.delete(filename).await {
            Ok(()) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn download_file(
        &self,
        filename: &str,
        destination: &Path,
        failure_message: Option<&str>,
    ) -> Result<()> {
        if let Err(e) = self.storage.download(filename, destination).await {
            warn!("Backup download failed for {}: {}", filename, e);
            return Err(Error::DownloadFailed(
                failure_message
                    .unwrap_or(DEFAULT_DOWNLOAD_FAILURE_MESSAGE)
                    .to_string(),
            ));
        }
        Ok(())
    }

    async fn upload_file(&self, filename: &str, source: &Path, content_type: &str) -> Result<()> {
        self.ensure_absent(filename).await?;
        self.storage.upload(filename, source, content_type).await?;
        Ok(())
    }

    async fn generate_upload_url(&self, filename: &str) -> Result<Url> {
        self.ensure_absent(filename).await?;

        let url = self
            .storage
            .signed_url(
                filename,
                SignMethod::Write,
                Duration::from_secs(UPLOAD_URL_EXPIRES_AFTER_SECONDS),
            )
            .await?;
        Ok(url)
    }

    async fn list_backup_files(&self) -> Result<Vec<BackupFile>> {
        let entries = match self.storage.list().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list backups from object storage: {}", e);
                return Err(StorageError::ListFailed.into());
            }
        };

        Ok(entries
            .into_iter()
            .filter(|entry| is_backup_archive(&entry.key))
            .map(Self::describe_entry)
            .collect())
    }
}
