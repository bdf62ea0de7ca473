//! Test helper utilities.
//!
//! Provides an in-memory backed store constructor, archive staging, and a
//! fault-injecting storage backend used to exercise failure translation.

use async_trait::async_trait;
use backup_store_core::storage::{
    MemoryStorage, ObjectEntry, ObjectMetadata, ObjectStorage, SignMethod,
};
use backup_store_core::{RemoteBackupStore, StorageError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

/// Build a store over fresh in-memory storage with cleanup enabled.
pub fn memory_store() -> RemoteBackupStore {
    RemoteBackupStore::new(Arc::new(MemoryStorage::new()), false)
}

/// Build a store whose every storage operation fails.
pub fn failing_store() -> RemoteBackupStore {
    RemoteBackupStore::new(Arc::new(FailingStorage), false)
}

/// Write a small archive file into `dir` and return its path.
pub async fn stage_archive(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, contents).await.unwrap();
    path
}

/// Storage backend that fails every operation with a backend error,
/// simulating an unreachable or misbehaving service.
pub struct FailingStorage;

fn injected() -> StorageError {
    StorageError::Backend("injected backend failure".to_string())
}

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn exists(&self, _key: &str) -> Result<bool, StorageError> {
        Err(injected())
    }

    async fn head(&self, _key: &str) -> Result<ObjectMetadata, StorageError> {
        Err(injected())
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(injected())
    }

    async fn upload(
        &self,
        _key: &str,
        _source: &Path,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        Err(injected())
    }

    async fn download(&self, _key: &str, _destination: &Path) -> Result<(), StorageError> {
        Err(injected())
    }

    async fn list(&self) -> Result<Vec<ObjectEntry>, StorageError> {
        Err(injected())
    }

    async fn signed_url(
        &self,
        _key: &str,
        _method: SignMethod,
        _expires_in: Duration,
    ) -> Result<Url, StorageError> {
        Err(injected())
    }
}
