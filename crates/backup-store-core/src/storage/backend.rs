//! Object storage capability trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::StorageError;

/// Metadata about a stored object
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp
    pub last_modified: DateTime<Utc>,
}

/// One entry from a namespace listing
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    /// Object key, relative to the bound namespace
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified timestamp
    pub last_modified: DateTime<Utc>,
}

/// Access scope of a signed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMethod {
    /// Grants a GET on the object
    Read,
    /// Grants a PUT on the object
    Write,
}

/// Trait for object storage backends.
///
/// A backend is bound to one namespace (bucket plus optional key prefix) at
/// construction; every key is resolved relative to it. Operations are plain
/// request/response against remote state with no retries, caching, or
/// ordering guarantees across keys.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Check whether an object exists at a key
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Fetch object metadata; `StorageError::NotFound` if the key is absent
    async fn head(&self, key: &str) -> Result<ObjectMetadata, StorageError>;

    /// Delete an object; `StorageError::NotFound` if the key is absent
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Stream a local file up to a key with the given content type.
    /// Overwrites silently; create-only policy belongs to callers.
    async fn upload(
        &self,
        key: &str,
        source: &Path,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Stream an object down to a local file. On failure the destination may
    /// hold a partial write and must be treated as unusable.
    async fn download(&self, key: &str, destination: &Path) -> Result<(), StorageError>;

    /// List every object in the bound namespace
    async fn list(&self) -> Result<Vec<ObjectEntry>, StorageError>;

    /// Mint a time-limited, method-scoped URL for a key. Pure signing; does
    /// not check that the object exists.
    async fn signed_url(
        &self,
        key: &str,
        method: SignMethod,
        expires_in: Duration,
    ) -> Result<Url, StorageError>;
}
