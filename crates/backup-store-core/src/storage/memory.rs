//! In-memory object storage backend for testing.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use url::Url;

use super::{ObjectEntry, ObjectMetadata, ObjectStorage, SignMethod};
use crate::error::StorageError;

/// In-memory object storage backend using object_store
///
/// This backend is primarily useful for testing purposes as it doesn't
/// persist data between runs. Signed URLs are minted as `memory:///` URLs
/// that encode the requested method and expiry in the query string, so
/// callers can observe exactly what was asked of the signer.
pub struct MemoryStorage {
    store: Arc<InMemory>,
}

impl MemoryStorage {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = ObjectPath::from(key);
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::Backend(format!("Memory HEAD failed: {}", e))),
        }
    }

    async fn head(&self, key: &str) -> Result<ObjectMetadata, StorageError> {
        let path = ObjectPath::from(key);
        let meta = self.store.head(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("Memory HEAD failed: {}", e)),
        })?;

        Ok(ObjectMetadata {
            size: meta.size as u64,
            last_modified: meta.last_modified,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = ObjectPath::from(key);
        self.store.delete(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("Memory DELETE failed: {}", e)),
        })?;
        Ok(())
    }

    async fn upload(
        &self,
        key: &str,
        source: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let path = ObjectPath::from(key);

        let data = fs::read(source).await.map_err(|e| {
            StorageError::Backend(format!("Failed to read {}: {}", source.display(), e))
        })?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        self.store
            .put_opts(
                &path,
                PutPayload::from_bytes(Bytes::from(data)),
                PutOptions {
                    attributes,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| StorageError::Backend(format!("Memory PUT failed: {}", e)))?;

        Ok(())
    }

    async fn download(&self, key: &str, destination: &Path) -> Result<(), StorageError> {
        let path = ObjectPath::from(key);

        let result = self.store.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("Memory GET failed: {}", e)),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to read bytes: {}", e)))?;

        fs::write(destination, &bytes).await.map_err(|e| {
            StorageError::Backend(format!("Failed to write {}: {}", destination.display(), e))
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ObjectEntry>, StorageError> {
        let mut entries = Vec::new();
        let mut stream = self.store.list(None);

        while let Some(result) = stream.next().await {
            match result {
                Ok(meta) => {
                    entries.push(ObjectEntry {
                        key: meta.location.to_string(),
                        size: meta.size as u64,
                        last_modified: meta.last_modified,
                    });
                }
                Err(e) => {
                    return Err(StorageError::Backend(format!("Memory LIST failed: {}", e)));
                }
            }
        }

        Ok(entries)
    }

    async fn signed_url(
        &self,
        key: &str,
        method: SignMethod,
        expires_in: Duration,
    ) -> Result<Url, StorageError> {
        let method = match method {
            SignMethod::Read => "GET",
            SignMethod::Write => "PUT",
        };

        Url::parse(&format!(
            "memory:///{}?method={}&expires={}",
            key,
            method,
            expires_in.as_secs()
        ))
        .map_err(|e| StorageError::Backend(format!("Failed to mint signed URL: {}", e)))
    }
}
