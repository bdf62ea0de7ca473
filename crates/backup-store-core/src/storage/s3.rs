//! S3-compatible object storage backend using object_store.

use async_trait::async_trait;
use futures::StreamExt;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutMultipartOpts, WriteMultipart};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};
use url::Url;

use super::{ObjectEntry, ObjectMetadata, ObjectStorage, SignMethod};
use crate::error::StorageError;

/// Upload stream chunk size (8 MiB)
const UPLOAD_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Maximum in-flight multipart requests per upload
const UPLOAD_MAX_CONCURRENCY: usize = 8;

/// S3 storage backend configuration
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: Option<String>,
    /// Custom endpoint (for S3-compatible services like MinIO)
    pub endpoint: Option<String>,
    /// Access key ID
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<String>,
    /// Key prefix for all operations
    pub prefix: Option<String>,
    /// Allow HTTP (insecure) connections
    pub allow_http: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: Some("us-east-1".to_string()),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            prefix: None,
            allow_http: false,
        }
    }
}

/// S3 object storage backend
pub struct S3Storage {
    store: Arc<AmazonS3>,
    prefix: Option<String>,
}

impl S3Storage {
    /// Create a new S3 backend
    pub fn new(config: S3Config) -> Result<Self, StorageError> {
        let mut builder = AmazonS3Builder::new().with_bucket_name(&config.bucket);

        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
            // Custom endpoints generally need virtual hosted style disabled
            builder = builder.with_virtual_hosted_style_request(false);
        }

        if let Some(access_key) = &config.access_key_id {
            builder = builder.with_access_key_id(access_key);
        }

        if let Some(secret_key) = &config.secret_access_key {
            builder = builder.with_secret_access_key(secret_key);
        }

        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::Backend(format!("Failed to create S3 client: {}", e)))?;

        info!(
            "Created S3 storage for bucket: {}, prefix: {:?}",
            config.bucket, config.prefix
        );

        Ok(Self {
            store: Arc::new(store),
            prefix: config.prefix,
        })
    }

    /// Build the full path for a key
    fn full_path(&self, key: &str) -> ObjectPath {
        match &self.prefix {
            Some(prefix) => ObjectPath::from(format!("{}/{}", prefix.trim_end_matches('/'), key)),
            None => ObjectPath::from(key),
        }
    }

    /// Strip the configured prefix from a listed path to get the key
    fn strip_prefix(&self, path: &str) -> String {
        match &self.prefix {
            Some(p) => path
                .strip_prefix(&format!("{}/", p.trim_end_matches('/')))
                .unwrap_or(path)
                .to_string(),
            None => path.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.full_path(key);
        debug!("S3 HEAD: {}", path);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::Backend(format!("S3 HEAD failed: {}", e))),
        }
    }

    async fn head(&self, key: &str) -> Result<ObjectMetadata, StorageError> {
        let path = self.full_path(key);
        debug!("S3 HEAD: {}", path);

        let meta = self.store.head(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("S3 HEAD failed: {}", e)),
        })?;

        Ok(ObjectMetadata {
            size: meta.size as u64,
            last_modified: meta.last_modified,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.full_path(key);
        debug!("S3 DELETE: {}", path);

        self.store.delete(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("S3 DELETE failed: {}", e)),
        })?;

        Ok(())
    }

    async fn upload(
        &self,
        key: &str,
        source: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.full_path(key);
        debug!("S3 PUT: {} <- {}", path, source.display());

        let mut file = fs::File::open(source).await.map_err(|e| {
            StorageError::Backend(format!("Failed to open {}: {}", source.display(), e))
        })?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let upload = self
            .store
            .put_multipart_opts(
                &path,
                PutMultipartOpts {
                    attributes,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| StorageError::Backend(format!("S3 PUT failed: {}", e)))?;

        let mut write = WriteMultipart::new(upload);
        let mut buf = vec![0u8; UPLOAD_CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).await.map_err(|e| {
                StorageError::Backend(format!("Failed to read {}: {}", source.display(), e))
            })?;
            if n == 0 {
                break;
            }
            write
                .wait_for_capacity(UPLOAD_MAX_CONCURRENCY)
                .await
                .map_err(|e| StorageError::Backend(format!("S3 PUT failed: {}", e)))?;
            write.write(&buf[..n]);
        }

        write
            .finish()
            .await
            .map_err(|e| StorageError::Backend(format!("S3 PUT failed: {}", e)))?;

        Ok(())
    }

    async fn download(&self, key: &str, destination: &Path) -> Result<(), StorageError> {
        let path = self.full_path(key);
        debug!("S3 GET: {} -> {}", path, destination.display());

        let result = self.store.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
            _ => StorageError::Backend(format!("S3 GET failed: {}", e)),
        })?;

        let mut file = fs::File::create(destination).await.map_err(|e| {
            StorageError::Backend(format!("Failed to create {}: {}", destination.display(), e))
        })?;

        let mut stream = result.into_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| StorageError::Backend(format!("S3 GET failed: {}", e)))?;
            file.write_all(&chunk).await.map_err(|e| {
                StorageError::Backend(format!("Failed to write {}: {}", destination.display(), e))
            })?;
        }

        file.flush().await.map_err(|e| {
            StorageError::Backend(format!("Failed to flush {}: {}", destination.display(), e))
        })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ObjectEntry>, StorageError> {
        let prefix = self.prefix.as_ref().map(|p| ObjectPath::from(p.as_str()));
        debug!("S3 LIST: {:?}", prefix);

        let mut entries = Vec::new();
        let mut stream = self.store.list(prefix.as_ref());

        while let Some(result) = stream.next().await {
            match result {
                Ok(meta) => {
                    entries.push(ObjectEntry {
                        key: self.strip_prefix(meta.location.as_ref()),
                        size: meta.size as u64,
                        last_modified: meta.last_modified,
                    });
                }
                Err(e) => {
                    return Err(StorageError::Backend(format!("S3 LIST failed: {}", e)));
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
        let path = self.full_path(key);
        let method = match method {
            SignMethod::Read => Method::GET,
            SignMethod::Write => Method::PUT,
        };
        debug!("S3 SIGN {}: {} ({:?})", method, path, expires_in);

        self.store
            .signed_url(method, &path, expires_in)
            .await
            .map_err(|e| StorageError::Backend(format!("S3 SIGN failed: {}", e)))
    }
}
