//! Object storage capability abstraction and implementations.
//!
//! This module models the object store the backup system talks to: existence
//! checks, metadata, streaming transfers, namespace listing, and signed-URL
//! issuance. Two implementations are provided:
//!
//! - **S3**: AWS S3 and S3-compatible services (MinIO, Ceph RGW, etc.)
//! - **Memory**: In-memory storage (for testing)

mod backend;
mod config;
mod memory;
mod s3;

pub use backend::{ObjectEntry, ObjectMetadata, ObjectStorage, SignMethod};
pub use config::ObjectStorageConfig;
pub use memory::MemoryStorage;
pub use s3::{S3Config, S3Storage};

use crate::Result;
use std::sync::Arc;

/// Create an object storage backend from configuration.
pub fn create_storage(config: &ObjectStorageConfig) -> Result<Arc<dyn ObjectStorage>> {
    match config {
        ObjectStorageConfig::S3 {
            bucket,
            region,
            endpoint,
            access_key,
            secret_key,
            prefix,
            allow_http,
        } => {
            let s3_config = S3Config {
                bucket: bucket.clone(),
                region: region.clone(),
                endpoint: endpoint.clone(),
                access_key_id: access_key.clone(),
                secret_access_key: secret_key.clone(),
                prefix: prefix.clone(),
                allow_http: *allow_http,
            };
            Ok(Arc::new(S3Storage::new(s3_config)?))
        }

        ObjectStorageConfig::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
