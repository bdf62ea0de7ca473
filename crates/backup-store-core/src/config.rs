//! Site configuration for the backup store.
//!
//! The configuration is resolved once by the caller at composition time and
//! passed into construction as a value; the library never reads ambient
//! global settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::storage::ObjectStorageConfig;
use crate::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Object storage the archives live in
    pub storage: ObjectStorageConfig,

    /// Disable retention cleanup. Callers performing retention sweeps must
    /// consult [`cleanup_allowed`](crate::BackupStore::cleanup_allowed).
    #[serde(default)]
    pub disable_cleanup: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Build configuration from a storage URL, with cleanup enabled
    pub fn from_url(url: &str) -> Result<Self> {
        Ok(Self {
            storage: ObjectStorageConfig::from_url(url)?,
            disable_cleanup: false,
        })
    }
}
