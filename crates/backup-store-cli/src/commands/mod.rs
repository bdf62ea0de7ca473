pub mod delete;
pub mod download;
pub mod info;
pub mod list;
pub mod prune;
pub mod upload;
pub mod upload_url;

use anyhow::{bail, Result};
use backup_store_core::Config;

/// Resolve the configuration from either a YAML file or a storage URL.
pub fn load_config(config: Option<&str>, storage: Option<&str>) -> Result<Config> {
    match (config, storage) {
        (Some(path), None) => Ok(Config::from_yaml_file(path)?),
        (None, Some(url)) => Ok(Config::from_url(url)?),
        (Some(_), Some(_)) => bail!("Pass either --config or --storage, not both"),
        (None, None) => bail!("One of --config or --storage is required"),
    }
}
