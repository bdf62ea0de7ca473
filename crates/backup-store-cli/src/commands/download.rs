use anyhow::Result;
use backup_store_core::{create_store, BackupStore, Config};
use std::path::Path;
use tracing::info;

pub async fn run(config: &Config, filename: &str, destination: &str) -> Result<()> {
    let store = create_store(config)?;

    info!("Downloading {} to {}", filename, destination);
    store
        .download_file(filename, Path::new(destination), None)
        .await?;
    println!("Downloaded {} to {}", filename, destination);

    Ok(())
}
