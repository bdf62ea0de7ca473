use anyhow::Result;
use backup_store_core::{create_store, BackupStore, Config};
use tracing::info;

pub async fn run(config: &Config, filename: &str) -> Result<()> {
    let store = create_store(config)?;

    info!("Deleting {}", filename);
    store.delete_file(filename).await?;
    println!("Deleted {}", filename);

    Ok(())
}
