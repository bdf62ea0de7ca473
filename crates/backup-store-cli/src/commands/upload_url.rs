use anyhow::Result;
use backup_store_core::{create_store, BackupStore, Config};

pub async fn run(config: &Config, filename: &str) -> Result<()> {
    let store = create_store(config)?;

    let url = store.generate_upload_url(filename).await?;
    println!("{}", url);

    Ok(())
}
