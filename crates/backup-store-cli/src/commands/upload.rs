use anyhow::{anyhow, Result};
use backup_store_core::{create_store, BackupStore, Config};
use std::path::Path;
use tracing::info;

pub async fn run(
    config: &Config,
    source: &str,
    filename: Option<&str>,
    content_type: &str,
) -> Result<()> {
    let source = Path::new(source);
    let filename = match filename {
        Some(name) => name.to_string(),
        None => source
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot derive an object key from {}", source.display()))?,
    };

    let store = create_store(config)?;

    info!("Uploading {} as {}", source.display(), filename);
    store.upload_file(&filename, source, content_type).await?;
    println!("Uploaded {}", filename);

    Ok(())
}
