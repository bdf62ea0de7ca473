use anyhow::{bail, Result};
use backup_store_core::{create_store, BackupStore, Config};

pub async fn run(config: &Config, filename: &str, download_url: bool, format: &str) -> Result<()> {
    let store = create_store(config)?;

    let Some(file) = store.file(filename, download_url).await? else {
        bail!("No backup archive named {}", filename);
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&file)?),
        _ => {
            println!("Filename: {}", file.filename);
            println!("Size: {} bytes", file.size);
            println!("Last modified: {}", file.last_modified.to_rfc3339());
            if let Some(url) = &file.download_source {
                println!("Download URL: {}", url);
            }
        }
    }

    Ok(())
}
