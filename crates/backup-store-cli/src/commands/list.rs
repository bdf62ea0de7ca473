use anyhow::Result;
use backup_store_core::{create_store, BackupStore, Config};
use tracing::info;

pub async fn run(config: &Config, format: &str) -> Result<()> {
    let store = create_store(config)?;

    info!("Listing backup archives");
    let mut files = store.list_backup_files().await?;
    files.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&files)?),
        _ => {
            if files.is_empty() {
                println!("No backup archives found");
            } else {
                for file in &files {
                    println!(
                        "{}  {:>12}  {}",
                        file.last_modified.to_rfc3339(),
                        file.size,
                        file.filename
                    );
                }
            }
        }
    }

    Ok(())
}
