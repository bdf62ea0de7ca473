use anyhow::{bail, Result};
use backup_store_core::{create_store, BackupStore, Config};
use tracing::info;

pub async fn run(config: &Config, keep: usize, dry_run: bool) -> Result<()> {
    let store = create_store(config)?;

    if !store.cleanup_allowed() {
        bail!("Cleanup is disabled by configuration");
    }

    let mut files = store.list_backup_files().await?;
    files.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    let cut = keep.min(files.len());
    let stale = files.split_off(cut);
    if stale.is_empty() {
        println!("Nothing to prune ({} archives kept)", files.len());
        return Ok(());
    }

    for file in &stale {
        if dry_run {
            println!("Would delete {}", file.filename);
        } else {
            info!("Pruning {}", file.filename);
            store.delete_file(&file.filename).await?;
            println!("Deleted {}", file.filename);
        }
    }

    Ok(())
}
