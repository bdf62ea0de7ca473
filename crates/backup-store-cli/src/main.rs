use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "backup-store")]
#[command(about = "Backup archive storage tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storage URL (e.g. s3://bucket?region=us-east-1, memory://)
    #[arg(short, long, global = true)]
    storage: Option<String>,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List backup archives in the store
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show details for one backup archive
    Info {
        /// Archive filename (object key)
        filename: String,

        /// Attach a short-lived signed download URL
        #[arg(long)]
        download_url: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Upload a local archive (create-only, never overwrites)
    Upload {
        /// Local archive file to upload
        source: String,

        /// Object key; defaults to the source file name
        #[arg(short = 'n', long)]
        filename: Option<String>,

        /// Content type sent with the upload
        #[arg(long, default_value = "application/gzip")]
        content_type: String,
    },

    /// Download an archive to a local destination
    Download {
        /// Archive filename (object key)
        filename: String,

        /// Local destination path
        destination: String,
    },

    /// Delete an archive (no-op if absent)
    Delete {
        /// Archive filename (object key)
        filename: String,
    },

    /// Mint a signed upload URL valid for six hours
    UploadUrl {
        /// Archive filename (object key)
        filename: String,
    },

    /// Delete all but the newest archives
    Prune {
        /// Number of archives to keep
        #[arg(short, long)]
        keep: usize,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    // Priority: RUST_LOG env var > verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.storage.as_deref())?;

    match cli.command {
        Commands::List { format } => {
            commands::list::run(&config, &format).await?;
        }
        Commands::Info {
            filename,
            download_url,
            format,
        } => {
            commands::info::run(&config, &filename, download_url, &format).await?;
        }
        Commands::Upload {
            source,
            filename,
            content_type,
        } => {
            commands::upload::run(&config, &source, filename.as_deref(), &content_type).await?;
        }
        Commands::Download {
            filename,
            destination,
        } => {
            commands::download::run(&config, &filename, &destination).await?;
        }
        Commands::Delete { filename } => {
            commands::delete::run(&config, &filename).await?;
        }
        Commands::UploadUrl { filename } => {
            commands::upload_url::run(&config, &filename).await?;
        }
        Commands::Prune { keep, dry_run } => {
            commands::prune::run(&config, keep, dry_run).await?;
        }
    }

    Ok(())
}
