use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use melodeon_core::{SortDirection, TrackRecord};
use melodeon_local_library::{LibraryConfig, LibraryManager, parsing::track_uri};
use melodeon_paths::MelodeonPaths;

#[derive(Parser)]
#[command(name = "melodeon")]
#[command(about = "Scan a music folder and print its tracks as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a folder recursively
    Scan {
        root: PathBuf,

        /// Sort titles Z→A
        #[arg(long)]
        desc: bool,
    },
    /// Print the embedded cover of a file as a data URI
    Cover { file: PathBuf },
    /// Print the file:// URI of a track
    Uri { file: PathBuf },
    /// Create the config dir and write default settings if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Scan { root, desc } => {
            let mut manager = LibraryManager::load(config).context("loading settings")?;
            if desc {
                manager.set_sort(SortDirection::Desc);
            }
            debug!(sort = ?manager.sort(), "scanning");

            let records = manager
                .scan_library(&root)
                .await
                .with_context(|| format!("scanning {}", root.display()))?;
            let records: Vec<&TrackRecord> = records.iter().map(|r| &**r).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Cover { file } => {
            let manager = LibraryManager::load(config).context("loading settings")?;
            if let Some(cover) = manager.fetch_cover(&file).await {
                println!("{cover}");
            }
        }
        Command::Uri { file } => println!("{}", track_uri(&file)),
        Command::Init => {
            let paths = MelodeonPaths::new().context("preparing config dir")?;
            LibraryConfig::init(&paths).context("writing settings")?;
            println!("{}", paths.settings_file.display());
        }
    }

    Ok(())
}
