//! ALFA Media Gate - CLI
//!
//! Command-line access to the non-interactive operations.

use std::path::PathBuf;
use anyhow::Context;
use clap::{Parser, Subcommand};
use image::GenericImageView;

use alfa_media_gate::{fetch, storage, MediaConfig, RemoteFetcher};

#[derive(Parser)]
#[command(name = "alfa-media")]
#[command(author = "Karen Tonoyan")]
#[command(version = alfa_media_gate::VERSION)]
#[command(about = "ALFA Media Gate - Permission-gated image acquisition")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and decode a remote image
    Fetch {
        /// Image URL (defaults to the configured one)
        url: Option<String>,

        /// Save the decoded image as PNG
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the target path for a new photo
    PicturePath {
        /// Package files directory
        #[arg(short, long)]
        base: PathBuf,

        /// File name (defaults to a timestamped one)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = MediaConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command {
        Commands::Fetch { url, output } => {
            let url = url.unwrap_or_else(|| config.image_url.clone());
            println!("📥 Fetching: {}", url);

            // Off the main task, as the UI would do it
            let fetcher = RemoteFetcher::new();
            let task_url = url.clone();
            let img = tokio::spawn(async move { fetcher.fetch(&task_url).await })
                .await
                .context("fetch task panicked")?
                .with_context(|| format!("fetching {}", url))?;

            let (width, height) = img.dimensions();
            println!("✅ Decoded {}x{} image", width, height);

            if let Some(output) = output {
                let png = fetch::encode_png(&img)?;
                std::fs::write(&output, png)
                    .with_context(|| format!("writing {}", output.display()))?;
                println!("💾 Saved to: {}", output.display());
            }
        }

        Commands::PicturePath { base, name } => {
            let name = name.unwrap_or_else(|| storage::timestamped_photo_name(chrono::Local::now()));
            let path = storage::photo_file_path(&base, &config.pictures_subfolder, &name);
            println!("{}", path.display());
        }

        Commands::Config => {
            println!("{}", config.to_json()?);
        }
    }

    Ok(())
}
