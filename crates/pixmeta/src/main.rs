//! Pixmeta CLI - Read image metadata and generate upright thumbnails.
//!
//! # Usage
//!
//! ```bash
//! # Print the report for one image
//! pixmeta info photo.jpg
//!
//! # Reports for a whole directory, one JSON object per line
//! pixmeta info ./photos/ --format jsonl --output reports.jsonl
//!
//! # Thumbnail corrected for EXIF orientation
//! pixmeta thumbnail photo.jpg thumb.jpg --width 383 --height 512
//!
//! # Thumbnail a directory, four at a time
//! pixmeta thumbnail ./photos/ ./thumbs/ --parallel 4
//!
//! # View configuration
//! pixmeta config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Pixmeta - Read image metadata and generate upright thumbnails.
#[derive(Parser, Debug)]
#[command(name = "pixmeta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "PIXMETA_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print metadata reports for an image file or directory
    Info(cli::info::InfoArgs),

    /// Generate thumbnails at an exact size
    Thumbnail(cli::thumbnail::ThumbnailArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(cli::expand_path);

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match cli::load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) if config_path.is_none() => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pixmeta config path`."
            );
            pixmeta_core::Config::default()
        }
        Err(e) => return Err(e),
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Pixmeta v{}", pixmeta_core::VERSION);

    match cli.command {
        Commands::Info(args) => cli::info::execute(args, config).await,
        Commands::Thumbnail(args) => cli::thumbnail::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, config_path).await,
    }
}
