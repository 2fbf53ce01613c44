//! The `pixmeta thumbnail` command.
//!
//! A file input writes one thumbnail. A directory input mirrors its tree
//! under the output directory, with every file sharing one generator so the
//! concurrency ceiling holds across the whole run.

use clap::{Args, ValueEnum};
use pixmeta_core::{Config, FileDiscovery, Pixmeta, ThumbnailFormat, ThumbnailOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Arguments for the `thumbnail` command.
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Image file or directory to thumbnail
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file, or output directory when the input is a directory
    #[arg(required = true)]
    pub output: PathBuf,

    /// Thumbnail width in pixels (defaults to `thumbnail.width`)
    #[arg(long)]
    pub width: Option<u32>,

    /// Thumbnail height in pixels (defaults to `thumbnail.height`)
    #[arg(long)]
    pub height: Option<u32>,

    /// Output format (defaults to the source image's format)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Don't rotate according to the EXIF orientation tag
    #[arg(long)]
    pub ignore_orientation: bool,

    /// Maximum thumbnails generated at once (defaults to `thumbnail.max_concurrent`)
    #[arg(short, long)]
    pub parallel: Option<usize>,
}

/// Thumbnail output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    #[value(alias = "jpg")]
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl From<Format> for ThumbnailFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Jpeg => ThumbnailFormat::Jpeg,
            Format::Png => ThumbnailFormat::Png,
            Format::Gif => ThumbnailFormat::Gif,
            Format::Bmp => ThumbnailFormat::Bmp,
        }
    }
}

/// Execute the thumbnail command.
pub async fn execute(args: ThumbnailArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }
    if let Some(parallel) = args.parallel {
        if parallel == 0 {
            anyhow::bail!("--parallel must be at least 1");
        }
        config.thumbnail.max_concurrent = parallel;
    }

    let mut options = ThumbnailOptions::new(
        args.width.unwrap_or(config.thumbnail.width),
        args.height.unwrap_or(config.thumbnail.height),
    );
    options.format = args.format.map(ThumbnailFormat::from);
    options.respect_orientation = !args.ignore_orientation;

    if args.input.is_file() {
        let destination = if args.output.is_dir() {
            destination_for(&args.input, &args.input, &args.output, options.format)
        } else {
            args.output.clone()
        };
        let pixmeta = Pixmeta::new(config);
        pixmeta
            .thumbnail(&args.input, &destination, &options)
            .await?;
        tracing::info!("Thumbnail written to {:?}", destination);
        return Ok(());
    }

    let files = FileDiscovery::new(&config.reader).discover(&args.input);
    if files.is_empty() {
        tracing::warn!("No supported image files found at {:?}", args.input);
        return Ok(());
    }
    tracing::info!(
        "Generating {} thumbnail(s), {} at a time",
        files.len(),
        config.thumbnail.max_concurrent
    );

    let jobs = plan_destinations(&args.input, files, &args.output, options.format)?;

    let pixmeta = Arc::new(Pixmeta::new(config));
    let options = Arc::new(options);
    let start_time = std::time::Instant::now();

    let mut tasks = JoinSet::new();
    for (source, destination) in jobs {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let pixmeta = Arc::clone(&pixmeta);
        let options = Arc::clone(&options);
        tasks.spawn(async move {
            let result = pixmeta.thumbnail(&source, &destination, &options).await;
            (source, result)
        });
    }

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (source, result) = joined?;
        match result {
            Ok(()) => succeeded += 1,
            Err(e) => {
                failed += 1;
                tracing::error!("Failed: {:?} - {}", source, e);
            }
        }
    }

    tracing::info!(
        "Generated {} thumbnail(s) in {:?}, {} failed",
        succeeded,
        start_time.elapsed(),
        failed
    );
    if failed > 0 {
        anyhow::bail!("{} thumbnail(s) failed", failed);
    }
    Ok(())
}

/// Pair every source with its destination, refusing to run when two
/// sources would write the same thumbnail.
fn plan_destinations(
    input_root: &Path,
    files: Vec<PathBuf>,
    output_root: &Path,
    format: Option<ThumbnailFormat>,
) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(files.len());
    let mut jobs = Vec::with_capacity(files.len());
    for source in files {
        let destination = destination_for(input_root, &source, output_root, format);
        if let Some(previous) = claimed.insert(destination.clone(), source.clone()) {
            anyhow::bail!(
                "{:?} and {:?} would both be written to {:?}\n\n  Hint: Rename one of them or omit --format.",
                previous,
                source,
                destination
            );
        }
        jobs.push((source, destination));
    }
    Ok(jobs)
}

/// Output path for `source`, found under `input_root`, inside `output_root`.
/// An explicit format replaces the extension.
fn destination_for(
    input_root: &Path,
    source: &Path,
    output_root: &Path,
    format: Option<ThumbnailFormat>,
) -> PathBuf {
    let relative = if input_root == source {
        source.file_name().map(PathBuf::from).unwrap_or_default()
    } else {
        source
            .strip_prefix(input_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source.file_name().map(PathBuf::from).unwrap_or_default())
    };

    let destination = output_root.join(relative);
    match format {
        Some(format) => destination.with_extension(format.extension()),
        None => destination,
    }
}
