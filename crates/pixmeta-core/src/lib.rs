//! Pixmeta Core - EXIF metadata extraction and orientation-aware thumbnails.
//!
//! Reads an image file into a structured report (container facts plus a
//! decoded EXIF metadata record) and generates upright thumbnails of an exact
//! requested size, with a bounded number running at once.
//!
//! # Architecture
//!
//! ```text
//! File → Probe container → Read EXIF (JPEG) → Extract metadata → Report
//! File → Decode → Resample → Rotate (orientation) → Encode → Thumbnail
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixmeta_core::{Config, Pixmeta, ThumbnailOptions};
//!
//! #[tokio::main]
//! async fn main() -> pixmeta_core::Result<()> {
//!     let pixmeta = Pixmeta::new(Config::load()?);
//!
//!     let report = pixmeta.read("./photo.jpg")?;
//!     println!("{}x{}", report.metadata.width, report.metadata.height);
//!
//!     pixmeta
//!         .thumbnail("./photo.jpg", "./thumb.jpg", &ThumbnailOptions::new(383, 512))
//!         .await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod tags;
pub mod types;

use std::path::Path;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ImageError, ImageResult, PixmetaError, Result};
pub use format::{ImageFormat, ThumbnailFormat};
pub use output::{OutputFormat, ReportEntry, ReportWriter};
pub use pipeline::{FileDiscovery, ImageReader, MetadataExtractor, ThumbnailGenerator, ThumbnailPlan};
pub use tags::{ExifTag, Flash, ImageOrientation, LightSource, RawValue, TagSource, Unit};
pub use types::{GpsCoordinates, ImageMetadata, ImageReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for one thumbnail request.
#[derive(Debug, Clone)]
pub struct ThumbnailOptions {
    pub width: u32,
    pub height: u32,
    /// Output format. `None` keeps the source container's format.
    pub format: Option<ThumbnailFormat>,
    /// Correct the EXIF orientation so the thumbnail is upright
    pub respect_orientation: bool,
}

impl ThumbnailOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: None,
            respect_orientation: true,
        }
    }

    pub fn with_format(mut self, format: ThumbnailFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Pixmeta entry point: one reader and one thumbnail generator sharing a
/// configuration.
///
/// The generator's concurrency ceiling is per instance, so construct one
/// `Pixmeta` and share it rather than building one per request.
pub struct Pixmeta {
    config: Config,
    reader: ImageReader,
    thumbnails: ThumbnailGenerator,
}

impl Pixmeta {
    /// Create a new Pixmeta instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Pixmeta v{}", VERSION);
        Self {
            reader: ImageReader::new(config.reader.clone()),
            thumbnails: ThumbnailGenerator::new(&config.thumbnail),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generator(&self) -> &ThumbnailGenerator {
        &self.thumbnails
    }

    /// Read a file into a report.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<ImageReport> {
        Ok(self.reader.read_image(path.as_ref())?)
    }

    /// Write a thumbnail of `source` to `destination`.
    pub async fn thumbnail(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        options: &ThumbnailOptions,
    ) -> Result<()> {
        let source = source.as_ref();
        ThumbnailPlan::for_request(options.width, options.height, None)?;

        let needs_probe = options.respect_orientation || options.format.is_none();
        let container = if needs_probe {
            Some(ImageReader::probe(source)?)
        } else {
            None
        };

        let orientation = match &container {
            Some(info) if options.respect_orientation && info.format == ImageFormat::Jpeg => {
                ImageReader::read_orientation(source)?
            }
            _ => None,
        };

        let format = options.format.unwrap_or_else(|| {
            container
                .map(|info| ThumbnailFormat::from_image_format(info.format))
                .unwrap_or_else(|| self.config.thumbnail.thumbnail_format())
        });

        self.thumbnails
            .generate(
                source,
                orientation,
                destination.as_ref(),
                options.width,
                options.height,
                format,
            )
            .await?;
        Ok(())
    }
}
