//! Reading image files into [`ImageReport`]s.
//!
//! The container is probed by content, not extension. Only JPEG files have
//! their EXIF block read; other supported containers report dimensions only.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::config::ReaderConfig;
use crate::error::{ImageError, ImageResult};
use crate::format::ImageFormat;
use crate::tags::{ExifTag, ImageOrientation, RawValue, TagSource};
use crate::types::{ImageMetadata, ImageReport};

use super::hash::Hasher;
use super::metadata::MetadataExtractor;

/// Container facts learned without decoding pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub format: ImageFormat,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Reads image files and their EXIF metadata.
pub struct ImageReader {
    config: ReaderConfig,
}

impl ImageReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file into a full report.
    ///
    /// Fails with `Io` when the file can't be read and `InvalidImage` when
    /// the container is unrecognized or its EXIF block is corrupt.
    pub fn read_image(&self, path: &Path) -> ImageResult<ImageReport> {
        let start = std::time::Instant::now();

        let file_meta = std::fs::metadata(path).map_err(|e| ImageError::io(path, e))?;
        let container = Self::probe(path)?;

        let metadata = if container.format == ImageFormat::Jpeg {
            match Self::read_exif(path)? {
                Some(exif) => MetadataExtractor::extract(&exif, container.width, container.height),
                None => ImageMetadata::with_dimensions(container.width, container.height),
            }
        } else {
            ImageMetadata::with_dimensions(container.width, container.height)
        };

        let content_hash = if self.config.compute_hash {
            Some(Hasher::content_hash(path).map_err(|e| ImageError::io(path, e))?)
        } else {
            None
        };

        let last_modified = file_meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64);

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!(
            "Read {:?} in {:?} ({:?}, {}x{})",
            file_name,
            start.elapsed(),
            container.format,
            metadata.width,
            metadata.height
        );

        Ok(ImageReport {
            file_path: path.to_path_buf(),
            file_name,
            content_hash,
            file_length: file_meta.len(),
            last_modified,
            valid: container.format.is_supported(),
            image_format: container.format,
            content_type: container.content_type.to_string(),
            metadata,
        })
    }

    /// Whether `path` holds a JPEG, PNG, GIF or BMP container.
    ///
    /// Only a failure to open the file is an error; anything unreadable as
    /// an image is simply not valid.
    pub fn check_valid_file(path: &Path) -> ImageResult<bool> {
        match Self::probe(path) {
            Ok(info) => Ok(info.format.is_supported()),
            Err(ImageError::InvalidImage { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Read only the EXIF orientation. Non-JPEG files and JPEGs without the
    /// tag give `None`.
    pub fn read_orientation(path: &Path) -> ImageResult<Option<ImageOrientation>> {
        if Self::probe(path)?.format != ImageFormat::Jpeg {
            return Ok(None);
        }
        let Some(exif) = Self::read_exif(path)? else {
            return Ok(None);
        };
        match exif.get(ExifTag::Orientation) {
            Some(RawValue::Short(v)) => Ok(Some(ImageOrientation::from_value(v))),
            _ => Ok(None),
        }
    }

    /// Detect the container format and stored dimensions.
    pub fn probe(path: &Path) -> ImageResult<ContainerInfo> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| ImageError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| ImageError::io(path, e))?;

        let Some(raster_format) = reader.format() else {
            return Err(ImageError::invalid_image(path, "unrecognized image format"));
        };

        let (width, height) = reader.into_dimensions().map_err(|e| match e {
            image::ImageError::IoError(source) => ImageError::io(path, source),
            other => ImageError::invalid_image(path, other.to_string()),
        })?;

        Ok(ContainerInfo {
            format: ImageFormat::from_raster(raster_format),
            content_type: raster_format.to_mime_type(),
            width,
            height,
        })
    }

    /// Read the EXIF block, or `None` when the file has none.
    fn read_exif(path: &Path) -> ImageResult<Option<exif::Exif>> {
        let file = File::open(path).map_err(|e| ImageError::io(path, e))?;
        let mut reader = BufReader::new(file);

        match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => Ok(Some(exif)),
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(exif::Error::Io(e)) => Err(ImageError::io(path, e)),
            Err(e) => Err(ImageError::invalid_image(
                path,
                format!("corrupt EXIF block: {e}"),
            )),
        }
    }
}
