//! Error types for metadata extraction and thumbnail generation.
//!
//! Errors carry the context needed to act on them (file paths, requested
//! sizes, target formats). Per-tag decode problems inside the extractor are
//! not errors at all: those fields are simply left unset.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Pixmeta operations.
#[derive(Error, Debug)]
pub enum PixmetaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image reading or thumbnail errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while reading images or generating thumbnails.
#[derive(Error, Debug)]
pub enum ImageError {
    /// Not a recognized raster format, or the embedded EXIF block is corrupt
    #[error("Invalid image {path}: {message}")]
    InvalidImage { path: PathBuf, message: String },

    /// Underlying file read/write failure
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested size is zero or exceeds the source on some axis
    #[error("Invalid thumbnail dimensions {width}x{height}: {message}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        message: String,
    },

    /// The raster decoder rejected the input file
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The raster encoder rejected the output buffer or format
    #[error("Encode error ({format}): {message}")]
    Encode { format: String, message: String },
}

impl ImageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_image(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Pixmeta results.
pub type Result<T> = std::result::Result<T, PixmetaError>;

/// Convenience type alias for image-level results.
pub type ImageResult<T> = std::result::Result<T, ImageError>;
