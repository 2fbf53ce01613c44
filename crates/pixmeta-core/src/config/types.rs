//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::format::ThumbnailFormat;

/// Image reader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Compute a BLAKE3 content hash for every file read
    pub compute_hash: bool,

    /// File extensions picked up when scanning directories
    pub supported_formats: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            compute_hash: true,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
                "bmp".to_string(),
            ],
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Maximum thumbnails generated at the same time.
    ///
    /// Each in-flight generation holds a fully decoded source image, so this
    /// bounds peak memory. Raise it on machines with memory to spare.
    pub max_concurrent: usize,

    /// Default output width in pixels
    pub width: u32,

    /// Default output height in pixels
    pub height: u32,

    /// Default output format ("jpeg", "png", "gif" or "bmp")
    pub format: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 1,
            width: 256,
            height: 256,
            format: "jpeg".to_string(),
        }
    }
}

impl ThumbnailConfig {
    pub fn thumbnail_format(&self) -> ThumbnailFormat {
        ThumbnailFormat::from_value(&self.format)
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
