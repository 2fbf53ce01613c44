//! Container formats recognized by the reader and formats the thumbnail
//! generator can write.

use serde::{Deserialize, Serialize};

/// Container format of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    #[default]
    Unknown,
}

impl ImageFormat {
    /// Map a format detected by the `image` crate. Anything outside the four
    /// supported containers is `Unknown`.
    pub fn from_raster(format: image::ImageFormat) -> Self {
        match format {
            image::ImageFormat::Jpeg => Self::Jpeg,
            image::ImageFormat::Png => Self::Png,
            image::ImageFormat::Gif => Self::Gif,
            image::ImageFormat::Bmp => Self::Bmp,
            _ => Self::Unknown,
        }
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }
}

/// Output format for generated thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Unknown,
}

impl ThumbnailFormat {
    /// Parse a format name, case-insensitively. `jpg` is accepted for JPEG.
    pub fn from_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "bmp" => Self::Bmp,
            _ => Self::Unknown,
        }
    }

    /// Transcode target matching a source container.
    pub fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => Self::Jpeg,
            ImageFormat::Png => Self::Png,
            ImageFormat::Gif => Self::Gif,
            ImageFormat::Bmp => Self::Bmp,
            ImageFormat::Unknown => Self::Unknown,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Unknown => "unknown",
        }
    }

    /// File extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            other => other.value(),
        }
    }

    /// Encoder format, or `None` for `Unknown`.
    pub fn to_raster(self) -> Option<image::ImageFormat> {
        match self {
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Png => Some(image::ImageFormat::Png),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Unknown => None,
        }
    }

    /// Whether the encoder keeps an alpha channel. Only PNG does.
    pub fn has_alpha(self) -> bool {
        self == Self::Png
    }
}

impl std::fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
