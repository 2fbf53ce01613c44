//! Core data types produced by the reader.
//!
//! [`ImageMetadata`] is the decoded EXIF record; [`ImageReport`] wraps it
//! with file-level facts (format, size, hash) for a single read.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::format::ImageFormat;
use crate::tags::{Flash, ImageOrientation, LightSource, Unit};

/// A GPS position in decimal degrees.
///
/// Latitude and longitude always travel together; altitude is only ever
/// attached to an existing latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinates {
    /// Degrees, negative south of the equator
    pub latitude: f64,

    /// Degrees, negative west of Greenwich
    pub longitude: f64,

    /// Meters, negative below sea level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }
}

/// Metadata decoded from one image file.
///
/// `width` and `height` are display dimensions: already swapped when the
/// EXIF orientation is a quarter turn. Every other field is either absent or
/// fully decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    // === Dimensions ===
    /// Displayed width in pixels
    pub width: u32,

    /// Displayed height in pixels
    pub height: u32,

    // === Free text ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_computer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_printer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_serial_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_camera_model: Option<String>,

    // === Capture parameters ===
    /// Lens focal length in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,

    /// Pixels per `focal_plane_resolution_unit` along X
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_plane_x_resolution: Option<f64>,

    /// Pixels per `focal_plane_resolution_unit` along Y
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_plane_y_resolution: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_plane_resolution_unit: Option<Unit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_zoom_ratio: Option<f64>,

    /// Exposure time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,

    /// Equivalent focal length on 35mm film, in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length_35mm: Option<f64>,

    /// Distance to the subject in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_distance: Option<f64>,

    /// APEX shutter speed value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed_value: Option<f64>,

    /// Strobe energy in BCPS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_energy: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_source: Option<LightSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<ImageOrientation>,

    // === Location ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GpsCoordinates>,
}

impl ImageMetadata {
    /// A record holding only dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// Everything learned from reading one image file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    // === File Identification ===
    /// Path the file was read from
    pub file_path: PathBuf,

    /// Just the filename portion
    pub file_name: String,

    /// BLAKE3 hash of the file contents, when hashing is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    /// File size in bytes
    pub file_length: u64,

    /// Modification time in milliseconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,

    // === Container ===
    /// True for JPEG, PNG, GIF and BMP
    pub valid: bool,

    pub image_format: ImageFormat,

    /// MIME type of the detected container
    pub content_type: String,

    // === Decoded metadata ===
    pub metadata: ImageMetadata,
}
