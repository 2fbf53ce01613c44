//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::format::ThumbnailFormat;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.max_concurrent == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.max_concurrent must be > 0".into(),
            ));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.width and thumbnail.height must be > 0".into(),
            ));
        }
        if self.thumbnail.thumbnail_format() == ThumbnailFormat::Unknown {
            return Err(ConfigError::ValidationError(format!(
                "thumbnail.format '{}' is not one of jpeg, png, gif, bmp",
                self.thumbnail.format
            )));
        }
        if self.reader.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "reader.supported_formats must not be empty".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "json" | "jsonl") {
            return Err(ConfigError::ValidationError(
                "output.format must be 'json' or 'jsonl'".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be 'pretty' or 'json'".into(),
            ));
        }
        Ok(())
    }
}
