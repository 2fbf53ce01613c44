//! Orientation-aware thumbnail generation with a concurrency ceiling.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::ThumbnailConfig;
use crate::error::{ImageError, ImageResult};
use crate::format::ThumbnailFormat;
use crate::tags::ImageOrientation;

use super::geometry::ThumbnailPlan;
use super::raster::{ImageCrateBackend, RasterBackend};

/// Generates thumbnails, never running more than `max_concurrent` at once.
///
/// Clone the generator (or share it behind an `Arc`) to let several tasks
/// draw from the same ceiling. Separate `new` calls get separate ceilings.
#[derive(Clone)]
pub struct ThumbnailGenerator {
    backend: Arc<dyn RasterBackend>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl ThumbnailGenerator {
    /// Create a generator backed by the `image` crate.
    pub fn new(config: &ThumbnailConfig) -> Self {
        Self::with_backend(config, Arc::new(ImageCrateBackend))
    }

    /// Create a generator with a custom raster backend.
    pub fn with_backend(config: &ThumbnailConfig, backend: Arc<dyn RasterBackend>) -> Self {
        let max_concurrent = config.max_concurrent.max(1);
        Self {
            backend,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Generations currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.max_concurrent - self.permits.available_permits()
    }

    /// Write a `width`x`height` thumbnail of `source` to `destination`.
    ///
    /// A quarter or half turn `orientation` is corrected so the output is
    /// upright. Waits for a free slot when the ceiling is reached. On failure
    /// `destination` is left untouched.
    pub async fn generate(
        &self,
        source: &Path,
        orientation: Option<ImageOrientation>,
        destination: &Path,
        width: u32,
        height: u32,
        format: ThumbnailFormat,
    ) -> ImageResult<()> {
        let plan = ThumbnailPlan::for_request(width, height, orientation)?;

        if let Some(o) = orientation.filter(|o| o.is_mirrored()) {
            tracing::warn!(
                "Mirrored orientation {:?} on {:?} is not corrected",
                o,
                source
            );
        }

        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ImageError::Decode {
                path: source.to_path_buf(),
                message: format!("Thumbnail slot unavailable: {}", e),
            })?;

        let backend = Arc::clone(&self.backend);
        let source_owned = source.to_path_buf();
        let destination_owned = destination.to_path_buf();

        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            Self::render(
                backend.as_ref(),
                &plan,
                &source_owned,
                &destination_owned,
                format,
            )
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(e) => Err(ImageError::Decode {
                path: source.to_path_buf(),
                message: format!("Task join error: {}", e),
            }),
        }
    }

    /// Decode, resample, rotate, encode and write. Runs while holding a slot.
    fn render(
        backend: &dyn RasterBackend,
        plan: &ThumbnailPlan,
        source: &Path,
        destination: &Path,
        format: ThumbnailFormat,
    ) -> ImageResult<()> {
        let start = std::time::Instant::now();

        let image = backend.decode(source)?;
        plan.check_source(image.width(), image.height())?;

        let (scale_width, scale_height) = plan.scale_size();
        let scaled = backend.resample(&image, scale_width, scale_height);
        drop(image);

        let output = match plan.transform() {
            Some(transform) => backend.transform(&scaled, &transform, plan.width, plan.height),
            None => scaled,
        };

        let bytes = backend.encode(&output, format)?;
        write_atomically(destination, &bytes)?;

        tracing::debug!(
            "Thumbnail {:?} -> {:?} ({}x{}, {} quadrants) in {:?}",
            source,
            destination,
            plan.width,
            plan.height,
            plan.quadrants,
            start.elapsed()
        );
        Ok(())
    }
}

/// Write `bytes` to a uniquely named sibling temp file, then persist it over
/// `destination`.
fn write_atomically(destination: &Path, bytes: &[u8]) -> ImageResult<()> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| ImageError::io(destination, e))?;
    temp.write_all(bytes)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| ImageError::io(destination, e))?;
    temp.persist(destination)
        .map_err(|e| ImageError::io(destination, e.error))?;
    Ok(())
}
