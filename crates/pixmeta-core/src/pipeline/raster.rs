//! Raster operations used by the thumbnail generator.
//!
//! [`RasterBackend`] is the seam between thumbnail orchestration and pixel
//! work. The production implementation, [`ImageCrateBackend`], is pure Rust:
//!
//! | Operation | Implementation |
//! |---|---|
//! | Decode | `image::ImageReader` with content-based format detection |
//! | Resample | `DynamicImage::thumbnail_exact` (area averaging) |
//! | Transform | inverse-mapped nearest-pixel warp onto a fresh canvas |
//! | Encode | `DynamicImage::write_to` into an in-memory buffer |

use image::{DynamicImage, GenericImageView, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::{ImageError, ImageResult};
use crate::format::ThumbnailFormat;

use super::geometry::AffineTransform;

/// Pixel-level operations needed to produce a thumbnail.
pub trait RasterBackend: Send + Sync {
    /// Decode a file into a pixel buffer.
    fn decode(&self, path: &Path) -> ImageResult<DynamicImage>;

    /// Resample to exactly `width`x`height`.
    fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Draw `image` through `transform` onto a `width`x`height` canvas.
    fn transform(
        &self,
        image: &DynamicImage,
        transform: &AffineTransform,
        width: u32,
        height: u32,
    ) -> DynamicImage;

    /// Encode to `format`, returning the file bytes.
    fn encode(&self, image: &DynamicImage, format: ThumbnailFormat) -> ImageResult<Vec<u8>>;
}

/// [`RasterBackend`] built on the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateBackend;

impl RasterBackend for ImageCrateBackend {
    fn decode(&self, path: &Path) -> ImageResult<DynamicImage> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| ImageError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| ImageError::io(path, e))?;
        reader.decode().map_err(|e| ImageError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        image.thumbnail_exact(width, height)
    }

    fn transform(
        &self,
        image: &DynamicImage,
        transform: &AffineTransform,
        width: u32,
        height: u32,
    ) -> DynamicImage {
        let source = image.to_rgba8();
        let mut canvas = RgbaImage::new(width, height);
        let Some(inverse) = transform.inverse() else {
            return DynamicImage::ImageRgba8(canvas);
        };

        // Sample at pixel centers so quarter turns land exactly on source pixels.
        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            let (sx, sy) = inverse.apply(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let (sx, sy) = (sx.floor(), sy.floor());
            if sx >= 0.0
                && sy >= 0.0
                && sx < f64::from(source.width())
                && sy < f64::from(source.height())
            {
                *pixel = *source.get_pixel(sx as u32, sy as u32);
            }
        }

        DynamicImage::ImageRgba8(canvas)
    }

    fn encode(&self, image: &DynamicImage, format: ThumbnailFormat) -> ImageResult<Vec<u8>> {
        let target = format.to_raster().ok_or_else(|| ImageError::Encode {
            format: format.to_string(),
            message: "no encoder for this thumbnail format".to_string(),
        })?;

        let image = if format.has_alpha() {
            DynamicImage::ImageRgba8(image.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, target)
            .map_err(|e| ImageError::Encode {
                format: format.to_string(),
                message: e.to_string(),
            })?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::geometry::ThumbnailPlan;
    use crate::tags::ImageOrientation;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 4x2 image, red everywhere except a blue top-right pixel.
    fn marked_image() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(4, 2, RED);
        img.put_pixel(3, 0, BLUE);
        DynamicImage::ImageRgba8(img)
    }

    fn rotate(orientation: ImageOrientation, width: u32, height: u32) -> RgbaImage {
        let plan = ThumbnailPlan::for_request(width, height, Some(orientation)).unwrap();
        let transform = plan.transform().unwrap();
        ImageCrateBackend
            .transform(&marked_image(), &transform, width, height)
            .to_rgba8()
    }

    #[test]
    fn test_left_bottom_moves_top_right_to_top_left() {
        let out = rotate(ImageOrientation::LeftBottom, 2, 4);
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(*out.get_pixel(0, 0), BLUE);
        assert_eq!(out.pixels().filter(|p| **p == BLUE).count(), 1);
        assert!(out.pixels().all(|p| p.0[3] == 255), "canvas fully covered");
    }

    #[test]
    fn test_right_top_moves_top_right_to_bottom_right() {
        let out = rotate(ImageOrientation::RightTop, 2, 4);
        assert_eq!(*out.get_pixel(1, 3), BLUE);
        assert!(out.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_bottom_right_moves_top_right_to_bottom_left() {
        let out = rotate(ImageOrientation::BottomRight, 4, 2);
        assert_eq!(*out.get_pixel(0, 1), BLUE);
        assert!(out.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_resample_exact_size() {
        let img = DynamicImage::new_rgb8(1000, 500);
        let out = ImageCrateBackend.resample(&img, 120, 37);
        assert_eq!(out.dimensions(), (120, 37));
    }

    #[test]
    fn test_encode_formats() {
        let img = marked_image();
        let png = ImageCrateBackend.encode(&img, ThumbnailFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let jpeg = ImageCrateBackend.encode(&img, ThumbnailFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let bmp = ImageCrateBackend.encode(&img, ThumbnailFormat::Bmp).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_encode_unknown_format_fails() {
        let result = ImageCrateBackend.encode(&marked_image(), ThumbnailFormat::Unknown);
        assert!(matches!(result, Err(ImageError::Encode { .. })));
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let result = ImageCrateBackend.decode(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(ImageError::Io { .. })));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let result = ImageCrateBackend.decode(&path);
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }
}
