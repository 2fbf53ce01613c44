//! Orientation-aware thumbnail geometry.
//!
//! Pure calculation: no pixels are touched here. Given a requested output
//! size and the source orientation, [`ThumbnailPlan`] decides which size to
//! resample to and which affine transform turns that resampled image into an
//! upright bitmap of exactly the requested size.
//!
//! Only the three rotation-only orientations (3, 6, 8) are corrected. The
//! mirrored orientations (2, 4, 5, 7) are treated like top-left.

use crate::error::{ImageError, ImageResult};
use crate::tags::ImageOrientation;

/// A 2D affine transform in image coordinates (y grows downwards).
///
/// Maps `(x, y)` to `(m00*x + m01*y + m02, m10*x + m11*y + m12)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        m00: 1.0,
        m01: 0.0,
        m02: 0.0,
        m10: 0.0,
        m11: 1.0,
        m12: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            m02: tx,
            m12: ty,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `quadrants * 90°` about `(cx, cy)`.
    ///
    /// Positive quadrants turn the +x axis towards +y, which is clockwise on
    /// screen. Sine and cosine are looked up rather than computed so the
    /// matrix entries are exactly 0 or ±1.
    pub fn quadrant_rotation(quadrants: i32, cx: f64, cy: f64) -> Self {
        let (cos, sin) = match quadrants.rem_euclid(4) {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        };
        Self {
            m00: cos,
            m01: -sin,
            m02: cx - cos * cx + sin * cy,
            m10: sin,
            m11: cos,
            m12: cy - sin * cx - cos * cy,
        }
    }

    /// Transform that applies `self` first, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self {
            m00: next.m00 * self.m00 + next.m01 * self.m10,
            m01: next.m00 * self.m01 + next.m01 * self.m11,
            m02: next.m00 * self.m02 + next.m01 * self.m12 + next.m02,
            m10: next.m10 * self.m00 + next.m11 * self.m10,
            m11: next.m10 * self.m01 + next.m11 * self.m11,
            m12: next.m10 * self.m02 + next.m11 * self.m12 + next.m12,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        )
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.m00 * self.m11 - self.m01 * self.m10;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m00 = self.m11 / det;
        let m01 = -self.m01 / det;
        let m10 = -self.m10 / det;
        let m11 = self.m00 / det;
        Some(Self {
            m00,
            m01,
            m02: -(m00 * self.m02 + m01 * self.m12),
            m10,
            m11,
            m12: -(m10 * self.m02 + m11 * self.m12),
        })
    }
}

/// How a thumbnail request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailPlan {
    /// Requested output width (final canvas)
    pub width: u32,

    /// Requested output height (final canvas)
    pub height: u32,

    /// Resample target is the requested size with width and height swapped
    pub exchange_dimensions: bool,

    /// Quarter turns to rotate by: 0, -1, -2 or -3
    pub quadrants: i32,
}

impl ThumbnailPlan {
    /// Plan a request before the source is decoded.
    ///
    /// Fails with `InvalidDimensions` when either side is zero.
    pub fn for_request(
        width: u32,
        height: u32,
        orientation: Option<ImageOrientation>,
    ) -> ImageResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions {
                width,
                height,
                message: "thumbnail width and height must be > 0".to_string(),
            });
        }

        let (exchange_dimensions, quadrants) = match orientation {
            Some(ImageOrientation::LeftBottom) => (true, -1),
            Some(ImageOrientation::BottomRight) => (false, -2),
            Some(ImageOrientation::RightTop) => (true, -3),
            _ => (false, 0),
        };

        Ok(Self {
            width,
            height,
            exchange_dimensions,
            quadrants,
        })
    }

    /// Plan a request against a source of known size.
    pub fn plan(
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
        orientation: Option<ImageOrientation>,
    ) -> ImageResult<Self> {
        let plan = Self::for_request(width, height, orientation)?;
        plan.check_source(source_width, source_height)?;
        Ok(plan)
    }

    /// Reject sources smaller than the resample target on either axis.
    /// Thumbnails are never upscaled.
    pub fn check_source(&self, source_width: u32, source_height: u32) -> ImageResult<()> {
        let (scale_width, scale_height) = self.scale_size();
        if scale_width > source_width || scale_height > source_height {
            return Err(ImageError::InvalidDimensions {
                width: self.width,
                height: self.height,
                message: format!(
                    "resample target {scale_width}x{scale_height} exceeds source {source_width}x{source_height}"
                ),
            });
        }
        Ok(())
    }

    /// Size to resample the source to, before any rotation.
    pub fn scale_size(&self) -> (u32, u32) {
        if self.exchange_dimensions {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn requires_rotation(&self) -> bool {
        self.quadrants != 0
    }

    /// Center of the resampled image.
    pub fn pivot(&self) -> (f64, f64) {
        let (scale_width, scale_height) = self.scale_size();
        (f64::from(scale_width) / 2.0, f64::from(scale_height) / 2.0)
    }

    /// Offset applied after rotating about the pivot so the result starts at
    /// the origin.
    ///
    /// Quarter turns move the image off-center when it is not square: the
    /// corners `(0, 0)` and `(0, h)` are pushed through the opposite quarter
    /// turn and their displaced coordinates give the offset back. A half turn
    /// about the center needs no offset.
    pub fn translation(&self) -> (f64, f64) {
        if self.quadrants == 0 || self.quadrants == -2 {
            return (0.0, 0.0);
        }
        let (cx, cy) = self.pivot();
        let (_, scale_height) = self.scale_size();
        let reverse = AffineTransform::quadrant_rotation(1, cx, cy);
        let (_, y_offset) = reverse.apply(0.0, 0.0);
        let (x_offset, _) = reverse.apply(0.0, f64::from(scale_height));
        (-x_offset, -y_offset)
    }

    /// Full rotate-then-translate transform from resampled image to output
    /// canvas, or `None` when no rotation is needed.
    pub fn transform(&self) -> Option<AffineTransform> {
        if !self.requires_rotation() {
            return None;
        }
        let (cx, cy) = self.pivot();
        let (tx, ty) = self.translation();
        let rotation = AffineTransform::quadrant_rotation(self.quadrants, cx, cy);
        Some(rotation.then(&AffineTransform::translation(tx, ty)))
    }
}
