//! EXIF tag model: identifiers, typed raw values, rationals, and the
//! enumerated values that short-typed tags decode to.

pub mod rational;
pub mod source;
pub mod values;

pub use rational::{dms_to_degrees, signed_altitude, signed_coordinate, Rational};
pub use source::{ExifTag, Ifd, RawValue, TagSource};
pub use values::{Flash, ImageOrientation, LightSource, Unit};
