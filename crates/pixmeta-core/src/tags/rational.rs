//! EXIF rationals and their conversion to signed physical quantities.
//!
//! EXIF stores most measurements as unsigned numerator/denominator pairs and
//! moves the sign into a separate reference tag (N/S, E/W, above/below sea
//! level). The functions here fold those references back into plain `f64`
//! values.

use serde::{Deserialize, Serialize};

/// Positive hemisphere token for GPS latitude references.
pub const LATITUDE_REF_NORTH: &str = "N";

/// Positive hemisphere token for GPS longitude references.
pub const LONGITUDE_REF_EAST: &str = "E";

/// GPS altitude reference value meaning "above sea level".
pub const ALTITUDE_REF_ABOVE_SEA_LEVEL: u16 = 0;

/// A numerator/denominator pair as stored in a TIFF RATIONAL or SRATIONAL field.
///
/// Both halves are widened to `i64` so unsigned and signed rationals share
/// one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    pub const fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    /// Floating-point quotient. A zero denominator is not guarded: the result
    /// is whatever IEEE division gives (infinity or NaN).
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<exif::Rational> for Rational {
    fn from(r: exif::Rational) -> Self {
        Self::new(i64::from(r.num), i64::from(r.denom))
    }
}

impl From<exif::SRational> for Rational {
    fn from(r: exif::SRational) -> Self {
        Self::new(i64::from(r.num), i64::from(r.denom))
    }
}

/// Convert a `[degrees, minutes, seconds]` triplet to decimal degrees.
///
/// Returns `None` when fewer than three components are present. Extra
/// components are ignored.
pub fn dms_to_degrees(dms: &[Rational]) -> Option<f64> {
    match dms {
        [degrees, minutes, seconds, ..] => {
            Some(degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0)
        }
        _ => None,
    }
}

/// Decode a GPS coordinate, applying the hemisphere reference.
///
/// A missing reference defaults to `positive`. The value is negated when the
/// upper-cased reference does not contain the positive token, so `"S"`,
/// `"w"` or any unexpected string all flip the sign.
pub fn signed_coordinate(dms: &[Rational], reference: Option<&str>, positive: &str) -> Option<f64> {
    let degrees = dms_to_degrees(dms)?;
    let reference = reference.unwrap_or(positive);
    if reference
        .to_uppercase()
        .contains(positive.to_uppercase().as_str())
    {
        Some(degrees)
    } else {
        Some(-degrees)
    }
}

/// Decode a GPS altitude in meters. Any reference other than "above sea
/// level" (including unknown codes) negates the value.
pub fn signed_altitude(meters: Rational, reference: Option<u16>) -> f64 {
    let altitude = meters.to_f64();
    match reference.unwrap_or(ALTITUDE_REF_ABOVE_SEA_LEVEL) {
        ALTITUDE_REF_ABOVE_SEA_LEVEL => altitude,
        _ => -altitude,
    }
}
