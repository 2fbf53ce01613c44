//! EXIF metadata extraction.
//!
//! Works against any [`TagSource`], so the decoding rules below can be tested
//! without building JPEG files. Every field degrades independently: a missing
//! tag or one of the wrong type leaves its field unset and never aborts the
//! extraction.

use crate::tags::rational::{LATITUDE_REF_NORTH, LONGITUDE_REF_EAST};
use crate::tags::{
    signed_altitude, signed_coordinate, ExifTag, Flash, ImageOrientation, LightSource, RawValue,
    TagSource, Unit,
};
use crate::types::{GpsCoordinates, ImageMetadata};

/// Decodes raw EXIF tags into an [`ImageMetadata`] record.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Build a record from `tags` for an image stored as `width`x`height`.
    ///
    /// The stored dimensions are swapped in the result when the orientation
    /// is a quarter turn (right-top or left-bottom).
    pub fn extract<S: TagSource + ?Sized>(tags: &S, width: u32, height: u32) -> ImageMetadata {
        let orientation = Self::get_short(tags, ExifTag::Orientation).map(ImageOrientation::from_value);

        let (width, height) = match orientation {
            Some(o) if o.swaps_dimensions() => (height, width),
            _ => (width, height),
        };

        ImageMetadata {
            width,
            height,
            maker: Self::get_text(tags, ExifTag::Make),
            model: Self::get_text(tags, ExifTag::Model),
            artist: Self::get_text(tags, ExifTag::Artist),
            copyright: Self::get_text(tags, ExifTag::Copyright),
            document_name: Self::get_text(tags, ExifTag::DocumentName),
            host_computer: Self::get_text(tags, ExifTag::HostComputer),
            image_description: Self::get_text(tags, ExifTag::ImageDescription),
            software: Self::get_text(tags, ExifTag::Software),
            target_printer: Self::get_text(tags, ExifTag::TargetPrinter),
            camera_serial_number: Self::get_text(tags, ExifTag::BodySerialNumber),
            unique_camera_model: Self::get_text(tags, ExifTag::UniqueCameraModel),
            focal_length: Self::get_rational(tags, ExifTag::FocalLength),
            focal_plane_x_resolution: Self::get_rational(tags, ExifTag::FocalPlaneXResolution),
            focal_plane_y_resolution: Self::get_rational(tags, ExifTag::FocalPlaneYResolution),
            focal_plane_resolution_unit: Self::get_short(tags, ExifTag::FocalPlaneResolutionUnit)
                .map(Unit::from_value),
            digital_zoom_ratio: Self::get_rational(tags, ExifTag::DigitalZoomRatio),
            exposure_time: Self::get_rational(tags, ExifTag::ExposureTime),
            f_number: Self::get_rational(tags, ExifTag::FNumber),
            focal_length_35mm: Self::get_rational(tags, ExifTag::FocalLengthIn35mmFilm),
            subject_distance: Self::get_rational(tags, ExifTag::SubjectDistance),
            shutter_speed_value: Self::get_rational(tags, ExifTag::ShutterSpeedValue),
            flash_energy: Self::get_rational(tags, ExifTag::FlashEnergy),
            flash: Self::get_short(tags, ExifTag::Flash).map(Flash::from_value),
            light_source: Self::get_short(tags, ExifTag::LightSource).map(LightSource::from_value),
            iso: Self::get_short(tags, ExifTag::Iso).map(u32::from),
            orientation,
            location: Self::get_location(tags),
        }
    }

    /// Single rational tag as `num / denom`.
    fn get_rational<S: TagSource + ?Sized>(tags: &S, tag: ExifTag) -> Option<f64> {
        match tags.get(tag)? {
            RawValue::Rational(r) => Some(r.to_f64()),
            _ => None,
        }
    }

    fn get_short<S: TagSource + ?Sized>(tags: &S, tag: ExifTag) -> Option<u16> {
        match tags.get(tag)? {
            RawValue::Short(v) => Some(v),
            _ => None,
        }
    }

    /// Free-text field with the EXIF quote artifact removed.
    fn get_text<S: TagSource + ?Sized>(tags: &S, tag: ExifTag) -> Option<String> {
        tags.get(tag).map(|v| trim_quotes(&v.display_string()))
    }

    fn get_reference<S: TagSource + ?Sized>(tags: &S, tag: ExifTag) -> Option<String> {
        match tags.get(tag)? {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn get_coordinate<S: TagSource + ?Sized>(
        tags: &S,
        value_tag: ExifTag,
        ref_tag: ExifTag,
        positive: &str,
    ) -> Option<f64> {
        let dms = match tags.get(value_tag)? {
            RawValue::Rationals(dms) => dms,
            _ => return None,
        };
        let reference = Self::get_reference(tags, ref_tag);
        signed_coordinate(&dms, reference.as_deref(), positive)
    }

    /// Latitude and longitude as a pair, plus altitude when available.
    fn get_location<S: TagSource + ?Sized>(tags: &S) -> Option<GpsCoordinates> {
        let latitude = Self::get_coordinate(
            tags,
            ExifTag::GpsLatitude,
            ExifTag::GpsLatitudeRef,
            LATITUDE_REF_NORTH,
        )?;
        let longitude = Self::get_coordinate(
            tags,
            ExifTag::GpsLongitude,
            ExifTag::GpsLongitudeRef,
            LONGITUDE_REF_EAST,
        )?;

        let coordinates = GpsCoordinates::new(latitude, longitude);
        match tags.get(ExifTag::GpsAltitude) {
            Some(RawValue::Rational(meters)) => {
                let reference = Self::get_short(tags, ExifTag::GpsAltitudeRef);
                Some(coordinates.with_altitude(signed_altitude(meters, reference)))
            }
            _ => Some(coordinates),
        }
    }
}

/// Strip at most one leading and one trailing apostrophe.
pub fn trim_quotes(s: &str) -> String {
    let s = s.strip_prefix('\'').unwrap_or(s);
    let s = s.strip_suffix('\'').unwrap_or(s);
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Rational;
    use std::collections::HashMap;

    fn r(num: i64, denom: i64) -> Rational {
        Rational::new(num, denom)
    }

    fn tags(entries: Vec<(ExifTag, RawValue)>) -> HashMap<ExifTag, RawValue> {
        entries.into_iter().collect()
    }

    fn dms(d: i64, m: i64, s: i64) -> RawValue {
        RawValue::Rationals(vec![r(d, 1), r(m, 1), r(s, 1)])
    }

    #[test]
    fn test_empty_source_keeps_dimensions() {
        let metadata = MetadataExtractor::extract(&tags(vec![]), 2592, 1936);
        assert_eq!(metadata, ImageMetadata::with_dimensions(2592, 1936));
    }

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("'Canon'"), "Canon");
        assert_eq!(trim_quotes("''Canon''"), "'Canon'");
        assert_eq!(trim_quotes("'Canon"), "Canon");
        assert_eq!(trim_quotes("Canon'"), "Canon");
        assert_eq!(trim_quotes("'"), "");
        assert_eq!(trim_quotes("It's"), "It's");
    }

    #[test]
    fn test_text_fields() {
        let source = tags(vec![
            (ExifTag::Make, RawValue::Text("'Apple'".into())),
            (ExifTag::Model, RawValue::Text("iPhone 4".into())),
            (ExifTag::DocumentName, RawValue::Text("scan".into())),
            (ExifTag::UniqueCameraModel, RawValue::Text("'X100'".into())),
            (ExifTag::BodySerialNumber, RawValue::Text("1234".into())),
        ]);
        let metadata = MetadataExtractor::extract(&source, 1, 1);
        assert_eq!(metadata.maker.as_deref(), Some("Apple"));
        assert_eq!(metadata.model.as_deref(), Some("iPhone 4"));
        assert_eq!(metadata.document_name.as_deref(), Some("scan"));
        assert_eq!(metadata.unique_camera_model.as_deref(), Some("X100"));
        assert_eq!(metadata.camera_serial_number.as_deref(), Some("1234"));
        assert!(metadata.artist.is_none());
        assert!(metadata.software.is_none());
    }

    #[test]
    fn test_rational_fields_are_exact_quotients() {
        let source = tags(vec![
            (ExifTag::FocalLength, RawValue::Rational(r(385, 100))),
            (ExifTag::ExposureTime, RawValue::Rational(r(1, 15))),
            (ExifTag::FNumber, RawValue::Rational(r(28, 10))),
            (ExifTag::ShutterSpeedValue, RawValue::Rational(r(-3, 2))),
            (ExifTag::DigitalZoomRatio, RawValue::Rational(r(0, 1))),
        ]);
        let metadata = MetadataExtractor::extract(&source, 1, 1);
        assert_eq!(metadata.focal_length, Some(385.0 / 100.0));
        assert_eq!(metadata.exposure_time, Some(1.0 / 15.0));
        assert_eq!(metadata.f_number, Some(28.0 / 10.0));
        assert_eq!(metadata.shutter_speed_value, Some(-1.5));
        assert_eq!(metadata.digital_zoom_ratio, Some(0.0));
    }

    #[test]
    fn test_rational_zero_denominator_is_not_guarded() {
        let source = tags(vec![(ExifTag::SubjectDistance, RawValue::Rational(r(1, 0)))]);
        let metadata = MetadataExtractor::extract(&source, 1, 1);
        assert_eq!(metadata.subject_distance, Some(f64::INFINITY));
    }

    #[test]
    fn test_wrong_types_leave_fields_unset() {
        let source = tags(vec![
            (ExifTag::FocalLength, RawValue::Short(35)),
            (ExifTag::Orientation, RawValue::Rational(r(6, 1))),
            (ExifTag::Iso, RawValue::Text("100".into())),
            (ExifTag::FlashEnergy, RawValue::Rationals(vec![r(1, 1), r(2, 1)])),
        ]);
        let metadata = MetadataExtractor::extract(&source, 100, 50);
        assert!(metadata.focal_length.is_none());
        assert!(metadata.orientation.is_none());
        assert!(metadata.iso.is_none());
        assert!(metadata.flash_energy.is_none());
        assert_eq!((metadata.width, metadata.height), (100, 50));
    }

    #[test]
    fn test_short_fields() {
        let source = tags(vec![
            (ExifTag::Iso, RawValue::Short(400)),
            (ExifTag::Flash, RawValue::Short(0x0019)),
            (ExifTag::FocalPlaneResolutionUnit, RawValue::Short(2)),
            (ExifTag::LightSource, RawValue::Short(1)),
            (ExifTag::Orientation, RawValue::Short(1)),
        ]);
        let metadata = MetadataExtractor::extract(&source, 1, 1);
        assert_eq!(metadata.iso, Some(400));
        assert_eq!(metadata.flash, Some(Flash::FlashFiredAutoMode));
        assert_eq!(metadata.focal_plane_resolution_unit, Some(Unit::Inches));
        assert_eq!(metadata.light_source, Some(LightSource::Daylight));
        assert_eq!(metadata.orientation, Some(ImageOrientation::TopLeft));
    }

    #[test]
    fn test_out_of_range_codes_map_to_unknown() {
        let source = tags(vec![
            (ExifTag::Flash, RawValue::Short(0x1234)),
            (ExifTag::Orientation, RawValue::Short(42)),
            (ExifTag::FocalPlaneResolutionUnit, RawValue::Short(9)),
        ]);
        let metadata = MetadataExtractor::extract(&source, 1, 1);
        assert_eq!(metadata.flash, Some(Flash::Unknown));
        assert_eq!(metadata.orientation, Some(ImageOrientation::Unknown));
        assert_eq!(metadata.focal_plane_resolution_unit, Some(Unit::Unknown));
    }

    #[test]
    fn test_orientation_dimension_swap() {
        for code in 0..=8u16 {
            let source = tags(vec![(ExifTag::Orientation, RawValue::Short(code))]);
            let metadata = MetadataExtractor::extract(&source, 2592, 1936);
            if code == 6 || code == 8 {
                assert_eq!((metadata.width, metadata.height), (1936, 2592), "code {code}");
            } else {
                assert_eq!((metadata.width, metadata.height), (2592, 1936), "code {code}");
            }
        }
    }

    #[test]
    fn test_gps_with_references() {
        let source = tags(vec![
            (ExifTag::GpsLatitude, dms(41, 24, 0)),
            (ExifTag::GpsLatitudeRef, RawValue::Text("S".into())),
            (ExifTag::GpsLongitude, dms(2, 9, 36)),
            (ExifTag::GpsLongitudeRef, RawValue::Text("W".into())),
        ]);
        let location = MetadataExtractor::extract(&source, 1, 1).location.unwrap();
        assert_eq!(location.latitude, -(41.0 + 24.0 / 60.0));
        assert_eq!(location.longitude, -(2.0 + 9.0 / 60.0 + 36.0 / 3600.0));
        assert!(location.altitude.is_none());
    }

    #[test]
    fn test_gps_references_default_north_east() {
        let source = tags(vec![
            (ExifTag::GpsLatitude, dms(10, 0, 0)),
            (ExifTag::GpsLongitude, dms(20, 0, 0)),
        ]);
        let location = MetadataExtractor::extract(&source, 1, 1).location.unwrap();
        assert_eq!(location.latitude, 10.0);
        assert_eq!(location.longitude, 20.0);
    }

    #[test]
    fn test_gps_requires_both_coordinates() {
        let source = tags(vec![
            (ExifTag::GpsLatitude, dms(10, 0, 0)),
            (ExifTag::GpsAltitude, RawValue::Rational(r(100, 1))),
        ]);
        assert!(MetadataExtractor::extract(&source, 1, 1).location.is_none());

        let source = tags(vec![
            (ExifTag::GpsLatitude, RawValue::Rationals(vec![r(10, 1), r(0, 1)])),
            (ExifTag::GpsLongitude, dms(20, 0, 0)),
        ]);
        assert!(MetadataExtractor::extract(&source, 1, 1).location.is_none());
    }

    #[test]
    fn test_gps_altitude_alone_is_dropped() {
        let source = tags(vec![
            (ExifTag::GpsAltitude, RawValue::Rational(r(100, 1))),
            (ExifTag::GpsAltitudeRef, RawValue::Short(1)),
        ]);
        assert!(MetadataExtractor::extract(&source, 1, 1).location.is_none());
    }

    #[test]
    fn test_gps_altitude_below_sea_level() {
        let source = tags(vec![
            (ExifTag::GpsLatitude, dms(31, 30, 0)),
            (ExifTag::GpsLongitude, dms(35, 30, 0)),
            (ExifTag::GpsAltitude, RawValue::Rational(r(4305, 10))),
            (ExifTag::GpsAltitudeRef, RawValue::Short(1)),
        ]);
        let location = MetadataExtractor::extract(&source, 1, 1).location.unwrap();
        assert_eq!(location.altitude, Some(-430.5));
    }

    #[test]
    fn test_gps_altitude_defaults_above_sea_level() {
        let source = tags(vec![
            (ExifTag::GpsLatitude, dms(1, 0, 0)),
            (ExifTag::GpsLongitude, dms(1, 0, 0)),
            (ExifTag::GpsAltitude, RawValue::Rational(r(25, 1))),
        ]);
        let location = MetadataExtractor::extract(&source, 1, 1).location.unwrap();
        assert_eq!(location.altitude, Some(25.0));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let source = tags(vec![
            (ExifTag::Make, RawValue::Text("Nikon".into())),
            (ExifTag::FNumber, RawValue::Rational(r(18, 10))),
            (ExifTag::GpsLatitude, dms(1, 2, 3)),
            (ExifTag::GpsLongitude, dms(4, 5, 6)),
        ]);
        let first = serde_json::to_vec(&MetadataExtractor::extract(&source, 5, 6)).unwrap();
        let second = serde_json::to_vec(&MetadataExtractor::extract(&source, 5, 6)).unwrap();
        assert_eq!(first, second);
    }
}
