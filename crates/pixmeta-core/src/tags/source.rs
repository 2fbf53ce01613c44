//! Tag identifiers and the lookup seam used by the metadata extractor.
//!
//! The extractor never touches TIFF bytes. It asks a [`TagSource`] for one
//! [`ExifTag`] at a time and receives an already-typed [`RawValue`] (or
//! nothing). The production source is a parsed `exif::Exif`; tests and
//! callers with their own tag reader can use a plain `HashMap`.

use std::collections::HashMap;

use exif::{Context, Field, In, Value};

use super::rational::Rational;

/// IFD a tag lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ifd {
    /// Primary TIFF IFD (IFD0)
    Tiff,
    /// EXIF sub-IFD
    Exif,
    /// GPS sub-IFD
    Gps,
}

/// The fixed set of tags the extractor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifTag {
    Make,
    Model,
    Artist,
    Copyright,
    DocumentName,
    HostComputer,
    ImageDescription,
    Software,
    TargetPrinter,
    BodySerialNumber,
    UniqueCameraModel,
    Orientation,
    FocalLength,
    FocalPlaneXResolution,
    FocalPlaneYResolution,
    FocalPlaneResolutionUnit,
    DigitalZoomRatio,
    ExposureTime,
    FNumber,
    FocalLengthIn35mmFilm,
    SubjectDistance,
    ShutterSpeedValue,
    Flash,
    FlashEnergy,
    LightSource,
    Iso,
    GpsLatitudeRef,
    GpsLatitude,
    GpsLongitudeRef,
    GpsLongitude,
    GpsAltitudeRef,
    GpsAltitude,
}

impl ExifTag {
    /// Numeric tag identifier within its IFD.
    pub const fn id(self) -> u16 {
        match self {
            Self::DocumentName => 0x010d,
            Self::ImageDescription => 0x010e,
            Self::Make => 0x010f,
            Self::Model => 0x0110,
            Self::Orientation => 0x0112,
            Self::Software => 0x0131,
            Self::Artist => 0x013b,
            Self::HostComputer => 0x013c,
            Self::TargetPrinter => 0x0151,
            Self::Copyright => 0x8298,
            Self::UniqueCameraModel => 0xc614,
            Self::ExposureTime => 0x829a,
            Self::FNumber => 0x829d,
            Self::Iso => 0x8827,
            Self::ShutterSpeedValue => 0x9201,
            Self::SubjectDistance => 0x9206,
            Self::LightSource => 0x9208,
            Self::Flash => 0x9209,
            Self::FocalLength => 0x920a,
            Self::FlashEnergy => 0xa20b,
            Self::FocalPlaneXResolution => 0xa20e,
            Self::FocalPlaneYResolution => 0xa20f,
            Self::FocalPlaneResolutionUnit => 0xa210,
            Self::DigitalZoomRatio => 0xa404,
            Self::FocalLengthIn35mmFilm => 0xa405,
            Self::BodySerialNumber => 0xa431,
            Self::GpsLatitudeRef => 0x0001,
            Self::GpsLatitude => 0x0002,
            Self::GpsLongitudeRef => 0x0003,
            Self::GpsLongitude => 0x0004,
            Self::GpsAltitudeRef => 0x0005,
            Self::GpsAltitude => 0x0006,
        }
    }

    /// IFD the tag is defined in.
    pub const fn ifd(self) -> Ifd {
        match self {
            Self::DocumentName
            | Self::ImageDescription
            | Self::Make
            | Self::Model
            | Self::Orientation
            | Self::Software
            | Self::Artist
            | Self::HostComputer
            | Self::TargetPrinter
            | Self::Copyright
            | Self::UniqueCameraModel => Ifd::Tiff,
            Self::GpsLatitudeRef
            | Self::GpsLatitude
            | Self::GpsLongitudeRef
            | Self::GpsLongitude
            | Self::GpsAltitudeRef
            | Self::GpsAltitude => Ifd::Gps,
            _ => Ifd::Exif,
        }
    }

    /// The equivalent `kamadak-exif` tag.
    pub fn to_exif(self) -> exif::Tag {
        let context = match self.ifd() {
            Ifd::Tiff => Context::Tiff,
            Ifd::Exif => Context::Exif,
            Ifd::Gps => Context::Gps,
        };
        exif::Tag(context, self.id())
    }
}

/// A typed tag value as handed to the extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// SHORT (or BYTE) value; only the first element is kept
    Short(u16),
    /// A single RATIONAL / SRATIONAL
    Rational(Rational),
    /// Two or more RATIONAL / SRATIONAL components
    Rationals(Vec<Rational>),
    /// ASCII text
    Text(String),
}

impl RawValue {
    /// Human-readable rendering, used for free-text fields.
    pub fn display_string(&self) -> String {
        match self {
            Self::Short(v) => v.to_string(),
            Self::Rational(r) => format!("{}/{}", r.num, r.denom),
            Self::Rationals(rs) => rs
                .iter()
                .map(|r| format!("{}/{}", r.num, r.denom))
                .collect::<Vec<_>>()
                .join(", "),
            Self::Text(s) => s.clone(),
        }
    }

    fn from_field(field: &Field) -> Option<Self> {
        match &field.value {
            Value::Short(v) => v.first().map(|&x| Self::Short(x)),
            Value::Byte(v) => v.first().map(|&x| Self::Short(u16::from(x))),
            Value::Rational(v) => Self::from_rationals(v.iter().map(|&r| r.into()).collect()),
            Value::SRational(v) => Self::from_rationals(v.iter().map(|&r| r.into()).collect()),
            Value::Ascii(parts) => {
                let text = parts
                    .iter()
                    .map(|bytes| {
                        String::from_utf8_lossy(bytes)
                            .trim_end_matches('\0')
                            .to_string()
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(Self::Text(text))
            }
            _ => None,
        }
    }

    fn from_rationals(mut values: Vec<Rational>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Rational),
            _ => Some(Self::Rationals(values)),
        }
    }
}

/// Anything that can answer "what is the value of this tag?".
pub trait TagSource {
    fn get(&self, tag: ExifTag) -> Option<RawValue>;
}

impl TagSource for exif::Exif {
    fn get(&self, tag: ExifTag) -> Option<RawValue> {
        self.get_field(tag.to_exif(), In::PRIMARY)
            .and_then(RawValue::from_field)
    }
}

impl TagSource for HashMap<ExifTag, RawValue> {
    fn get(&self, tag: ExifTag) -> Option<RawValue> {
        HashMap::get(self, &tag).cloned()
    }
}
