//! Test fixtures: JPEG files with an EXIF block built at runtime.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use pixmeta_core::ExifTag;
use std::io::Cursor;
use std::path::Path;

/// A tag value in one of the TIFF field types the fixtures need.
#[derive(Debug, Clone)]
pub enum TagValue {
    Ascii(String),
    Byte(u8),
    Short(u16),
    Long(u32),
    Rational(Vec<(u32, u32)>),
}

impl TagValue {
    pub fn ascii(s: &str) -> Self {
        Self::Ascii(s.to_string())
    }

    pub fn rational(num: u32, denom: u32) -> Self {
        Self::Rational(vec![(num, denom)])
    }

    /// Field type, count and little-endian payload.
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            Self::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            Self::Byte(v) => (1, 1, vec![*v]),
            Self::Short(v) => (3, 1, v.to_le_bytes().to_vec()),
            Self::Long(v) => (4, 1, v.to_le_bytes().to_vec()),
            Self::Rational(parts) => {
                let mut bytes = Vec::with_capacity(parts.len() * 8);
                for (num, denom) in parts {
                    bytes.extend_from_slice(&num.to_le_bytes());
                    bytes.extend_from_slice(&denom.to_le_bytes());
                }
                (5, parts.len() as u32, bytes)
            }
        }
    }
}

const EXIF_IFD_POINTER: u16 = 0x8769;
const GPS_IFD_POINTER: u16 = 0x8825;

/// Builds a little-endian TIFF structure with IFD0, an EXIF sub-IFD and a
/// GPS sub-IFD, wrapped as a JPEG APP1 segment.
#[derive(Debug, Default, Clone)]
pub struct ExifBuilder {
    tiff: Vec<(u16, TagValue)>,
    exif: Vec<(u16, TagValue)>,
    gps: Vec<(u16, TagValue)>,
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the IFD it belongs to.
    pub fn tag(mut self, tag: ExifTag, value: TagValue) -> Self {
        let entry = (tag.id(), value);
        match tag.ifd() {
            pixmeta_core::tags::Ifd::Tiff => self.tiff.push(entry),
            pixmeta_core::tags::Ifd::Exif => self.exif.push(entry),
            pixmeta_core::tags::Ifd::Gps => self.gps.push(entry),
        }
        self
    }

    pub fn orientation(self, code: u16) -> Self {
        self.tag(ExifTag::Orientation, TagValue::Short(code))
    }

    /// The raw TIFF bytes.
    pub fn build_tiff(&self) -> Vec<u8> {
        let mut ifd0 = self.tiff.clone();
        if !self.exif.is_empty() {
            ifd0.push((EXIF_IFD_POINTER, TagValue::Long(0)));
        }
        if !self.gps.is_empty() {
            ifd0.push((GPS_IFD_POINTER, TagValue::Long(0)));
        }

        let ifd0_offset = 8u32;
        let exif_offset = ifd0_offset + ifd_size(&ifd0);
        let gps_offset = exif_offset + if self.exif.is_empty() { 0 } else { ifd_size(&self.exif) };

        for (tag, value) in ifd0.iter_mut() {
            match *tag {
                EXIF_IFD_POINTER => *value = TagValue::Long(exif_offset),
                GPS_IFD_POINTER => *value = TagValue::Long(gps_offset),
                _ => {}
            }
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"II");
        out.extend_from_slice(&42u16.to_le_bytes());
        out.extend_from_slice(&ifd0_offset.to_le_bytes());
        out.extend(write_ifd(ifd0_offset, &ifd0));
        if !self.exif.is_empty() {
            out.extend(write_ifd(exif_offset, &self.exif));
        }
        if !self.gps.is_empty() {
            out.extend(write_ifd(gps_offset, &self.gps));
        }
        out
    }

    /// The complete APP1 segment, marker included.
    pub fn build_app1(&self) -> Vec<u8> {
        let tiff = self.build_tiff();
        let length = (2 + 6 + tiff.len()) as u16;
        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&length.to_be_bytes());
        segment.extend_from_slice(b"Exif\0\0");
        segment.extend(tiff);
        segment
    }
}

/// Bytes an IFD occupies including its out-of-line values.
fn ifd_size(entries: &[(u16, TagValue)]) -> u32 {
    let external: usize = entries
        .iter()
        .map(|(_, value)| {
            let (_, _, bytes) = value.encode();
            if bytes.len() > 4 {
                bytes.len() + bytes.len() % 2
            } else {
                0
            }
        })
        .sum();
    (2 + 12 * entries.len() + 4 + external) as u32
}

fn write_ifd(offset: u32, entries: &[(u16, TagValue)]) -> Vec<u8> {
    let mut entries = entries.to_vec();
    entries.sort_by_key(|(tag, _)| *tag);

    let mut table = Vec::new();
    let mut data = Vec::new();
    let mut data_offset = offset + 2 + 12 * entries.len() as u32 + 4;

    table.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, value) in &entries {
        let (field_type, count, mut bytes) = value.encode();
        table.extend_from_slice(&tag.to_le_bytes());
        table.extend_from_slice(&field_type.to_le_bytes());
        table.extend_from_slice(&count.to_le_bytes());
        if bytes.len() <= 4 {
            bytes.resize(4, 0);
            table.extend_from_slice(&bytes);
        } else {
            table.extend_from_slice(&data_offset.to_le_bytes());
            if bytes.len() % 2 == 1 {
                bytes.push(0);
            }
            data_offset += bytes.len() as u32;
            data.extend(bytes);
        }
    }
    table.extend_from_slice(&0u32.to_le_bytes());
    table.extend(data);
    table
}

/// Encode a `width`x`height` JPEG with a gradient so it isn't a flat block.
pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, image::ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

/// A JPEG with `exif` inserted right after the SOI marker.
pub fn jpeg_with_exif(width: u32, height: u32, exif: &ExifBuilder) -> Vec<u8> {
    let jpeg = plain_jpeg(width, height);
    let mut out = jpeg[..2].to_vec();
    out.extend(exif.build_app1());
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn write_jpeg_with_exif(path: &Path, width: u32, height: u32, exif: &ExifBuilder) {
    std::fs::write(path, jpeg_with_exif(width, height, exif)).unwrap();
}

/// A camera-like tag set: text fields, exposure values and a GPS fix at
/// 40°26'46"N 79°58'56"W, 12.5 m below sea level.
pub fn camera_exif(orientation: u16) -> ExifBuilder {
    ExifBuilder::new()
        .tag(ExifTag::Make, TagValue::ascii("Canon"))
        .tag(ExifTag::Model, TagValue::ascii("Canon EOS 5D"))
        .tag(ExifTag::Artist, TagValue::ascii("'Jane Doe'"))
        .tag(ExifTag::Software, TagValue::ascii("Firmware 1.1.1"))
        .orientation(orientation)
        .tag(ExifTag::ExposureTime, TagValue::rational(1, 250))
        .tag(ExifTag::FNumber, TagValue::rational(28, 10))
        .tag(ExifTag::Iso, TagValue::Short(400))
        .tag(ExifTag::Flash, TagValue::Short(0x19))
        .tag(ExifTag::LightSource, TagValue::Short(4))
        .tag(ExifTag::FocalLength, TagValue::rational(50, 1))
        .tag(ExifTag::FocalPlaneResolutionUnit, TagValue::Short(2))
        .tag(ExifTag::GpsLatitudeRef, TagValue::ascii("N"))
        .tag(
            ExifTag::GpsLatitude,
            TagValue::Rational(vec![(40, 1), (26, 1), (46, 1)]),
        )
        .tag(ExifTag::GpsLongitudeRef, TagValue::ascii("W"))
        .tag(
            ExifTag::GpsLongitude,
            TagValue::Rational(vec![(79, 1), (58, 1), (56, 1)]),
        )
        .tag(ExifTag::GpsAltitudeRef, TagValue::Byte(1))
        .tag(ExifTag::GpsAltitude, TagValue::rational(25, 2))
}
