//! Enumerated EXIF values: orientation, flash, resolution unit, light source.
//!
//! Every `from_value` is total: codes outside the table land on a fallback
//! variant instead of failing.

use serde::{Deserialize, Serialize};

/// EXIF orientation (TIFF tag 0x0112).
///
/// Variant names describe where row 0 and column 0 of the stored image sit
/// when the picture is viewed upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrientation {
    Unknown,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl ImageOrientation {
    pub fn from_value(value: u16) -> Self {
        match value {
            1 => Self::TopLeft,
            2 => Self::TopRight,
            3 => Self::BottomRight,
            4 => Self::BottomLeft,
            5 => Self::LeftTop,
            6 => Self::RightTop,
            7 => Self::RightBottom,
            8 => Self::LeftBottom,
            _ => Self::Unknown,
        }
    }

    pub fn value(self) -> u16 {
        match self {
            Self::Unknown => 0,
            Self::TopLeft => 1,
            Self::TopRight => 2,
            Self::BottomRight => 3,
            Self::BottomLeft => 4,
            Self::LeftTop => 5,
            Self::RightTop => 6,
            Self::RightBottom => 7,
            Self::LeftBottom => 8,
        }
    }

    /// True for the two pure quarter-turn orientations (6 and 8), where the
    /// displayed width is the stored height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::RightTop | Self::LeftBottom)
    }

    /// True for the four orientations that include a mirror (2, 4, 5, 7).
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Self::TopRight | Self::BottomLeft | Self::LeftTop | Self::RightBottom
        )
    }
}

/// EXIF flash status (tag 0x9209), decoded from the raw 16-bit bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flash {
    FlashDidNotFire,
    FlashFired,
    StrobeReturnLightNotDetected,
    StrobeReturnLightDetected,
    FlashFiredCompulsoryFlashMode,
    FlashFiredCompulsoryFlashModeReturnLightNotDetected,
    FlashFiredCompulsoryFlashModeReturnLightDetected,
    FlashDidNotFireCompulsoryFlashMode,
    FlashDidNotFireAutoMode,
    FlashFiredAutoMode,
    FlashFiredAutoModeReturnLightNotDetected,
    FlashFiredAutoModeReturnLightDetected,
    NoFlashFunction,
    FlashFiredRedEyeReductionMode,
    FlashFiredRedEyeReductionModeReturnLightNotDetected,
    FlashFiredRedEyeReductionModeReturnLightDetected,
    FlashFiredCompulsoryFlashModeRedEyeReductionMode,
    FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightNotDetected,
    FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightDetected,
    FlashFiredAutoModeRedEyeReductionMode,
    FlashFiredAutoModeReturnLightNotDetectedRedEyeReductionMode,
    FlashFiredAutoModeReturnLightDetectedRedEyeReductionMode,
    Unknown,
}

const FLASH_FIRED_BIT: u16 = 0x0001;
const FLASH_RETURN_MASK: u16 = 0x0006;
const FLASH_RETURN_DETECTED: u16 = 0x0006;
const FLASH_RED_EYE_BIT: u16 = 0x0040;

impl Flash {
    pub fn from_value(value: u16) -> Self {
        match value {
            0x0000 => Self::FlashDidNotFire,
            0x0001 => Self::FlashFired,
            0x0005 => Self::StrobeReturnLightNotDetected,
            0x0007 => Self::StrobeReturnLightDetected,
            0x0009 => Self::FlashFiredCompulsoryFlashMode,
            0x000D => Self::FlashFiredCompulsoryFlashModeReturnLightNotDetected,
            0x000F => Self::FlashFiredCompulsoryFlashModeReturnLightDetected,
            0x0010 => Self::FlashDidNotFireCompulsoryFlashMode,
            0x0018 => Self::FlashDidNotFireAutoMode,
            0x0019 => Self::FlashFiredAutoMode,
            0x001D => Self::FlashFiredAutoModeReturnLightNotDetected,
            0x001F => Self::FlashFiredAutoModeReturnLightDetected,
            0x0020 => Self::NoFlashFunction,
            0x0041 => Self::FlashFiredRedEyeReductionMode,
            0x0045 => Self::FlashFiredRedEyeReductionModeReturnLightNotDetected,
            0x0047 => Self::FlashFiredRedEyeReductionModeReturnLightDetected,
            0x0049 => Self::FlashFiredCompulsoryFlashModeRedEyeReductionMode,
            0x004D => Self::FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightNotDetected,
            0x004F => Self::FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightDetected,
            0x0059 => Self::FlashFiredAutoModeRedEyeReductionMode,
            0x005D => Self::FlashFiredAutoModeReturnLightNotDetectedRedEyeReductionMode,
            0x005F => Self::FlashFiredAutoModeReturnLightDetectedRedEyeReductionMode,
            _ => Self::Unknown,
        }
    }

    /// Raw EXIF code. `Unknown` maps to `0xFFFF`.
    pub fn value(self) -> u16 {
        match self {
            Self::FlashDidNotFire => 0x0000,
            Self::FlashFired => 0x0001,
            Self::StrobeReturnLightNotDetected => 0x0005,
            Self::StrobeReturnLightDetected => 0x0007,
            Self::FlashFiredCompulsoryFlashMode => 0x0009,
            Self::FlashFiredCompulsoryFlashModeReturnLightNotDetected => 0x000D,
            Self::FlashFiredCompulsoryFlashModeReturnLightDetected => 0x000F,
            Self::FlashDidNotFireCompulsoryFlashMode => 0x0010,
            Self::FlashDidNotFireAutoMode => 0x0018,
            Self::FlashFiredAutoMode => 0x0019,
            Self::FlashFiredAutoModeReturnLightNotDetected => 0x001D,
            Self::FlashFiredAutoModeReturnLightDetected => 0x001F,
            Self::NoFlashFunction => 0x0020,
            Self::FlashFiredRedEyeReductionMode => 0x0041,
            Self::FlashFiredRedEyeReductionModeReturnLightNotDetected => 0x0045,
            Self::FlashFiredRedEyeReductionModeReturnLightDetected => 0x0047,
            Self::FlashFiredCompulsoryFlashModeRedEyeReductionMode => 0x0049,
            Self::FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightNotDetected => 0x004D,
            Self::FlashFiredCompulsoryFlashModeRedEyeReductionModeReturnLightDetected => 0x004F,
            Self::FlashFiredAutoModeRedEyeReductionMode => 0x0059,
            Self::FlashFiredAutoModeReturnLightNotDetectedRedEyeReductionMode => 0x005D,
            Self::FlashFiredAutoModeReturnLightDetectedRedEyeReductionMode => 0x005F,
            Self::Unknown => 0xFFFF,
        }
    }

    fn known_bits(self) -> Option<u16> {
        match self {
            Self::Unknown => None,
            other => Some(other.value()),
        }
    }

    /// Bit 0 of the flash field.
    ///
    /// The flash helpers decode the EXIF bitfield of the raw code rather than
    /// a per-variant table, so `FlashFiredAutoMode` (0x0019) reports fired
    /// with no return light detected.
    pub fn is_flash_fired(self) -> bool {
        self.known_bits()
            .is_some_and(|bits| bits & FLASH_FIRED_BIT != 0)
    }

    /// Bits 1-2 equal to `11`.
    pub fn is_return_light_detected(self) -> bool {
        self.known_bits()
            .is_some_and(|bits| bits & FLASH_RETURN_MASK == FLASH_RETURN_DETECTED)
    }

    /// Bit 6 of the flash field.
    pub fn is_red_eye_reduction_enabled(self) -> bool {
        self.known_bits()
            .is_some_and(|bits| bits & FLASH_RED_EYE_BIT != 0)
    }
}

/// Resolution unit (e.g. FocalPlaneResolutionUnit, tag 0xa210).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    NotAvailable,
    Inches,
    Centimeters,
    Unknown,
}

impl Unit {
    pub fn from_value(value: u16) -> Self {
        match value {
            1 => Self::NotAvailable,
            2 => Self::Inches,
            3 => Self::Centimeters,
            _ => Self::Unknown,
        }
    }

    pub fn value(self) -> u16 {
        match self {
            Self::Unknown => 0,
            Self::NotAvailable => 1,
            Self::Inches => 2,
            Self::Centimeters => 3,
        }
    }
}

/// EXIF light source (tag 0x9208).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightSource {
    Unknown,
    Daylight,
    Fluorescent,
    TungstenIncandescentLight,
    Flash,
    FineWeather,
    CloudyWeather,
    Shade,
    DaylightFluorescent,
    DayWhiteFluorescent,
    CoolWhiteFluorescent,
    WhiteFluorescent,
    StandardLightA,
    StandardLightB,
    StandardLightC,
    D55,
    D65,
    D75,
    D50,
    IsoStudioTungsten,
    OtherLightSource,
}

impl LightSource {
    /// Unmapped codes fall back to `OtherLightSource`; only 0 is `Unknown`.
    pub fn from_value(value: u16) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Daylight,
            2 => Self::Fluorescent,
            3 => Self::TungstenIncandescentLight,
            4 => Self::Flash,
            9 => Self::FineWeather,
            10 => Self::CloudyWeather,
            11 => Self::Shade,
            12 => Self::DaylightFluorescent,
            13 => Self::DayWhiteFluorescent,
            14 => Self::CoolWhiteFluorescent,
            15 => Self::WhiteFluorescent,
            17 => Self::StandardLightA,
            18 => Self::StandardLightB,
            19 => Self::StandardLightC,
            20 => Self::D55,
            21 => Self::D65,
            22 => Self::D75,
            23 => Self::D50,
            24 => Self::IsoStudioTungsten,
            _ => Self::OtherLightSource,
        }
    }

    pub fn value(self) -> u16 {
        match self {
            Self::Unknown => 0,
            Self::Daylight => 1,
            Self::Fluorescent => 2,
            Self::TungstenIncandescentLight => 3,
            Self::Flash => 4,
            Self::FineWeather => 9,
            Self::CloudyWeather => 10,
            Self::Shade => 11,
            Self::DaylightFluorescent => 12,
            Self::DayWhiteFluorescent => 13,
            Self::CoolWhiteFluorescent => 14,
            Self::WhiteFluorescent => 15,
            Self::StandardLightA => 17,
            Self::StandardLightB => 18,
            Self::StandardLightC => 19,
            Self::D55 => 20,
            Self::D65 => 21,
            Self::D75 => 22,
            Self::D50 => 23,
            Self::IsoStudioTungsten => 24,
            Self::OtherLightSource => 255,
        }
    }
}
