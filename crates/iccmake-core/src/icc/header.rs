//! ICC Profile Header
//!
//! The header is exactly 128 bytes. See ICC.1:2022 Section 7.2.

use std::fmt;

use super::error::IccError;
use super::types::{DateTimeNumber, XyzNumber};
use crate::color::white_point::ICC_D50;

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header length; also the minimum profile size
pub const HEADER_SIZE: usize = 128;

/// Creator signature written into every synthesized profile
pub const CREATOR_SIGNATURE: u32 = u32::from_be_bytes(*b"icmk");

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes; recomputed on encode
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    pub version: ProfileVersion,
    pub device_class: ProfileClass,
    /// Color space of data (RGB, GRAY, ...)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    pub creation_date: DateTimeNumber,
    /// Primary platform signature
    pub platform: u32,
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    pub attributes: u64,
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (D50)
    pub illuminant: XyzNumber,
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl IccHeader {
    /// Header for a display profile with an XYZ connection space
    pub fn display(version: ProfileVersion, color_space: ColorSpace) -> Self {
        Self::new(version, ProfileClass::Display, color_space, ColorSpace::Xyz)
    }

    /// Header for an abstract profile mapping `pcs` onto itself
    pub fn abstract_pcs(version: ProfileVersion, pcs: ColorSpace) -> Self {
        Self::new(version, ProfileClass::Abstract, pcs, pcs)
    }

    fn new(version: ProfileVersion, device_class: ProfileClass, color_space: ColorSpace, pcs: ColorSpace) -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version,
            device_class,
            color_space,
            pcs,
            creation_date: DateTimeNumber::default(),
            platform: 0,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual,
            illuminant: XyzNumber::from_xyz(ICC_D50),
            creator: CREATOR_SIGNATURE,
            profile_id: [0; 16],
        }
    }

    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let be32 = |at: usize| u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

        let signature = be32(36);
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&data[84..100]);

        Ok(Self {
            size: be32(0),
            cmm_type: be32(4),
            version: ProfileVersion {
                major: data[8],
                minor: data[9] >> 4,
                patch: data[9] & 0x0F,
            },
            device_class: ProfileClass::from_u32(be32(12))?,
            color_space: ColorSpace::from_u32(be32(16))?,
            pcs: ColorSpace::from_u32(be32(20))?,
            creation_date: DateTimeNumber::from_bytes(&data[24..36]).unwrap_or_default(),
            platform: be32(40),
            flags: be32(44),
            manufacturer: be32(48),
            model: be32(52),
            attributes: (u64::from(be32(56)) << 32) | u64::from(be32(60)),
            rendering_intent: RenderingIntent::from_u32(be32(64))?,
            illuminant: XyzNumber::from_bytes(&data[68..80]).unwrap_or_default(),
            creator: be32(80),
            profile_id,
        })
    }

    /// Check the declared size against the available data
    pub fn validate(&self, data_len: usize) -> Result<(), IccError> {
        if self.size as usize > data_len {
            return Err(IccError::SizeMismatch {
                header_size: self.size,
                actual_size: data_len,
            });
        }
        Ok(())
    }

    /// Encode into exactly 128 bytes, with `size` as the profile size field
    pub fn encode(&self, size: u32) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut put = |at: usize, bytes: &[u8]| out[at..at + bytes.len()].copy_from_slice(bytes);

        put(0, &size.to_be_bytes());
        put(4, &self.cmm_type.to_be_bytes());
        put(8, &self.version.to_bytes());
        put(12, &self.device_class.to_u32().to_be_bytes());
        put(16, &self.color_space.to_u32().to_be_bytes());
        put(20, &self.pcs.to_u32().to_be_bytes());
        put(24, &self.creation_date.to_bytes());
        put(36, &PROFILE_SIGNATURE.to_be_bytes());
        put(40, &self.platform.to_be_bytes());
        put(44, &self.flags.to_be_bytes());
        put(48, &self.manufacturer.to_be_bytes());
        put(52, &self.model.to_be_bytes());
        put(56, &self.attributes.to_be_bytes());
        put(64, &self.rendering_intent.to_u32().to_be_bytes());
        put(68, &self.illuminant.to_bytes());
        put(80, &self.creator.to_be_bytes());
        put(84, &self.profile_id);
        out
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    /// Version of the v2 Lab identity profile
    pub const V2_1: Self = Self { major: 2, minor: 1, patch: 0 };
    /// Legacy version written into derived profiles
    pub const V2_2: Self = Self { major: 2, minor: 2, patch: 0 };
    /// Version written by the v4 builder
    pub const V4_3: Self = Self { major: 4, minor: 3, patch: 0 };

    pub fn is_v4(&self) -> bool {
        self.major == 4
    }

    pub fn is_v2(&self) -> bool {
        self.major == 2
    }

    /// Bytes 8..12 of the header
    pub fn to_bytes(self) -> [u8; 4] {
        [self.major, (self.minor << 4) | (self.patch & 0x0F), 0, 0]
    }
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Color space conversion
    ColorSpace,
    Abstract,
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match &val.to_be_bytes() {
            b"scnr" => Ok(Self::Input),
            b"mntr" => Ok(Self::Display),
            b"prtr" => Ok(Self::Output),
            b"spac" => Ok(Self::ColorSpace),
            b"abst" => Ok(Self::Abstract),
            _ => Err(IccError::InvalidProfileClass(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Input => u32::from_be_bytes(*b"scnr"),
            Self::Display => u32::from_be_bytes(*b"mntr"),
            Self::Output => u32::from_be_bytes(*b"prtr"),
            Self::ColorSpace => u32::from_be_bytes(*b"spac"),
            Self::Abstract => u32::from_be_bytes(*b"abst"),
        }
    }
}

/// ICC data or connection color space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Rgb,
    Gray,
    Cmyk,
}

impl ColorSpace {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match &val.to_be_bytes() {
            b"XYZ " => Ok(Self::Xyz),
            b"Lab " => Ok(Self::Lab),
            b"RGB " => Ok(Self::Rgb),
            b"GRAY" => Ok(Self::Gray),
            b"CMYK" => Ok(Self::Cmyk),
            _ => Err(IccError::InvalidColorSpace(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Xyz => u32::from_be_bytes(*b"XYZ "),
            Self::Lab => u32::from_be_bytes(*b"Lab "),
            Self::Rgb => u32::from_be_bytes(*b"RGB "),
            Self::Gray => u32::from_be_bytes(*b"GRAY"),
            Self::Cmyk => u32::from_be_bytes(*b"CMYK"),
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    #[default]
    Perceptual,
    RelativeColorimetric,
    Saturation,
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match val {
            0 => Ok(Self::Perceptual),
            1 => Ok(Self::RelativeColorimetric),
            2 => Ok(Self::Saturation),
            3 => Ok(Self::AbsoluteColorimetric),
            _ => Err(IccError::InvalidRenderingIntent(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }
}
