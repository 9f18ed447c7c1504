//! ICC Basic Number and Signature Types
//!
//! Fixed-point encodings round to nearest, matching what lcms2 writes.

use std::fmt;

use crate::color::Xyz;

fn fourcc_fmt(value: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let bytes = value.to_be_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        write!(f, "{}", String::from_utf8_lossy(&bytes))
    } else {
        write!(f, "0x{:08X}", value)
    }
}

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const A_TO_B0: Self = Self::from_bytes(*b"A2B0");
    pub const B_TO_A0: Self = Self::from_bytes(*b"B2A0");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const CHAD: Self = Self::from_bytes(*b"chad");
    pub const CHROMATICITY: Self = Self::from_bytes(*b"chrm");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DEVICE_MFG_DESC: Self = Self::from_bytes(*b"dmnd");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const PROFILE_DESC: Self = Self::from_bytes(*b"desc");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");

    /// Colorant tags in red, green, blue order
    pub const COLORANTS: [Self; 3] = [Self::RED_COLORANT, Self::GREEN_COLORANT, Self::BLUE_COLORANT];

    /// RGB tone curve tags in red, green, blue order
    pub const RGB_TRCS: [Self; 3] = [Self::RED_TRC, Self::GREEN_TRC, Self::BLUE_TRC];
}

impl fmt::Display for TagSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fourcc_fmt(self.0, f)
    }
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const PARA: Self = Self::from_bytes(*b"para");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const SF32: Self = Self::from_bytes(*b"sf32");
    pub const CHRM: Self = Self::from_bytes(*b"chrm");
    pub const LUT16: Self = Self::from_bytes(*b"mft2");
    pub const LUT_A_TO_B: Self = Self::from_bytes(*b"mAB ");
    pub const LUT_B_TO_A: Self = Self::from_bytes(*b"mBA ");

    /// Read the type signature at the start of a tag payload
    pub fn of_payload(data: &[u8]) -> Option<Self> {
        let bytes: [u8; 4] = data.get(0..4)?.try_into().ok()?;
        Some(Self(u32::from_be_bytes(bytes)))
    }

    /// Type signature followed by the 4 reserved bytes every tag starts with
    pub(crate) fn tag_prefix(self) -> [u8; 8] {
        let sig = self.0.to_be_bytes();
        [sig[0], sig[1], sig[2], sig[3], 0, 0, 0, 0]
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fourcc_fmt(self.0, f)
    }
}

/// s15Fixed16Number - 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    /// One step of the encoding
    pub const QUANTUM: f64 = 1.0 / 65536.0;

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Encode with round-to-nearest
    pub fn from_f64(val: f64) -> Self {
        let raw = (val * 65536.0 + 0.5).floor();
        Self(raw.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// u8Fixed8Number - unsigned 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub fn from_f64(val: f64) -> Self {
        let raw = (val * 256.0 + 0.5).floor();
        Self(raw.clamp(0.0, u16::MAX as f64) as u16)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// XYZNumber - ICC XYZ value (3 × s15Fixed16)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            x: S15Fixed16::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: S15Fixed16::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            z: S15Fixed16::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn from_xyz(xyz: Xyz) -> Self {
        Self {
            x: S15Fixed16::from_f64(xyz.x),
            y: S15Fixed16::from_f64(xyz.y),
            z: S15Fixed16::from_f64(xyz.z),
        }
    }

    pub fn to_xyz(&self) -> Xyz {
        Xyz::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[0..4].copy_from_slice(&self.x.to_be_bytes());
        out[4..8].copy_from_slice(&self.y.to_be_bytes());
        out[8..12].copy_from_slice(&self.z.to_be_bytes());
        out
    }
}

/// dateTimeNumber - ICC date/time (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            year: u16::from_be_bytes([bytes[0], bytes[1]]),
            month: u16::from_be_bytes([bytes[2], bytes[3]]),
            day: u16::from_be_bytes([bytes[4], bytes[5]]),
            hour: u16::from_be_bytes([bytes[6], bytes[7]]),
            minute: u16::from_be_bytes([bytes[8], bytes[9]]),
            second: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        let fields = [self.year, self.month, self.day, self.hour, self.minute, self.second];
        for (chunk, value) in out.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        out
    }

    /// Convert seconds since the Unix epoch to a UTC calendar date
    pub fn from_unix_seconds(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;

        // Proleptic Gregorian days-to-civil conversion, eras of 400 years
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year.clamp(0, u16::MAX as i64) as u16,
            month: month as u16,
            day: day as u16,
            hour: (rem / 3600) as u16,
            minute: (rem % 3600 / 60) as u16,
            second: (rem % 60) as u16,
        }
    }

    /// Current UTC time from the system clock
    pub fn now() -> Self {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_seconds(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s15fixed16() {
        let one = S15Fixed16::from_f64(1.0);
        assert_eq!(one.0, 0x0001_0000);

        let half = S15Fixed16::from_f64(0.5);
        assert!((half.to_f64() - 0.5).abs() < 1e-6);

        let neg = S15Fixed16::from_f64(-1.5);
        assert!((neg.to_f64() - (-1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_s15fixed16_rounds_to_nearest() {
        // 0.9642 * 65536 = 63190.13
        assert_eq!(S15Fixed16::from_f64(0.9642).0, 0xF6D6);
        // 0.8249 * 65536 = 54061.33
        assert_eq!(S15Fixed16::from_f64(0.8249).0, 0xD32D);
        // Just below a half step rounds down, just above rounds up
        assert_eq!(S15Fixed16::from_f64(10.4 / 65536.0).0, 10);
        assert_eq!(S15Fixed16::from_f64(10.6 / 65536.0).0, 11);
    }

    #[test]
    fn test_u8fixed8() {
        assert_eq!(U8Fixed8::from_f64(2.19921875).0, 0x0233);
        assert_eq!(U8Fixed8::from_f64(1.80078125).0, 0x01CD);
        assert_eq!(U8Fixed8::from_f64(1.0).to_be_bytes(), [0x01, 0x00]);
    }

    #[test]
    fn test_xyz_number() {
        // D50 white point in ICC encoding
        let bytes: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249
        ];
        let xyz = XyzNumber::from_bytes(&bytes).unwrap();
        let color = xyz.to_xyz();

        assert!((color.x - 0.9642).abs() < 0.001);
        assert!((color.y - 1.0).abs() < 0.001);
        assert!((color.z - 0.8249).abs() < 0.001);

        assert_eq!(XyzNumber::from_xyz(color).to_bytes(), bytes);
    }

    #[test]
    fn test_tag_signature_display() {
        assert_eq!(TagSignature::PROFILE_DESC.to_string(), "desc");
        assert_eq!(TagSignature::RED_COLORANT.to_string(), "rXYZ");
        assert_eq!(TypeSignature::XYZ.to_string(), "XYZ ");
        assert_eq!(TagSignature(0x0000_0001).to_string(), "0x00000001");
    }

    #[test]
    fn test_date_from_unix_seconds() {
        assert_eq!(
            DateTimeNumber::from_unix_seconds(0),
            DateTimeNumber { year: 1970, month: 1, day: 1, hour: 0, minute: 0, second: 0 }
        );

        // 2016-02-29T13:45:07Z
        let leap = DateTimeNumber::from_unix_seconds(1_456_753_507);
        assert_eq!((leap.year, leap.month, leap.day), (2016, 2, 29));
        assert_eq!((leap.hour, leap.minute, leap.second), (13, 45, 7));
    }

    #[test]
    fn test_date_bytes() {
        let date = DateTimeNumber { year: 2016, month: 3, day: 4, hour: 5, minute: 6, second: 7 };
        let bytes = date.to_bytes();
        assert_eq!(&bytes[0..2], &2016u16.to_be_bytes());
        assert_eq!(DateTimeNumber::from_bytes(&bytes), Some(date));
    }
}
