//! XYZ Tag Type
//!
//! The XYZType contains an array of XYZ values. Used for colorant tags,
//! white point, black point, etc.
//!
//! See ICC.1:2022 Section 10.31

use crate::color::Xyz;
use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, XyzNumber};

/// XYZ tag data - contains one or more XYZ values
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTagData {
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    /// Parse XYZ data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 12 {
            return Err(IccError::CorruptedData("XYZ tag too small".to_string()));
        }

        let values = data
            .chunks_exact(12)
            .filter_map(XyzNumber::from_bytes)
            .collect();

        Ok(Self { values })
    }

    /// Get the first XYZ value as Xyz color type
    pub fn to_xyz(&self) -> Option<Xyz> {
        self.values.first().map(|v| v.to_xyz())
    }

    /// Encode as a complete `XYZ ` tag payload
    pub fn encode(&self) -> Vec<u8> {
        let mut out = TypeSignature::XYZ.tag_prefix().to_vec();
        for value in &self.values {
            out.extend_from_slice(&value.to_bytes());
        }
        out
    }
}

/// Encode a single tristimulus value as an `XYZ ` tag payload
pub fn encode_xyz(xyz: Xyz) -> Vec<u8> {
    XyzTagData {
        values: vec![XyzNumber::from_xyz(xyz)],
    }
    .encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xyz_tag() {
        // D50 white point
        let data: [u8; 12] = [
            0x00, 0x00, 0xF6, 0xD6, // X = 0.9642
            0x00, 0x01, 0x00, 0x00, // Y = 1.0
            0x00, 0x00, 0xD3, 0x2D, // Z = 0.8249
        ];

        let tag = XyzTagData::parse(&data).unwrap();
        assert_eq!(tag.values.len(), 1);

        let xyz = tag.to_xyz().unwrap();
        assert!((xyz.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_encode_xyz() {
        let encoded = encode_xyz(Xyz::new(0.9642, 1.0, 0.8249));
        assert_eq!(&encoded[0..8], b"XYZ \0\0\0\0");
        assert_eq!(
            &encoded[8..],
            &[0x00, 0x00, 0xF6, 0xD6, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xD3, 0x2D]
        );
    }

    #[test]
    fn test_encode_negative_component() {
        let encoded = encode_xyz(Xyz::new(-0.5, 0.0, 0.0));
        assert_eq!(&encoded[8..12], &[0xFF, 0xFF, 0x80, 0x00]);
    }

    #[test]
    fn test_parse_xyz_too_small() {
        let data: [u8; 4] = [0, 0, 0, 0];
        assert!(XyzTagData::parse(&data).is_err());
    }
}
