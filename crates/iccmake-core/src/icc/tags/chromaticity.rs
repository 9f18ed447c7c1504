//! Chromaticity Tag Type (`chrm`)
//!
//! Channel count, a phosphor/colorant type code, then one (x, y) pair per
//! channel. Coordinates are written as signed 16.16 so that gamut-filling
//! primaries with negative coordinates survive, the same as lcms2 does.

use crate::color::Chromaticity;
use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature};

#[derive(Debug, Clone, PartialEq)]
pub struct ChromaticityTagData {
    /// Phosphor or colorant type; 0 when the set is not one of the ICC presets
    pub colorant_type: u16,
    /// (x, y) pairs per channel
    pub channels: Vec<(f64, f64)>,
}

impl ChromaticityTagData {
    pub fn from_primaries(primaries: &[Chromaticity]) -> Self {
        Self {
            colorant_type: 0,
            channels: primaries.iter().map(|c| (c.x, c.y)).collect(),
        }
    }

    /// Parse from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::CorruptedData("chrm tag too small".to_string()));
        }
        let count = u16::from_be_bytes([data[0], data[1]]) as usize;
        let colorant_type = u16::from_be_bytes([data[2], data[3]]);

        if data.len() < 4 + count * 8 {
            return Err(IccError::CorruptedData(format!(
                "chrm tag with {} channels truncated",
                count
            )));
        }

        let read = |at: usize| {
            S15Fixed16::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]).to_f64()
        };
        let channels = (0..count)
            .map(|i| {
                let at = 4 + i * 8;
                (read(at), read(at + 4))
            })
            .collect();

        Ok(Self {
            colorant_type,
            channels,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = TypeSignature::CHRM.tag_prefix().to_vec();
        out.extend_from_slice(&(self.channels.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.colorant_type.to_be_bytes());
        for &(x, y) in &self.channels {
            out.extend_from_slice(&S15Fixed16::from_f64(x).to_be_bytes());
            out.extend_from_slice(&S15Fixed16::from_f64(y).to_be_bytes());
        }
        out
    }
}
