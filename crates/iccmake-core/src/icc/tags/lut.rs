//! LUT Tag Types
//!
//! - mft2 (lut16Type): v2 input tables, 3x3 matrix, CLUT and output tables
//! - mAB / mBA (lutAToBType / lutBToAType): v4; only the form holding
//!   nothing but B curves is decoded
//!
//! See ICC.1:2022 Sections 10.11 (lut16), 10.12 (mAB) and 10.13 (mBA)

use super::curves::CurveData;
use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature};
use crate::math::Matrix3x3;

/// 16-bit LUT data (mft2 / lut16Type)
#[derive(Debug, Clone, PartialEq)]
pub struct Lut16Data {
    pub input_channels: u8,
    pub output_channels: u8,
    /// Grid points per CLUT dimension
    pub grid_points: u8,
    /// Only applied when the input is XYZ
    pub matrix: Matrix3x3,
    /// One table per input channel, all of the same length
    pub input_tables: Vec<Vec<u16>>,
    /// `grid_points^input_channels` grid nodes of `output_channels` values,
    /// first input channel varying slowest
    pub clut: Vec<u16>,
    /// One table per output channel, all of the same length
    pub output_tables: Vec<Vec<u16>>,
}

impl Lut16Data {
    /// Identity over `channels` channels: two-point grid, two-entry tables
    pub fn identity(channels: u8) -> Self {
        let n = channels as usize;
        let ramp = vec![0, u16::MAX];
        // Node `corner` has bit (n - 1 - c) set where channel c is at its maximum
        let clut = (0..1usize << n)
            .flat_map(|corner| {
                (0..n).map(move |c| if (corner >> (n - 1 - c)) & 1 == 1 { u16::MAX } else { 0 })
            })
            .collect();

        Self {
            input_channels: channels,
            output_channels: channels,
            grid_points: 2,
            matrix: Matrix3x3::IDENTITY,
            input_tables: vec![ramp.clone(); n],
            clut,
            output_tables: vec![ramp; n],
        }
    }

    /// Parse from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 44 {
            return Err(IccError::CorruptedData("lut16 tag too small".to_string()));
        }

        let input_channels = data[0];
        let output_channels = data[1];
        let grid_points = data[2];

        let mut m = [[0.0f64; 3]; 3];
        for (i, c) in data[4..40].chunks_exact(4).enumerate() {
            m[i / 3][i % 3] = S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64();
        }

        let input_entries = u16::from_be_bytes([data[40], data[41]]) as usize;
        let output_entries = u16::from_be_bytes([data[42], data[43]]) as usize;
        let clut_len = (grid_points as usize)
            .checked_pow(u32::from(input_channels))
            .and_then(|nodes| nodes.checked_mul(output_channels as usize))
            .ok_or_else(|| IccError::CorruptedData("lut16 CLUT size overflows".to_string()))?;

        let mut values = data[44..].chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
        let mut take = |count: usize, what: &str| -> Result<Vec<u16>, IccError> {
            let out: Vec<u16> = values.by_ref().take(count).collect();
            if out.len() < count {
                return Err(IccError::CorruptedData(format!("lut16 {} truncated", what)));
            }
            Ok(out)
        };

        let input_tables = (0..input_channels)
            .map(|_| take(input_entries, "input tables"))
            .collect::<Result<_, _>>()?;
        let clut = take(clut_len, "CLUT")?;
        let output_tables = (0..output_channels)
            .map(|_| take(output_entries, "output tables"))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            input_channels,
            output_channels,
            grid_points,
            matrix: Matrix3x3::new(m),
            input_tables,
            clut,
            output_tables,
        })
    }

    /// Encode as a complete `mft2` tag payload
    pub fn encode(&self) -> Vec<u8> {
        let table_len = |tables: &[Vec<u16>]| tables.first().map_or(0, Vec::len) as u16;

        let mut out = TypeSignature::LUT16.tag_prefix().to_vec();
        out.extend_from_slice(&[self.input_channels, self.output_channels, self.grid_points, 0]);
        for row in &self.matrix.m {
            for &v in row {
                out.extend_from_slice(&S15Fixed16::from_f64(v).to_be_bytes());
            }
        }
        out.extend_from_slice(&table_len(&self.input_tables).to_be_bytes());
        out.extend_from_slice(&table_len(&self.output_tables).to_be_bytes());

        let values = self
            .input_tables
            .iter()
            .flatten()
            .chain(&self.clut)
            .chain(self.output_tables.iter().flatten());
        for v in values {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out
    }
}

/// Which way a v4 LUT tag maps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutDirection {
    /// Device to PCS (`mAB `)
    AToB,
    /// PCS to device (`mBA `)
    BToA,
}

impl LutDirection {
    pub fn type_signature(self) -> TypeSignature {
        match self {
            LutDirection::AToB => TypeSignature::LUT_A_TO_B,
            LutDirection::BToA => TypeSignature::LUT_B_TO_A,
        }
    }
}

/// v4 LUT tag made of B curves alone
#[derive(Debug, Clone, PartialEq)]
pub struct LutCurvesData {
    pub direction: LutDirection,
    /// One curve per channel
    pub curves: Vec<CurveData>,
}

impl LutCurvesData {
    /// Offset of the first B curve: the fixed part of the tag
    const CURVES_OFFSET: usize = 32;

    pub fn identity(direction: LutDirection, channels: u8) -> Self {
        Self {
            direction,
            curves: vec![CurveData::Identity; channels as usize],
        }
    }

    /// Parse a complete payload, type signature included
    ///
    /// Element offsets count from the start of the tag. `Ok(None)` when the
    /// tag uses a matrix, M curves, a CLUT or A curves.
    pub fn parse(direction: LutDirection, data: &[u8]) -> Result<Option<Self>, IccError> {
        if data.len() < Self::CURVES_OFFSET {
            return Err(IccError::CorruptedData("mAB/mBA tag too small".to_string()));
        }
        let be32 = |at: usize| u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

        let (input_channels, output_channels) = (data[8], data[9]);
        let b_offset = be32(12) as usize;
        if b_offset == 0 || (16..32).step_by(4).any(|at| be32(at) != 0) {
            return Ok(None);
        }

        // B curves sit on the PCS side
        let channels = match direction {
            LutDirection::AToB => output_channels,
            LutDirection::BToA => input_channels,
        };

        let mut offset = b_offset;
        let mut curves = Vec::with_capacity(channels as usize);
        for _ in 0..channels {
            let payload = data
                .get(offset..)
                .filter(|p| p.len() >= 12 && TypeSignature::of_payload(p) == Some(TypeSignature::CURVE))
                .ok_or_else(|| IccError::CorruptedData("mAB/mBA B curve is not a curv".to_string()))?;
            let curve = CurveData::parse(&payload[8..])?;
            offset += curve.encode().len().next_multiple_of(4);
            curves.push(curve);
        }

        Ok(Some(Self { direction, curves }))
    }

    /// Encode as a complete `mAB ` or `mBA ` tag payload
    pub fn encode(&self) -> Vec<u8> {
        let channels = self.curves.len() as u8;

        let mut out = self.direction.type_signature().tag_prefix().to_vec();
        out.extend_from_slice(&[channels, channels, 0, 0]);
        out.extend_from_slice(&(Self::CURVES_OFFSET as u32).to_be_bytes());
        // matrix, M curves, CLUT, A curves
        out.extend_from_slice(&[0; 16]);

        for curve in &self.curves {
            out.extend_from_slice(&curve.encode());
            out.resize(out.len().next_multiple_of(4), 0);
        }
        out
    }
}
