//! ICC Tag Payloads
//!
//! Every tag payload starts with a 4-byte type signature and 4 reserved
//! bytes, followed by type-specific data. Each type here can be decoded
//! and encoded.
//!
//! See ICC.1:2022 Section 10.

mod chromaticity;
mod curves;
mod lut;
mod text;
mod xyz;

pub use chromaticity::ChromaticityTagData;
pub use curves::{CurveData, ParametricCurveData};
pub use lut::{Lut16Data, LutCurvesData, LutDirection};
pub use text::{TextData, encode_desc, encode_mluc, encode_text, encode_text_tag};
pub use xyz::{XyzTagData, encode_xyz};

use super::error::IccError;
use super::types::{S15Fixed16, TypeSignature};
use crate::math::Matrix3x3;

/// Decoded tag data
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    /// XYZ type data (colorants, white point)
    Xyz(XyzTagData),
    /// Curve type (TRC)
    Curve(CurveData),
    ParametricCurve(ParametricCurveData),
    /// `text` or v2 `desc`
    Text(TextData),
    MultiLocalizedUnicode(TextData),
    /// Chromatic adaptation matrix (sf32)
    ChromaticAdaptation(Matrix3x3),
    Chromaticity(ChromaticityTagData),
    Lut16(Lut16Data),
    /// `mAB ` or `mBA ` holding only B curves
    LutCurves(LutCurvesData),
    /// Unknown/unsupported tag type
    Unknown { type_sig: TypeSignature, data: Vec<u8> },
}

impl TagData {
    /// Parse a full tag payload, type signature included
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let Some(type_sig) = TypeSignature::of_payload(data).filter(|_| data.len() >= 8) else {
            return Err(IccError::CorruptedData(
                "Tag data too small for header".to_string(),
            ));
        };
        let type_data = &data[8..];

        Ok(match type_sig {
            TypeSignature::XYZ => TagData::Xyz(XyzTagData::parse(type_data)?),
            TypeSignature::CURVE => TagData::Curve(CurveData::parse(type_data)?),
            TypeSignature::PARA => TagData::ParametricCurve(ParametricCurveData::parse(type_data)?),
            TypeSignature::TEXT => TagData::Text(TextData::parse_text(type_data)?),
            TypeSignature::DESC => TagData::Text(TextData::parse_desc(type_data)?),
            TypeSignature::MLUC => TagData::MultiLocalizedUnicode(TextData::parse_mluc(type_data)?),
            TypeSignature::SF32 => TagData::ChromaticAdaptation(parse_sf32_matrix(type_data)?),
            TypeSignature::CHRM => TagData::Chromaticity(ChromaticityTagData::parse(type_data)?),
            TypeSignature::LUT16 => TagData::Lut16(Lut16Data::parse(type_data)?),
            TypeSignature::LUT_A_TO_B | TypeSignature::LUT_B_TO_A => {
                let direction = if type_sig == TypeSignature::LUT_A_TO_B {
                    LutDirection::AToB
                } else {
                    LutDirection::BToA
                };
                match LutCurvesData::parse(direction, data)? {
                    Some(lut) => TagData::LutCurves(lut),
                    None => TagData::Unknown {
                        type_sig,
                        data: data.to_vec(),
                    },
                }
            }
            _ => TagData::Unknown {
                type_sig,
                data: data.to_vec(),
            },
        })
    }

    pub fn as_xyz(&self) -> Option<&XyzTagData> {
        match self {
            TagData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    pub fn as_curve(&self) -> Option<&CurveData> {
        match self {
            TagData::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_parametric_curve(&self) -> Option<&ParametricCurveData> {
        match self {
            TagData::ParametricCurve(curve) => Some(curve),
            _ => None,
        }
    }

    /// Text from any of the text-family types
    pub fn as_text(&self) -> Option<&TextData> {
        match self {
            TagData::Text(text) | TagData::MultiLocalizedUnicode(text) => Some(text),
            _ => None,
        }
    }

    /// Evaluate a TRC tag of either curve type
    pub fn eval_curve(&self, x: f64) -> Option<f64> {
        match self {
            TagData::Curve(curve) => Some(curve.eval(x)),
            TagData::ParametricCurve(curve) => Some(curve.eval(x)),
            _ => None,
        }
    }
}

/// Parse sf32 type as 3x3 matrix (row-major)
fn parse_sf32_matrix(data: &[u8]) -> Result<Matrix3x3, IccError> {
    if data.len() < 36 {
        return Err(IccError::CorruptedData("sf32 matrix too small".to_string()));
    }

    let mut m = [[0.0f64; 3]; 3];
    for (i, c) in data[..36].chunks_exact(4).enumerate() {
        m[i / 3][i % 3] = S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64();
    }
    Ok(Matrix3x3::new(m))
}

/// Encode a 3x3 matrix as an `sf32` payload, row-major
pub fn encode_sf32_matrix(matrix: &Matrix3x3) -> Vec<u8> {
    let mut out = TypeSignature::SF32.tag_prefix().to_vec();
    for row in &matrix.m {
        for &v in row {
            out.extend_from_slice(&S15Fixed16::from_f64(v).to_be_bytes());
        }
    }
    out
}
