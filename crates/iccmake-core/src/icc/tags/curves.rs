//! Curve Tag Types
//!
//! - curv: identity, single u8Fixed8 gamma, or a u16 lookup table
//! - para: parametric function types 0-4
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para)

use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature, U8Fixed8};
use crate::math::gamma::{ParametricCurve, ParametricCurveType, parametric_curve_eval};

/// Curve tag data (curv type)
#[derive(Debug, Clone, PartialEq)]
pub enum CurveData {
    /// Identity curve (count = 0)
    Identity,
    /// Simple gamma (count = 1, value is u8Fixed8)
    Gamma(f64),
    /// Lookup table (count > 1, values are u16)
    Table(Vec<u16>),
}

impl CurveData {
    /// Parse curve data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::CorruptedData("Curve tag too small".to_string()));
        }

        let count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

        match count {
            0 => Ok(CurveData::Identity),
            1 => {
                if data.len() < 6 {
                    return Err(IccError::CorruptedData(
                        "Curve gamma value missing".to_string(),
                    ));
                }
                let gamma = U8Fixed8::from_be_bytes([data[4], data[5]]).to_f64();
                Ok(CurveData::Gamma(gamma))
            }
            _ => {
                let required_len = 4 + count * 2;
                if data.len() < required_len {
                    return Err(IccError::CorruptedData(format!(
                        "Curve table too small: need {} bytes, have {}",
                        required_len,
                        data.len()
                    )));
                }

                let table = data[4..required_len]
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                Ok(CurveData::Table(table))
            }
        }
    }

    /// Encode as a complete `curv` tag payload
    pub fn encode(&self) -> Vec<u8> {
        let mut out = TypeSignature::CURVE.tag_prefix().to_vec();
        match self {
            CurveData::Identity => out.extend_from_slice(&0u32.to_be_bytes()),
            CurveData::Gamma(g) => {
                out.extend_from_slice(&1u32.to_be_bytes());
                out.extend_from_slice(&U8Fixed8::from_f64(*g).to_be_bytes());
            }
            CurveData::Table(table) => {
                out.reserve(4 + table.len() * 2);
                out.extend_from_slice(&(table.len() as u32).to_be_bytes());
                for v in table {
                    out.extend_from_slice(&v.to_be_bytes());
                }
            }
        }
        out
    }

    /// Evaluate the curve at a given input (0.0 to 1.0)
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);

        match self {
            CurveData::Identity => x,
            CurveData::Gamma(g) => x.powf(*g),
            CurveData::Table(table) => {
                if table.is_empty() {
                    return x;
                }
                if table.len() == 1 {
                    return table[0] as f64 / 65535.0;
                }

                let pos = x * (table.len() - 1) as f64;
                let idx = pos.floor() as usize;
                let frac = pos - idx as f64;

                if idx >= table.len() - 1 {
                    return table[table.len() - 1] as f64 / 65535.0;
                }

                let v0 = table[idx] as f64;
                let v1 = table[idx + 1] as f64;
                (v0 + frac * (v1 - v0)) / 65535.0
            }
        }
    }
}

/// Parametric curve data (para type)
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricCurveData {
    pub curve: ParametricCurve,
}

impl ParametricCurveData {
    /// Parse parametric curve from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::CorruptedData(
                "Parametric curve too small".to_string(),
            ));
        }

        let func_type = u16::from_be_bytes([data[0], data[1]]);
        let curve_type = ParametricCurveType::from_u16(func_type).ok_or_else(|| {
            IccError::CorruptedData(format!("Unknown parametric curve type: {}", func_type))
        })?;

        let count = curve_type.param_count();
        let needed = 4 + count * 4;
        if data.len() < needed {
            return Err(IccError::CorruptedData(format!(
                "Parametric curve type {} needs {} bytes, have {}",
                func_type,
                needed,
                data.len()
            )));
        }

        let params: Vec<f64> = data[4..needed]
            .chunks_exact(4)
            .map(|c| S15Fixed16::from_be_bytes([c[0], c[1], c[2], c[3]]).to_f64())
            .collect();

        let curve = ParametricCurve::from_params(curve_type, &params)
            .ok_or_else(|| IccError::CorruptedData("Parametric curve params".to_string()))?;
        Ok(Self { curve })
    }

    /// Encode as a complete `para` tag payload
    pub fn encode(&self) -> Vec<u8> {
        let params = self.curve.params();
        let mut out = TypeSignature::PARA.tag_prefix().to_vec();
        out.extend_from_slice(&self.curve.curve_type.to_u16().to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        for p in params {
            out.extend_from_slice(&S15Fixed16::from_f64(p).to_be_bytes());
        }
        out
    }

    pub fn eval(&self, x: f64) -> f64 {
        parametric_curve_eval(&self.curve, x)
    }
}
