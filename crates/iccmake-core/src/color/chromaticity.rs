//! Chromaticity coordinates and RGB primary sets
//!
//! A primary set plus a white chromaticity determine the RGB → XYZ matrix.
//! For ICC use the matrix is then Bradford-adapted to the D50 PCS, so its
//! columns are exactly the `rXYZ`, `gXYZ` and `bXYZ` colorant tags.

use serde::{Deserialize, Serialize};

use crate::color::Xyz;
use crate::color::white_point::ICC_D50;
use crate::error::{Error, Result};
use crate::math::{Matrix3x3, adaptation_matrix};

fn unit_luminance() -> f64 {
    1.0
}

/// CIE xyY chromaticity with a reference luminance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
    /// Reference luminance; 1.0 for every catalog value
    #[serde(rename = "Y", default = "unit_luminance")]
    pub luminance: f64,
}

impl Chromaticity {
    /// Chromaticity with unit luminance
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            luminance: 1.0,
        }
    }

    pub const fn with_luminance(x: f64, y: f64, luminance: f64) -> Self {
        Self { x, y, luminance }
    }

    /// Convert to tristimulus values: `X = x·Y/y`, `Z = (1−x−y)·Y/y`
    pub fn to_xyz(&self) -> Result<Xyz> {
        if self.y == 0.0 {
            return Err(Error::DivisionByZero {
                x: self.x,
                y: self.y,
            });
        }
        let k = self.luminance / self.y;
        Ok(Xyz::new(
            self.x * k,
            self.luminance,
            (1.0 - self.x - self.y) * k,
        ))
    }
}

/// Ordered red, green, blue primaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimarySet {
    pub red: Chromaticity,
    pub green: Chromaticity,
    pub blue: Chromaticity,
}

impl PrimarySet {
    pub const fn new(red: Chromaticity, green: Chromaticity, blue: Chromaticity) -> Self {
        Self { red, green, blue }
    }

    pub fn to_array(&self) -> [Chromaticity; 3] {
        [self.red, self.green, self.blue]
    }

    /// Columns `(x, y, 1−x−y)` per primary
    fn chromaticity_matrix(&self) -> Matrix3x3 {
        let column = |c: &Chromaticity| [c.x, c.y, 1.0 - c.x - c.y];
        Matrix3x3::from_columns(column(&self.red), column(&self.green), column(&self.blue))
    }

    /// RGB → XYZ matrix relative to `white`, with white at Y = 1
    pub fn to_xyz_matrix(&self, white: &Chromaticity) -> Result<Matrix3x3> {
        let w = Chromaticity::new(white.x, white.y).to_xyz()?;

        let p = self.chromaticity_matrix();
        let p_inv = p.inverse().ok_or_else(|| {
            Error::InvalidPrimaries(format!(
                "primaries {:?} are collinear",
                self.to_array().map(|c| (c.x, c.y))
            ))
        })?;

        let scale = p_inv.multiply_vec(w.to_array());
        Ok(p.scale_columns(scale))
    }

    /// RGB → PCS matrix: [`Self::to_xyz_matrix`] followed by Bradford to D50
    pub fn to_pcs_matrix(&self, white: &Chromaticity) -> Result<Matrix3x3> {
        let rgb_to_xyz = self.to_xyz_matrix(white)?;
        let chad = adaptation_to_pcs(white)?;
        Ok(chad.multiply(&rgb_to_xyz))
    }

    /// PCS colorants in red, green, blue order
    pub fn colorants(&self, white: &Chromaticity) -> Result<[Xyz; 3]> {
        let m = self.to_pcs_matrix(white)?;
        Ok([0, 1, 2].map(|i| Xyz::from_array(m.column(i))))
    }
}

/// Bradford matrix from `white` (at Y = 1) to the ICC D50 illuminant
pub fn adaptation_to_pcs(white: &Chromaticity) -> Result<Matrix3x3> {
    let w = Chromaticity::new(white.x, white.y).to_xyz()?;
    adaptation_matrix(w, ICC_D50).ok_or_else(|| {
        Error::InvalidPrimaries(format!(
            "white point ({}, {}) has no Bradford adaptation to D50",
            white.x, white.y
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const D65: Chromaticity = Chromaticity::new(0.3127, 0.3290);

    const SRGB: PrimarySet = PrimarySet::new(
        Chromaticity::new(0.64, 0.33),
        Chromaticity::new(0.30, 0.60),
        Chromaticity::new(0.15, 0.06),
    );

    #[test]
    fn test_to_xyz() {
        let xyz = D65.to_xyz().unwrap();
        assert!((xyz.x - 0.950456).abs() < 1e-5);
        assert_eq!(xyz.y, 1.0);
        assert!((xyz.z - 1.089058).abs() < 1e-5);

        let scaled = Chromaticity::with_luminance(0.3127, 0.3290, 0.5).to_xyz().unwrap();
        assert!(scaled.approx_eq(&xyz.scale(0.5), 1e-12));
    }

    #[test]
    fn test_zero_y_is_an_error() {
        let err = Chromaticity::new(0.5, 0.0).to_xyz().unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { x, .. } if x == 0.5));
    }

    #[test]
    fn test_srgb_xyz_matrix() {
        let m = SRGB.to_xyz_matrix(&D65).unwrap();
        let expected = Matrix3x3::new([
            [0.4124, 0.3576, 0.1805],
            [0.2126, 0.7152, 0.0722],
            [0.0193, 0.1192, 0.9505],
        ]);
        assert!(m.approx_eq(&expected, 1e-3), "{:?}", m);
    }

    #[test]
    fn test_srgb_pcs_colorants() {
        let [r, g, b] = SRGB.colorants(&D65).unwrap();
        assert!(r.approx_eq(&Xyz::new(0.4361, 0.2225, 0.0139), 1e-3), "{:?}", r);
        assert!(g.approx_eq(&Xyz::new(0.3851, 0.7169, 0.0971), 1e-3), "{:?}", g);
        assert!(b.approx_eq(&Xyz::new(0.1431, 0.0606, 0.7141), 1e-3), "{:?}", b);
    }

    #[test]
    fn test_colorants_sum_to_d50() {
        let [r, g, b] = SRGB.colorants(&D65).unwrap();
        assert!((r + g + b).approx_eq(&ICC_D50, 1e-12));
    }

    #[test]
    fn test_collinear_primaries() {
        let collinear = PrimarySet::new(
            Chromaticity::new(0.1, 0.1),
            Chromaticity::new(0.2, 0.2),
            Chromaticity::new(0.3, 0.3),
        );
        assert!(matches!(
            collinear.to_pcs_matrix(&D65),
            Err(Error::InvalidPrimaries(_))
        ));
    }

    #[test]
    fn test_serde_luminance_default() {
        let c: Chromaticity = serde_json::from_str(r#"{"x": 0.3127, "y": 0.329}"#).unwrap();
        assert_eq!(c, D65);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"Y\":1.0"));
    }
}
