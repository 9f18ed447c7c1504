//! Colorimetry
//!
//! - CIE XYZ tristimulus values
//! - xyY chromaticities and RGB primary sets
//! - Catalog white points and the ICC D50 illuminant

pub mod chromaticity;
pub mod white_point;
pub mod xyz;

pub use chromaticity::{Chromaticity, PrimarySet, adaptation_to_pcs};
pub use white_point::{ICC_D50, WhitePoint};
pub use xyz::Xyz;
