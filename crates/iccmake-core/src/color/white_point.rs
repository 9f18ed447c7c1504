//! White Points
//!
//! Each catalog white carries two values that are deliberately kept apart:
//! the chromaticity used to build the colorant matrix, and the published
//! media white tristimulus written into v2 `wtpt` tags. The second is never
//! recomputed from the first.

use crate::color::{Chromaticity, Xyz};

/// ICC PCS illuminant (ICC.1:2022 Section 7.2.16), the v4 `wtpt` value
pub const ICC_D50: Xyz = Xyz::new(0.9642, 1.0, 0.8249);

/// A white point definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    pub name: &'static str,
    /// Chromaticity used for primary matrix construction
    pub chromaticity: Chromaticity,
    /// Published media white tristimulus
    pub media: Xyz,
}

impl WhitePoint {
    pub const fn new(name: &'static str, x: f64, y: f64, media: [f64; 3]) -> Self {
        Self {
            name,
            chromaticity: Chromaticity::new(x, y),
            media: Xyz::from_array(media),
        }
    }
}

/// D50 as given by the ICC illuminant, to nine places
pub const D50_ILLUMINANT: WhitePoint = WhitePoint::new(
    "D50",
    0.345702915,
    0.358538597,
    [0.964199999, 1.0, 0.824899998],
);

/// D50 as given in the ROMM RGB specification
pub const D50_ROMM: WhitePoint = WhitePoint::new(
    "D50 (ROMM)",
    0.3457,
    0.3585,
    [0.964295676, 1.0, 0.825104603],
);

/// D65 as given in sRGB, Rec.709, Rec.2020 and Adobe RGB (1998)
pub const D65: WhitePoint = WhitePoint::new("D65", 0.3127, 0.3290, [0.95045471, 1.0, 1.08905029]);

/// Equal-energy illuminant E
pub const E: WhitePoint = WhitePoint::new(
    "E",
    0.333333333,
    0.333333333,
    [1.0, 1.0, 1.0],
);

/// The ACES white, near D60
pub const D60_ACES: WhitePoint = WhitePoint::new(
    "D60 (ACES)",
    0.32168,
    0.33767,
    [0.952646075, 1.0, 1.008825184],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_whites_are_near_their_chromaticities() {
        for white in [D50_ILLUMINANT, D50_ROMM, D65, E, D60_ACES] {
            let (x, y) = white.media.to_xy().unwrap();
            assert!(
                (x - white.chromaticity.x).abs() < 1e-4 && (y - white.chromaticity.y).abs() < 1e-4,
                "{}: media xy ({}, {}) vs {:?}",
                white.name,
                x,
                y,
                white.chromaticity
            );
            assert_eq!(white.media.y, 1.0);
        }
    }

    #[test]
    fn test_d50_illuminant_matches_pcs() {
        assert!(D50_ILLUMINANT.media.approx_eq(&ICC_D50, 1e-8));
    }
}
