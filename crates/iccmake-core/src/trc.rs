//! Tone response curve presets
//!
//! Six named curves cover every profile in the catalog: three pure gammas
//! and three piecewise curves with a linear toe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::math::{PiecewiseCurve, ToneCurve};

/// Named tone curve preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrcId {
    /// Linear gamma
    G10,
    /// Gamma 1.8 as encoded in u8Fixed8
    G18,
    /// Gamma 2.2 as encoded in u8Fixed8
    G22,
    /// sRGB (IEC 61966-2-1)
    Srgb,
    /// Rec.709 (ITU-R BT.709)
    Rec709,
    /// CIE L* companding
    LabL,
}

impl TrcId {
    /// Every preset, in catalog order
    pub const ALL: [TrcId; 6] = [
        TrcId::G10,
        TrcId::G18,
        TrcId::G22,
        TrcId::Srgb,
        TrcId::Rec709,
        TrcId::LabL,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrcId::G10 => "g10",
            TrcId::G18 => "g18",
            TrcId::G22 => "g22",
            TrcId::Srgb => "srgbtrc",
            TrcId::Rec709 => "rec709",
            TrcId::LabL => "labl",
        }
    }

    /// `-g10`, `-srgbtrc`, ...
    pub fn file_suffix(self) -> String {
        format!("-{}", self.as_str())
    }

    /// Which v2 template this curve is derived from
    pub fn family(self) -> TemplateFamily {
        match self {
            TrcId::G10 | TrcId::G18 | TrcId::G22 => TemplateFamily::Gamma,
            TrcId::Srgb => TemplateFamily::Srgb,
            TrcId::Rec709 => TemplateFamily::Rec709,
            TrcId::LabL => TemplateFamily::LabL,
        }
    }

    /// Build the curve for this preset
    pub fn tone_curve(self) -> ToneCurve {
        match self {
            TrcId::G10 => ToneCurve::Gamma(1.0),
            TrcId::G18 => ToneCurve::Gamma(1.80078125),
            TrcId::G22 => ToneCurve::Gamma(2.19921875),
            TrcId::Srgb => ToneCurve::Piecewise(PiecewiseCurve {
                gamma: 2.4,
                slope: 1.0 / 1.055,
                intercept: 0.055 / 1.055,
                linear_slope: 1.0 / 12.92,
                breakpoint: 0.04045,
            }),
            TrcId::Rec709 => ToneCurve::Piecewise(PiecewiseCurve {
                gamma: 1.0 / 0.45,
                slope: 1.0 / 1.099,
                intercept: 0.099 / 1.099,
                linear_slope: 1.0 / 4.5,
                breakpoint: 0.081,
            }),
            TrcId::LabL => ToneCurve::Piecewise(PiecewiseCurve {
                gamma: 3.0,
                slope: 1.0 / 1.16,
                intercept: 0.16 / 1.16,
                linear_slope: 2700.0 / 24389.0,
                breakpoint: 0.08,
            }),
        }
    }
}

impl fmt::Display for TrcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrcId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrcId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownCurveId(s.to_string()))
    }
}

impl TryFrom<String> for TrcId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrcId> for String {
    fn from(id: TrcId) -> Self {
        id.as_str().to_string()
    }
}

/// Build the tone curve named by `id`
pub fn tone_curve(id: &str) -> crate::Result<ToneCurve> {
    Ok(id.parse::<TrcId>()?.tone_curve())
}

/// Group of curves sharing one v2 template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateFamily {
    /// All pure gammas; their curves are replaced from the v4 profile
    Gamma,
    Srgb,
    Rec709,
    LabL,
}

impl TemplateFamily {
    pub const ALL: [TemplateFamily; 4] = [
        TemplateFamily::Gamma,
        TemplateFamily::Srgb,
        TemplateFamily::Rec709,
        TemplateFamily::LabL,
    ];

    /// Template file name inside a template directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateFamily::Gamma => "sampleV2.icm",
            TemplateFamily::Srgb => "sampleV2srgb.icm",
            TemplateFamily::Rec709 => "sampleV2rec709.icm",
            TemplateFamily::LabL => "sampleV2labl.icm",
        }
    }

    /// Whether derived v2 profiles take their TRC tags from the v4 profile
    pub fn copies_trc(self) -> bool {
        self == TemplateFamily::Gamma
    }

    /// Curve a synthesized template of this family carries
    pub fn representative(self) -> TrcId {
        match self {
            TemplateFamily::Gamma => TrcId::G22,
            TemplateFamily::Srgb => TrcId::Srgb,
            TemplateFamily::Rec709 => TrcId::Rec709,
            TemplateFamily::LabL => TrcId::LabL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_ids() {
        for id in TrcId::ALL {
            assert_eq!(id.as_str().parse::<TrcId>().unwrap(), id);
        }
        assert!(matches!(
            "g24".parse::<TrcId>(),
            Err(Error::UnknownCurveId(s)) if s == "g24"
        ));
        assert!(tone_curve("srgb").is_err());
    }

    #[test]
    fn test_gammas_reach_one() {
        for id in [TrcId::G10, TrcId::G18, TrcId::G22] {
            assert_eq!(id.tone_curve().eval(1.0), 1.0, "{}", id);
            assert_eq!(id.family(), TemplateFamily::Gamma);
        }
    }

    #[test]
    fn test_gamma_exponents_are_u8fixed8_exact() {
        for id in [TrcId::G10, TrcId::G18, TrcId::G22] {
            let ToneCurve::Gamma(g) = id.tone_curve() else {
                panic!("{} is not a gamma", id);
            };
            assert_eq!((g * 256.0).fract(), 0.0);
        }
    }

    /// Largest step allowed where the two segments of a piecewise curve meet
    const JOIN_TOLERANCE: f64 = 1e-6;

    /// The published BT.709 constants (1/0.45, 0.099, 4.5, 0.081) do not
    /// meet exactly: the power segment is about 5.5e-5 below the linear one
    /// at 0.081. The curve keeps the published values, so rec709 alone gets
    /// this looser bound.
    const REC709_GAP: f64 = 6e-5;

    fn piecewise(id: TrcId) -> PiecewiseCurve {
        match id.tone_curve() {
            ToneCurve::Piecewise(curve) => curve,
            ToneCurve::Gamma(_) => panic!("{} is not piecewise", id),
        }
    }

    #[test]
    fn test_srgb_and_labl_join_at_breakpoint() {
        for id in [TrcId::Srgb, TrcId::LabL] {
            let gap = piecewise(id).breakpoint_gap();
            assert!(gap < JOIN_TOLERANCE, "{}: gap {}", id, gap);
        }
        assert!((piecewise(TrcId::LabL).eval(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rec709_gap_matches_published_constants() {
        let gap = piecewise(TrcId::Rec709).breakpoint_gap();
        assert!(gap > JOIN_TOLERANCE && gap < REC709_GAP, "gap {}", gap);
    }

    #[test]
    fn test_families() {
        assert_eq!(TrcId::Srgb.family().file_name(), "sampleV2srgb.icm");
        assert_eq!(TrcId::G18.family().file_name(), "sampleV2.icm");
        assert!(TemplateFamily::Gamma.copies_trc());
        assert!(!TemplateFamily::LabL.copies_trc());
        for family in TemplateFamily::ALL {
            assert_eq!(family.representative().family(), family);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&TrcId::Rec709).unwrap();
        assert_eq!(json, "\"rec709\"");
        let back: TrcId = serde_json::from_str("\"labl\"").unwrap();
        assert_eq!(back, TrcId::LabL);
        assert!(serde_json::from_str::<TrcId>("\"bogus\"").is_err());
    }
}
