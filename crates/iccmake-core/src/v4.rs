//! ICC v4 matrix/TRC profile assembly
//!
//! RGB profiles carry D50 in `wtpt`, the Bradford adaptation from the
//! space's white in `chad`, and D50-relative colorants. Gray profiles carry
//! the published media white in `wtpt` and a single `kTRC`.

use tracing::debug;

use crate::color::{ICC_D50, PrimarySet, adaptation_to_pcs};
use crate::error::Result;
use crate::icc::tags::{ChromaticityTagData, encode_sf32_matrix, encode_text_tag, encode_xyz};
use crate::icc::{
    ColorSpace, CurveData, DateTimeNumber, IccHeader, IccProfile, ParametricCurveData,
    ProfileVersion, TagSignature,
};
use crate::math::ToneCurve;
use crate::naming::{NamingPolicy, ProfileGeneration};
use crate::profile_spec::ProfileSpec;
use crate::trc::TrcId;

/// Encode a tone curve the way v4 profiles carry it
///
/// Pure gammas become a one-entry `curv`; piecewise curves become `para`
/// function type 3.
pub fn encode_trc_v4(curve: &ToneCurve) -> Vec<u8> {
    match curve {
        ToneCurve::Gamma(g) => CurveData::Gamma(*g).encode(),
        ToneCurve::Piecewise(_) => ParametricCurveData {
            curve: curve.to_parametric(),
        }
        .encode(),
    }
}

/// Builds v4 profiles from catalog specs
#[derive(Debug, Clone, Default)]
pub struct V4ProfileBuilder {
    naming: NamingPolicy,
    /// Fixed creation date; the system clock is used when `None`
    creation_date: Option<DateTimeNumber>,
}

impl V4ProfileBuilder {
    pub fn new(naming: NamingPolicy) -> Self {
        Self {
            naming,
            creation_date: None,
        }
    }

    /// Stamp every profile with `date` instead of the current time
    pub fn with_creation_date(mut self, date: DateTimeNumber) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn naming(&self) -> &NamingPolicy {
        &self.naming
    }

    /// Date stamped into the next profile
    pub fn creation_date(&self) -> DateTimeNumber {
        self.creation_date.unwrap_or_else(DateTimeNumber::now)
    }

    /// Build the v4 profile for `spec` with tone curve `trc`
    pub fn build(&self, spec: &ProfileSpec, trc: TrcId) -> Result<IccProfile> {
        match &spec.primaries {
            Some(primaries) => self.build_rgb(spec, primaries, trc),
            None => Ok(self.build_gray(spec, trc)),
        }
    }

    fn header(&self, color_space: ColorSpace) -> IccHeader {
        let mut header = IccHeader::display(ProfileVersion::V4_3, color_space);
        header.creation_date = self.creation_date();
        header
    }

    /// desc, cprt and (when set) dmnd
    fn text_tags(&self, profile: &mut IccProfile, spec: &ProfileSpec, trc: TrcId) {
        let version = profile.header.version;
        let name = self.naming.file_name(&spec.base_name, trc, ProfileGeneration::V4);
        debug!(%name, "v4 description");

        profile.set_tag(
            TagSignature::PROFILE_DESC,
            encode_text_tag(TagSignature::PROFILE_DESC, &name, version),
        );
        profile.set_tag(
            TagSignature::COPYRIGHT,
            encode_text_tag(TagSignature::COPYRIGHT, &spec.copyright, version),
        );
        if let Some(manufacturer) = spec.manufacturer_for(trc) {
            profile.set_tag(
                TagSignature::DEVICE_MFG_DESC,
                encode_text_tag(TagSignature::DEVICE_MFG_DESC, manufacturer, version),
            );
        }
    }

    fn build_rgb(&self, spec: &ProfileSpec, primaries: &PrimarySet, trc: TrcId) -> Result<IccProfile> {
        let colorants = primaries.colorants(&spec.white_point)?;
        let chad = adaptation_to_pcs(&spec.white_point)?;

        let mut profile = IccProfile::new(self.header(ColorSpace::Rgb));
        self.text_tags(&mut profile, spec, trc);

        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(ICC_D50));
        profile.set_tag(TagSignature::CHAD, encode_sf32_matrix(&chad));
        for (sig, colorant) in TagSignature::COLORANTS.into_iter().zip(colorants) {
            profile.set_tag(sig, encode_xyz(colorant));
        }

        let curve = encode_trc_v4(&trc.tone_curve());
        for sig in TagSignature::RGB_TRCS {
            profile.set_tag(sig, curve.clone());
        }

        profile.set_tag(
            TagSignature::CHROMATICITY,
            ChromaticityTagData::from_primaries(&primaries.to_array()).encode(),
        );

        debug!(base = %spec.base_name, %trc, tags = profile.tag_count(), "built v4 RGB profile");
        Ok(profile)
    }

    fn build_gray(&self, spec: &ProfileSpec, trc: TrcId) -> IccProfile {
        let mut profile = IccProfile::new(self.header(ColorSpace::Gray));
        self.text_tags(&mut profile, spec, trc);

        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(spec.media_white_point));
        profile.set_tag(TagSignature::GRAY_TRC, encode_trc_v4(&trc.tone_curve()));

        debug!(base = %spec.base_name, %trc, "built v4 gray profile");
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::icc::{ProfileClass, S15Fixed16, TagData};

    fn spec(name: &str) -> ProfileSpec {
        catalog::builtin()
            .into_iter()
            .find(|s| s.base_name == name)
            .unwrap()
    }

    fn builder() -> V4ProfileBuilder {
        V4ProfileBuilder::default().with_creation_date(DateTimeNumber::from_unix_seconds(0))
    }

    #[test]
    fn test_rgb_header_and_tags() {
        let profile = builder().build(&spec("ClayRGB"), TrcId::G22).unwrap();
        assert_eq!(profile.header.version, ProfileVersion::V4_3);
        assert_eq!(profile.header.device_class, ProfileClass::Display);
        assert_eq!(profile.header.color_space, ColorSpace::Rgb);
        assert_eq!(profile.header.pcs, ColorSpace::Xyz);
        assert_eq!(profile.header.creation_date.year, 1970);

        let sigs: Vec<_> = profile.tag_signatures().map(|s| s.to_string()).collect();
        assert_eq!(
            sigs,
            ["desc", "cprt", "dmnd", "wtpt", "chad", "rXYZ", "gXYZ", "bXYZ", "rTRC", "gTRC", "bTRC", "chrm"]
        );
        assert_eq!(profile.description().as_deref(), Some("ClayRGB-elle-V4-g22.icc"));
    }

    #[test]
    fn test_rgb_white_is_d50() {
        let profile = builder().build(&spec("sRGB"), TrcId::Srgb).unwrap();
        let wtpt = profile.read_xyz(TagSignature::MEDIA_WHITE).unwrap().unwrap();
        assert!(wtpt.approx_eq(&ICC_D50, S15Fixed16::QUANTUM));
    }

    #[test]
    fn test_trc_encodings() {
        let gamma = builder().build(&spec("sRGB"), TrcId::G18).unwrap();
        match gamma.tag(TagSignature::RED_TRC).unwrap().unwrap() {
            TagData::Curve(CurveData::Gamma(g)) => assert_eq!(g, 1.80078125),
            other => panic!("expected curv gamma, got {:?}", other),
        }

        let piecewise = builder().build(&spec("sRGB"), TrcId::Srgb).unwrap();
        let tag = piecewise.tag(TagSignature::GREEN_TRC).unwrap().unwrap();
        assert!(tag.as_parametric_curve().is_some());
        let y = tag.eval_curve(0.5).unwrap();
        assert!((y - TrcId::Srgb.tone_curve().eval(0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_trcs_share_one_payload() {
        let bytes = builder().build(&spec("Rec2020"), TrcId::LabL).unwrap().encode();
        let offset = |i: usize| {
            let at = 132 + i * 12 + 4;
            u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        // rTRC, gTRC, bTRC sit at table positions 8..11
        assert_eq!(offset(8), offset(9));
        assert_eq!(offset(9), offset(10));
    }

    #[test]
    fn test_rec709_uses_override() {
        let profile = builder().build(&spec("sRGB"), TrcId::Rec709).unwrap();
        assert_eq!(profile.description().as_deref(), Some("Rec709-elle-V4-rec709.icc"));
        assert!(profile.manufacturer().unwrap().starts_with("Rec709 chromaticities"));
    }

    #[test]
    fn test_gray_profile() {
        let gray = spec("Gray");
        let profile = builder().build(&gray, TrcId::G22).unwrap();
        assert_eq!(profile.header.color_space, ColorSpace::Gray);
        assert!(profile.has_tag(TagSignature::GRAY_TRC));
        assert!(!profile.has_tag(TagSignature::DEVICE_MFG_DESC));
        assert!(!profile.has_tag(TagSignature::MEDIA_BLACK));
        assert!(!profile.has_tag(TagSignature::RED_COLORANT));

        let wtpt = profile.read_xyz(TagSignature::MEDIA_WHITE).unwrap().unwrap();
        assert!(wtpt.approx_eq(&gray.media_white_point, S15Fixed16::QUANTUM));
    }

    #[test]
    fn test_collinear_primaries() {
        use crate::color::Chromaticity;

        // Blue sits on the red-green line
        let mut bad = spec("sRGB");
        bad.primaries = Some(PrimarySet::new(
            Chromaticity::new(0.64, 0.33),
            Chromaticity::new(0.3, 0.6),
            Chromaticity::new(0.47, 0.465),
        ));
        assert!(matches!(
            builder().build(&bad, TrcId::G10),
            Err(crate::Error::InvalidPrimaries(_))
        ));
    }
}
