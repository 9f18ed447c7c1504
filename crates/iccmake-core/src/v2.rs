//! Legacy v2 profiles derived from finished v4 profiles
//!
//! RGB profiles start from the v2 template of the curve's family. The
//! colorant tags always come from the v4 profile byte for byte. The TRC
//! tags come from the v4 profile for pure gammas; the piecewise families
//! keep the template's own sampled curves, since v2 readers may not
//! understand `para`.
//!
//! Gray profiles have no template: the v4 gray profile is re-versioned and
//! its text and curve tags re-encoded.

use tracing::debug;

use crate::color::Xyz;
use crate::error::{Error, Result};
use crate::icc::tags::{encode_text_tag, encode_xyz};
use crate::icc::{ColorSpace, CurveData, IccProfile, ProfileClass, ProfileVersion, TagData, TagSignature};
use crate::math::ToneCurve;
use crate::naming::{NamingPolicy, ProfileGeneration};
use crate::profile_spec::ProfileSpec;
use crate::template::TemplateStore;
use crate::trc::TrcId;

/// Default `curv` table length for re-sampled parametric curves
pub const DEFAULT_CURVE_TABLE_SIZE: usize = 4096;

const FROM_V4: &str = "v4 profile";
const FROM_TEMPLATE: &str = "v2 template";

pub struct V2ProfileDeriver<'a> {
    templates: &'a TemplateStore,
    naming: NamingPolicy,
    curve_table_size: usize,
}

impl<'a> V2ProfileDeriver<'a> {
    pub fn new(templates: &'a TemplateStore, naming: NamingPolicy) -> Self {
        Self {
            templates,
            naming,
            curve_table_size: DEFAULT_CURVE_TABLE_SIZE,
        }
    }

    pub fn with_curve_table_size(mut self, size: usize) -> Self {
        self.curve_table_size = size.max(2);
        self
    }

    /// Derive the v2 companion of `v4`, RGB or gray depending on `spec`
    pub fn derive_for(&self, v4: &IccProfile, spec: &ProfileSpec, trc: TrcId) -> Result<IccProfile> {
        let (white, black) = (spec.media_white_point, spec.media_black_point);
        if spec.is_gray() {
            self.derive_gray(v4, white, black, trc, spec)
        } else {
            self.derive(v4, white, black, trc, spec)
        }
    }

    /// Derive a v2 RGB profile from the template of `trc`'s family
    pub fn derive(
        &self,
        v4: &IccProfile,
        media_white: Xyz,
        media_black: Xyz,
        trc: TrcId,
        spec: &ProfileSpec,
    ) -> Result<IccProfile> {
        let family = trc.family();
        let mut profile = self.templates.get(family)?.clone();
        debug!(?family, template = family.file_name(), "deriving v2 profile");

        profile.header.version = ProfileVersion::V2_2;
        profile.header.device_class = ProfileClass::Display;
        profile.header.color_space = ColorSpace::Rgb;
        profile.header.pcs = ColorSpace::Xyz;
        profile.header.creation_date = v4.header.creation_date;

        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(media_white));
        profile.set_tag(TagSignature::MEDIA_BLACK, encode_xyz(media_black));

        for sig in TagSignature::COLORANTS {
            profile.set_tag(sig, copy_tag(v4, sig, FROM_V4)?);
        }

        if family.copies_trc() {
            for sig in TagSignature::RGB_TRCS {
                profile.set_tag(sig, copy_tag(v4, sig, FROM_V4)?);
            }
        } else if let Some(&tag) = TagSignature::RGB_TRCS.iter().find(|&&sig| !profile.has_tag(sig)) {
            return Err(Error::TagReadFailure {
                tag,
                source_profile: FROM_TEMPLATE,
            });
        }

        self.text_tags(&mut profile, spec, trc);
        Ok(profile)
    }

    /// Derive a v2 gray profile from the v4 gray profile
    ///
    /// A `curv` `kTRC` is kept as is; a `para` one is sampled into a table.
    /// Parametric types other than 0 and 3 fail with `TagReadFailure`.
    /// `bkpt` is added from `media_black`.
    pub fn derive_gray(
        &self,
        v4: &IccProfile,
        media_white: Xyz,
        media_black: Xyz,
        trc: TrcId,
        spec: &ProfileSpec,
    ) -> Result<IccProfile> {
        let mut profile = v4.clone();
        profile.header.version = ProfileVersion::V2_2;
        profile.header.device_class = ProfileClass::Display;
        profile.header.pcs = ColorSpace::Xyz;

        let missing = || Error::TagReadFailure {
            tag: TagSignature::GRAY_TRC,
            source_profile: FROM_V4,
        };
        let curve = match v4.tag(TagSignature::GRAY_TRC)?.ok_or_else(missing)? {
            TagData::Curve(_) => copy_tag(v4, TagSignature::GRAY_TRC, FROM_V4)?,
            TagData::ParametricCurve(para) => {
                let curve = ToneCurve::from_parametric(&para.curve).ok_or_else(missing)?;
                CurveData::Table(curve.sample(self.curve_table_size)).encode()
            }
            _ => return Err(missing()),
        };
        profile.set_tag(TagSignature::GRAY_TRC, curve);

        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(media_white));
        profile.set_tag(TagSignature::MEDIA_BLACK, encode_xyz(media_black));

        self.text_tags(&mut profile, spec, trc);
        debug!(base = %spec.base_name, %trc, "derived v2 gray profile");
        Ok(profile)
    }

    /// cprt, dmnd and desc in v2 encodings
    fn text_tags(&self, profile: &mut IccProfile, spec: &ProfileSpec, trc: TrcId) {
        let version = profile.header.version;
        let name = self.naming.file_name(&spec.base_name, trc, ProfileGeneration::TrueV2);

        profile.set_tag(
            TagSignature::COPYRIGHT,
            encode_text_tag(TagSignature::COPYRIGHT, &spec.copyright, version),
        );
        match spec.manufacturer_for(trc) {
            Some(text) => profile.set_tag(
                TagSignature::DEVICE_MFG_DESC,
                encode_text_tag(TagSignature::DEVICE_MFG_DESC, text, version),
            ),
            None => {
                profile.remove_tag(TagSignature::DEVICE_MFG_DESC);
            }
        }
        profile.set_tag(
            TagSignature::PROFILE_DESC,
            encode_text_tag(TagSignature::PROFILE_DESC, &name, version),
        );
    }
}

fn copy_tag(from: &IccProfile, tag: TagSignature, source_profile: &'static str) -> Result<Vec<u8>> {
    from.tag_bytes(tag)
        .map(<[u8]>::to_vec)
        .ok_or(Error::TagReadFailure { tag, source_profile })
}
