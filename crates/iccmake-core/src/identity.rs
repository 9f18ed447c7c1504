//! Abstract identity profiles
//!
//! Lab (v2 and v4) and XYZ (v4) profiles whose A2B0 and B2A0 tags map the
//! connection space onto itself. They carry a D50 media white and the text
//! tags, but no colorants or tone curves, so they sit outside the
//! catalog × curve matrix.

use tracing::debug;

use crate::color::ICC_D50;
use crate::icc::tags::{Lut16Data, LutCurvesData, LutDirection, encode_text_tag, encode_xyz};
use crate::icc::{ColorSpace, DateTimeNumber, IccHeader, IccProfile, ProfileVersion, TagSignature};
use crate::naming::NamingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityProfile {
    /// v2.1 Lab, lut16 tables
    LabV2,
    /// v4.3 Lab, curves-only mAB/mBA
    LabV4,
    /// v4.3 XYZ, curves-only mAB/mBA
    XyzV4,
}

impl IdentityProfile {
    pub const ALL: [IdentityProfile; 3] = [
        IdentityProfile::LabV2,
        IdentityProfile::LabV4,
        IdentityProfile::XyzV4,
    ];

    pub fn base_name(self) -> &'static str {
        match self {
            IdentityProfile::LabV2 | IdentityProfile::LabV4 => "Lab-D50-Identity",
            IdentityProfile::XyzV4 => "XYZ-D50-Identity",
        }
    }

    /// Connection space, which is also the data color space
    pub fn pcs(self) -> ColorSpace {
        match self {
            IdentityProfile::LabV2 | IdentityProfile::LabV4 => ColorSpace::Lab,
            IdentityProfile::XyzV4 => ColorSpace::Xyz,
        }
    }

    pub fn version(self) -> ProfileVersion {
        match self {
            IdentityProfile::LabV2 => ProfileVersion::V2_1,
            IdentityProfile::LabV4 | IdentityProfile::XyzV4 => ProfileVersion::V4_3,
        }
    }

    fn version_suffix(self) -> &'static str {
        if self.version().is_v4() { "-V4" } else { "-V2" }
    }

    /// `Lab-D50-Identity-elle-V2.icc` under the default policy
    pub fn file_name(self, naming: &NamingPolicy) -> String {
        naming.identity_file_name(self.base_name(), self.version_suffix())
    }

    /// Build the profile; its description is its file name
    pub fn build(self, naming: &NamingPolicy, copyright: &str, creation_date: DateTimeNumber) -> IccProfile {
        let version = self.version();
        let mut header = IccHeader::abstract_pcs(version, self.pcs());
        header.creation_date = creation_date;
        let mut profile = IccProfile::new(header);

        let name = self.file_name(naming);
        profile.set_tag(
            TagSignature::PROFILE_DESC,
            encode_text_tag(TagSignature::PROFILE_DESC, &name, version),
        );
        profile.set_tag(
            TagSignature::COPYRIGHT,
            encode_text_tag(TagSignature::COPYRIGHT, copyright, version),
        );
        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(ICC_D50));

        let (a_to_b, b_to_a) = if version.is_v4() {
            (
                LutCurvesData::identity(LutDirection::AToB, 3).encode(),
                LutCurvesData::identity(LutDirection::BToA, 3).encode(),
            )
        } else {
            let lut = Lut16Data::identity(3).encode();
            (lut.clone(), lut)
        };
        profile.set_tag(TagSignature::A_TO_B0, a_to_b);
        profile.set_tag(TagSignature::B_TO_A0, b_to_a);

        debug!(%name, %version, "built identity profile");
        profile
    }
}

/// Identity profiles whose base name is in `names`; an empty filter keeps all
pub fn select(names: &[String]) -> Vec<IdentityProfile> {
    IdentityProfile::ALL
        .into_iter()
        .filter(|id| names.is_empty() || names.iter().any(|n| n.eq_ignore_ascii_case(id.base_name())))
        .collect()
}
