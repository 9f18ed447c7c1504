//! Output file names
//!
//! `<base><id_suffix><version_suffix>-<trc><extension>`, for example
//! `ClayRGB-elle-V4-g22.icc` or `Gray-elle-trueV2-srgbtrc.icc`. Identity
//! profiles have no curve: `Lab-D50-Identity-elle-V4.icc`.

use serde::{Deserialize, Serialize};

use crate::trc::TrcId;

/// Which of the two profiles of a pair a name is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileGeneration {
    V4,
    /// v2 derived from a real v2 template
    TrueV2,
}

impl ProfileGeneration {
    pub fn suffix(self) -> &'static str {
        match self {
            ProfileGeneration::V4 => "-V4",
            ProfileGeneration::TrueV2 => "-trueV2",
        }
    }
}

/// Assemble a file name from its parts
pub fn profile_file_name(
    base_name: &str,
    id_suffix: &str,
    version_suffix: &str,
    trc: TrcId,
    extension: &str,
) -> String {
    format!("{base_name}{id_suffix}{version_suffix}-{trc}{extension}")
}

/// Base name actually used for `trc`
///
/// sRGB primaries with the Rec.709 curve are published as Rec.709.
pub fn output_base_name(base_name: &str, trc: TrcId) -> &str {
    match (base_name, trc) {
        ("sRGB", TrcId::Rec709) => "Rec709",
        _ => base_name,
    }
}

/// Suffix and extension shared by every output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingPolicy {
    pub id_suffix: String,
    pub extension: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            id_suffix: "-elle".to_string(),
            extension: ".icc".to_string(),
        }
    }
}

impl NamingPolicy {
    pub fn file_name(&self, base_name: &str, trc: TrcId, generation: ProfileGeneration) -> String {
        profile_file_name(
            output_base_name(base_name, trc),
            &self.id_suffix,
            generation.suffix(),
            trc,
            &self.extension,
        )
    }

    /// Name of a profile without a tone curve
    pub fn identity_file_name(&self, base_name: &str, version_suffix: &str) -> String {
        format!("{base_name}{}{version_suffix}{}", self.id_suffix, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let naming = NamingPolicy::default();
        assert_eq!(
            naming.file_name("ClayRGB", TrcId::G22, ProfileGeneration::V4),
            "ClayRGB-elle-V4-g22.icc"
        );
        assert_eq!(
            naming.file_name("Gray", TrcId::Srgb, ProfileGeneration::TrueV2),
            "Gray-elle-trueV2-srgbtrc.icc"
        );
    }

    #[test]
    fn test_rec709_rename() {
        let naming = NamingPolicy::default();
        assert_eq!(
            naming.file_name("sRGB", TrcId::Rec709, ProfileGeneration::V4),
            "Rec709-elle-V4-rec709.icc"
        );
        assert_eq!(
            naming.file_name("sRGB", TrcId::Srgb, ProfileGeneration::V4),
            "sRGB-elle-V4-srgbtrc.icc"
        );
        // Only the sRGB entry is renamed
        assert_eq!(output_base_name("Rec2020", TrcId::Rec709), "Rec2020");
    }

    #[test]
    fn test_custom_policy() {
        let naming = NamingPolicy {
            id_suffix: String::new(),
            extension: ".icm".to_string(),
        };
        assert_eq!(
            naming.file_name("LargeRGB", TrcId::LabL, ProfileGeneration::TrueV2),
            "LargeRGB-trueV2-labl.icm"
        );
        assert_eq!(naming.identity_file_name("XYZ-D50-Identity", "-V4"), "XYZ-D50-Identity-V4.icm");
    }
}
