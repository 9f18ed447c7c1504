//! v2 templates keyed by tone curve family
//!
//! A template is a real v2 profile whose header and curve tags are reused
//! by derived profiles. Templates are either read from a directory holding
//! `sampleV2.icm`, `sampleV2srgb.icm`, `sampleV2rec709.icm` and
//! `sampleV2labl.icm`, or synthesized in memory.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::color::{ICC_D50, Xyz};
use crate::error::{Error, Result};
use crate::icc::tags::{encode_text_tag, encode_xyz};
use crate::icc::{ColorSpace, CurveData, IccError, IccHeader, IccProfile, ProfileVersion, TagSignature};
use crate::trc::TemplateFamily;

/// Placeholder colorants of synthesized templates; always overwritten on derive
const PLACEHOLDER_COLORANTS: [Xyz; 3] = [
    Xyz::new(0.4361, 0.2225, 0.0139),
    Xyz::new(0.3851, 0.7169, 0.0971),
    Xyz::new(0.1431, 0.0606, 0.7141),
];

#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<TemplateFamily, IccProfile>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: TemplateFamily, template: IccProfile) {
        self.templates.insert(family, template);
    }

    /// Template for `family`
    pub fn get(&self, family: TemplateFamily) -> Result<&IccProfile> {
        self.templates
            .get(&family)
            .ok_or(Error::TemplateNotFound { family })
    }

    pub fn contains(&self, family: TemplateFamily) -> bool {
        self.templates.contains_key(&family)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load every template file present in `dir`
    ///
    /// Missing files are skipped; asking for their family later fails with
    /// [`Error::TemplateNotFound`]. Files that are present must decode as v2
    /// profiles.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut store = Self::new();
        for family in TemplateFamily::ALL {
            let path = dir.join(family.file_name());
            if !path.is_file() {
                warn!(path = %path.display(), "template not found, skipping");
                continue;
            }

            let bytes = std::fs::read(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let template = IccProfile::parse(&bytes).map_err(|source| Error::InvalidTemplate {
                path: path.clone(),
                source,
            })?;

            let version = template.header.version;
            if !version.is_v2() {
                return Err(Error::InvalidTemplate {
                    path,
                    source: IccError::UnsupportedVersion {
                        major: version.major,
                        minor: version.minor,
                    },
                });
            }

            debug!(?family, path = %path.display(), tags = template.tag_count(), "loaded template");
            store.insert(family, template);
        }
        Ok(store)
    }

    /// One synthesized template per family, curves sampled into `table_size` entries
    pub fn synthesized(table_size: usize) -> Self {
        let mut store = Self::new();
        for family in TemplateFamily::ALL {
            store.insert(family, synthesize(family, table_size));
        }
        store
    }

    /// Templates in family order, encoded, with their file names
    pub fn encode_all(&self) -> Vec<(&'static str, Vec<u8>)> {
        TemplateFamily::ALL
            .into_iter()
            .filter_map(|family| {
                self.templates
                    .get(&family)
                    .map(|t| (family.file_name(), t.encode()))
            })
            .collect()
    }
}

/// Build a v2 template for `family`
///
/// The header is 2.2 display RGB with an XYZ PCS. The TRC tags hold the
/// family's curve sampled into a `curv` table.
pub fn synthesize(family: TemplateFamily, table_size: usize) -> IccProfile {
    let version = ProfileVersion::V2_2;
    let mut profile = IccProfile::new(IccHeader::display(version, ColorSpace::Rgb));

    let name = family.file_name();
    profile.set_tag(
        TagSignature::PROFILE_DESC,
        encode_text_tag(TagSignature::PROFILE_DESC, name, version),
    );
    profile.set_tag(
        TagSignature::COPYRIGHT,
        encode_text_tag(TagSignature::COPYRIGHT, "No copyright, use freely", version),
    );
    profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(ICC_D50));
    profile.set_tag(TagSignature::MEDIA_BLACK, encode_xyz(Xyz::default()));
    for (sig, colorant) in TagSignature::COLORANTS.into_iter().zip(PLACEHOLDER_COLORANTS) {
        profile.set_tag(sig, encode_xyz(colorant));
    }

    let curve = CurveData::Table(family.representative().tone_curve().sample(table_size)).encode();
    for sig in TagSignature::RGB_TRCS {
        profile.set_tag(sig, curve.clone());
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("iccmake-template-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_synthesized_store_has_every_family() {
        let store = TemplateStore::synthesized(256);
        assert_eq!(store.len(), 4);
        for family in TemplateFamily::ALL {
            let template = store.get(family).unwrap();
            assert!(template.header.version.is_v2());
            match template.tag(TagSignature::RED_TRC).unwrap().unwrap() {
                crate::icc::TagData::Curve(CurveData::Table(t)) => assert_eq!(t.len(), 256),
                other => panic!("{:?}: unexpected TRC {:?}", family, other),
            }
        }
    }

    #[test]
    fn test_missing_family() {
        let store = TemplateStore::new();
        assert!(matches!(
            store.get(TemplateFamily::LabL),
            Err(Error::TemplateNotFound { family: TemplateFamily::LabL })
        ));
    }

    #[test]
    fn test_load_dir_roundtrip() {
        let dir = temp_dir("roundtrip");
        let store = TemplateStore::synthesized(64);
        for (name, bytes) in store.encode_all() {
            if name != TemplateFamily::Rec709.file_name() {
                std::fs::write(dir.join(name), bytes).unwrap();
            }
        }

        let loaded = TemplateStore::load_dir(&dir).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(!loaded.contains(TemplateFamily::Rec709));
        assert_eq!(
            loaded.get(TemplateFamily::Srgb).unwrap().tag_bytes(TagSignature::GREEN_TRC),
            store.get(TemplateFamily::Srgb).unwrap().tag_bytes(TagSignature::GREEN_TRC)
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_dir_rejects_garbage_and_v4() {
        let dir = temp_dir("garbage");
        std::fs::write(dir.join("sampleV2.icm"), b"not a profile").unwrap();
        assert!(matches!(
            TemplateStore::load_dir(&dir),
            Err(Error::InvalidTemplate { .. })
        ));

        let mut v4 = synthesize(TemplateFamily::Gamma, 16);
        v4.header.version = ProfileVersion::V4_3;
        std::fs::write(dir.join("sampleV2.icm"), v4.encode()).unwrap();
        assert!(matches!(
            TemplateStore::load_dir(&dir),
            Err(Error::InvalidTemplate {
                source: IccError::UnsupportedVersion { major: 4, .. },
                ..
            })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
