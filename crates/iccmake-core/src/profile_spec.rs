//! Colorimetric description of one catalog entry

use serde::{Deserialize, Serialize};

use crate::color::{Chromaticity, PrimarySet, Xyz};
use crate::error::{Error, Result};
use crate::trc::TrcId;

/// Manufacturer text used instead of the default for one tone curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerOverride {
    pub trc: TrcId,
    pub text: String,
}

/// Everything needed to build the profiles of one color space
///
/// RGB entries carry primaries; gray entries do not. The tone curve is
/// chosen per pipeline run and is not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpec {
    /// Name stem of the output files, e.g. `sRGB`
    pub base_name: String,
    /// White used to build the primary matrix
    pub white_point: Chromaticity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primaries: Option<PrimarySet>,
    /// Published media white, written literally into v2 `wtpt`
    pub media_white_point: Xyz,
    #[serde(default)]
    pub media_black_point: Xyz,
    /// Device manufacturer description (`dmnd`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manufacturer_overrides: Vec<ManufacturerOverride>,
    pub copyright: String,
}

impl ProfileSpec {
    pub fn is_gray(&self) -> bool {
        self.primaries.is_none()
    }

    /// Manufacturer text for profiles built with `trc`
    pub fn manufacturer_for(&self, trc: TrcId) -> Option<&str> {
        self.manufacturer_overrides
            .iter()
            .find(|o| o.trc == trc)
            .map(|o| o.text.as_str())
            .or(self.manufacturer.as_deref())
    }

    /// Check the invariants that deserialized entries may violate
    pub fn validate(&self) -> Result<()> {
        if self.base_name.is_empty() {
            return Err(Error::InvalidCatalogEntry("empty base name".to_string()));
        }
        for (what, xyz) in [
            ("media white", self.media_white_point),
            ("media black", self.media_black_point),
        ] {
            if !xyz.y.is_finite() || xyz.y < 0.0 {
                return Err(Error::InvalidCatalogEntry(format!(
                    "{}: {} has Y = {}",
                    self.base_name, what, xyz.y
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> ProfileSpec {
        ProfileSpec {
            base_name: "Gray".to_string(),
            white_point: Chromaticity::new(0.3457, 0.3585),
            primaries: None,
            media_white_point: Xyz::new(0.9642, 1.0, 0.8249),
            media_black_point: Xyz::default(),
            manufacturer: None,
            manufacturer_overrides: Vec::new(),
            copyright: "c".to_string(),
        }
    }

    #[test]
    fn test_manufacturer_override() {
        let mut spec = gray();
        assert_eq!(spec.manufacturer_for(TrcId::Rec709), None);

        spec.manufacturer = Some("default".to_string());
        spec.manufacturer_overrides.push(ManufacturerOverride {
            trc: TrcId::Rec709,
            text: "rec709 text".to_string(),
        });
        assert_eq!(spec.manufacturer_for(TrcId::Rec709), Some("rec709 text"));
        assert_eq!(spec.manufacturer_for(TrcId::G10), Some("default"));
    }

    #[test]
    fn test_validate() {
        assert!(gray().is_gray());
        assert!(gray().validate().is_ok());

        let mut bad = gray();
        bad.media_black_point = Xyz::new(0.0, -0.1, 0.0);
        assert!(matches!(bad.validate(), Err(Error::InvalidCatalogEntry(_))));

        let mut nan = gray();
        nan.media_white_point.y = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "base_name": "Gray",
            "white_point": {"x": 0.3457, "y": 0.3585},
            "media_white_point": {"x": 0.9642, "y": 1.0, "z": 0.8249},
            "copyright": "c"
        }"#;
        let spec: ProfileSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, gray());
    }
}
