//! Built-in catalog of color spaces
//!
//! Chromaticities are the published values, to the precision the sources
//! give. Media whites are the published tristimulus values and are never
//! derived from the white chromaticity.

use std::path::Path;

use crate::color::white_point::{D50_ILLUMINANT, D50_ROMM, D60_ACES, D65, E};
use crate::color::{Chromaticity, PrimarySet, WhitePoint, Xyz};
use crate::error::{Error, Result};
use crate::profile_spec::{ManufacturerOverride, ProfileSpec};
use crate::trc::TrcId;

/// Copyright text of every built-in profile
pub const COPYRIGHT: &str = "Copyright 2016, Elle Stone (http://ninedegreesbelow.com/), \
CC-BY-SA 3.0 Unported (https://creativecommons.org/licenses/by-sa/3.0/legalcode).";

/// One row of the built-in table
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub base_name: &'static str,
    pub white: WhitePoint,
    /// `None` for gray
    pub primaries: Option<PrimarySet>,
    pub manufacturer: Option<&'static str>,
    pub manufacturer_overrides: &'static [(TrcId, &'static str)],
}

const fn xy(x: f64, y: f64) -> Chromaticity {
    Chromaticity::new(x, y)
}

const fn rgb(r: (f64, f64), g: (f64, f64), b: (f64, f64)) -> Option<PrimarySet> {
    Some(PrimarySet::new(xy(r.0, r.1), xy(g.0, g.1), xy(b.0, b.1)))
}

pub static BUILTIN: &[CatalogEntry] = &[
    CatalogEntry {
        base_name: "ACEScg",
        white: D60_ACES,
        primaries: rgb((0.713, 0.293), (0.165, 0.830), (0.128, 0.044)),
        manufacturer: Some(
            "ACEScg chromaticities from S-2014-004 v1.0.1, \
             http://www.oscars.org/science-technology/aces/aces-documentation",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "ACES",
        white: D60_ACES,
        primaries: rgb(
            (0.734704192222, 0.265298276252),
            (-0.000004945077, 0.999992850272),
            (0.000099889199, -0.077007518685),
        ),
        manufacturer: Some(
            "ACES chromaticities from TB-2014-004, \
             http://www.oscars.org/science-technology/aces/aces-documentation",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "AllColorsRGB",
        white: D50_ILLUMINANT,
        primaries: rgb((0.734690265, 0.265309735), (0.0, 1.0), (0.0, -0.0758542197)),
        manufacturer: Some(
            "AllColorsRGB chromaticities from \
             http://ninedegreesbelow.com/photography/lcms-make-icc-profiles.html#AllColorsRGB",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "CIERGB",
        white: E,
        primaries: rgb(
            (0.734689082, 0.265296653),
            (0.273673341, 0.717437354),
            (0.166531028, 0.008882428),
        ),
        manufacturer: Some(
            "A discussion of the CIERGB chromaticities can be found at \
             http://ninedegreesbelow.com/photography/lcms-make-icc-profiles.html#CIERGB",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "ClayRGB",
        white: D65,
        primaries: rgb(
            (0.639996511, 0.329996864),
            (0.210005295, 0.710004866),
            (0.149997606, 0.060003644),
        ),
        manufacturer: Some(
            "ClayRGB chromaticities as given in Adobe RGB (1998) Color Image Encoding, \
             Version 2005-05, https://www.adobe.com/digitalimag/pdfs/AdobeRGB1998.pdf",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "IdentityRGB",
        white: D50_ILLUMINANT,
        primaries: rgb((1.0, 0.0), (0.0, 1.0), (0.0, 0.0)),
        manufacturer: Some(
            "A discussion of the Identity profile primaries can be found here: \
             http://ninedegreesbelow.com/photography/xyz-rgb.html#ICC",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "LargeRGB",
        white: D50_ROMM,
        primaries: rgb((0.7347, 0.2653), (0.1596, 0.8404), (0.0366, 0.0001)),
        manufacturer: Some(
            "LargeRGB chromaticities from Reference Input/Output Medium Metric RGB Color \
             Encodings (RIMM/ROMM RGB), http://photo-lovers.org/pdf/color/romm.pdf",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "Rec2020",
        white: D65,
        primaries: rgb(
            (0.708012540607, 0.291993664388),
            (0.169991652439, 0.797007778423),
            (0.130997824007, 0.045996550894),
        ),
        manufacturer: Some(
            "Rec2020 chromaticities from \
             https://www.itu.int/dms_pub/itu-r/opb/rep/R-REP-BT.2246-2-2012-PDF-E.pdf; \
             https://www.itu.int/dms_pubrec/itu-r/rec/bt/R-REC-BT.2020-2-201510-I!!PDF-E.pdf",
        ),
        manufacturer_overrides: &[],
    },
    CatalogEntry {
        base_name: "sRGB",
        white: D65,
        primaries: rgb(
            (0.639998686, 0.330010138),
            (0.300003784, 0.600003357),
            (0.150002046, 0.059997204),
        ),
        manufacturer: Some(
            "sRGB chromaticities from A Standard Default Color Space for the Internet - sRGB, \
             http://www.w3.org/Graphics/Color/sRGB; also see \
             http://www.color.org/specification/ICC1v43_2010-12.pdf",
        ),
        manufacturer_overrides: &[(
            TrcId::Rec709,
            "Rec709 chromaticities from Recommendation ITU-R BT.709-6 (06/2015), \
             http://www.itu.int/dms_pubrec/itu-r/rec/bt/R-REC-BT.709-6-201506-I!!PDF-E.pdf",
        )],
    },
    CatalogEntry {
        base_name: "Gray",
        white: D50_ILLUMINANT,
        primaries: None,
        manufacturer: None,
        manufacturer_overrides: &[],
    },
];

impl CatalogEntry {
    pub fn to_spec(&self) -> ProfileSpec {
        ProfileSpec {
            base_name: self.base_name.to_string(),
            white_point: self.white.chromaticity,
            primaries: self.primaries,
            media_white_point: self.white.media,
            media_black_point: Xyz::default(),
            manufacturer: self.manufacturer.map(str::to_string),
            manufacturer_overrides: self
                .manufacturer_overrides
                .iter()
                .map(|&(trc, text)| ManufacturerOverride {
                    trc,
                    text: text.to_string(),
                })
                .collect(),
            copyright: COPYRIGHT.to_string(),
        }
    }
}

/// The built-in catalog as owned specs
pub fn builtin() -> Vec<ProfileSpec> {
    BUILTIN.iter().map(CatalogEntry::to_spec).collect()
}

/// Parse a JSON array of specs, checking every entry
pub fn from_json_str(json: &str) -> std::result::Result<Vec<ProfileSpec>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load a JSON catalog file
pub fn load_json(path: &Path) -> Result<Vec<ProfileSpec>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let specs = from_json_str(&text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    for spec in &specs {
        spec.validate()?;
    }
    tracing::debug!(path = %path.display(), entries = specs.len(), "loaded catalog");
    Ok(specs)
}

/// Keep only the entries named in `names`; an empty filter keeps everything
pub fn select(specs: Vec<ProfileSpec>, names: &[String]) -> Vec<ProfileSpec> {
    if names.is_empty() {
        return specs;
    }
    specs
        .into_iter()
        .filter(|spec| names.iter().any(|n| n.eq_ignore_ascii_case(&spec.base_name)))
        .collect()
}
