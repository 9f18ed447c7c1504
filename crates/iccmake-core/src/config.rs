//! Batch configuration
//!
//! Read from a JSON file; every field is optional.
//!
//! ```json
//! {
//!   "output_dir": "profiles",
//!   "template_dir": "templates",
//!   "id_suffix": "-elle",
//!   "extension": ".icc",
//!   "parallel": true,
//!   "identity_profiles": false
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{Error, Result};
use crate::naming::NamingPolicy;
use crate::profile_spec::ProfileSpec;
use crate::template::TemplateStore;
use crate::v2::DEFAULT_CURVE_TABLE_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Directory the profiles are written to
    pub output_dir: PathBuf,
    /// Directory holding the v2 templates; synthesized templates are used when absent
    pub template_dir: Option<PathBuf>,
    pub id_suffix: String,
    pub extension: String,
    /// Replaces the copyright text of every catalog entry and identity profile
    pub copyright: Option<String>,
    /// Build profiles on the rayon thread pool
    pub parallel: bool,
    /// Entries in sampled `curv` tables
    pub curve_table_size: usize,
    /// JSON catalog to use instead of the built-in one
    pub catalog: Option<PathBuf>,
    /// Also write the Lab and XYZ identity profiles
    pub identity_profiles: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let naming = NamingPolicy::default();
        Self {
            output_dir: PathBuf::from("profiles"),
            template_dir: None,
            id_suffix: naming.id_suffix,
            extension: naming.extension,
            copyright: None,
            parallel: false,
            curve_table_size: DEFAULT_CURVE_TABLE_SIZE,
            catalog: None,
            identity_profiles: true,
        }
    }
}

impl SynthesisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn naming(&self) -> NamingPolicy {
        NamingPolicy {
            id_suffix: self.id_suffix.clone(),
            extension: self.extension.clone(),
        }
    }

    pub fn load_templates(&self) -> Result<TemplateStore> {
        match &self.template_dir {
            Some(dir) => TemplateStore::load_dir(dir),
            None => Ok(TemplateStore::synthesized(self.curve_table_size)),
        }
    }

    /// The configured catalog, with the copyright override applied
    pub fn load_catalog(&self) -> Result<Vec<ProfileSpec>> {
        let mut specs = match &self.catalog {
            Some(path) => catalog::load_json(path)?,
            None => catalog::builtin(),
        };
        if let Some(copyright) = &self.copyright {
            for spec in &mut specs {
                spec.copyright.clone_from(copyright);
            }
        }
        Ok(specs)
    }
}
