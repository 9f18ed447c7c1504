//! Error types for iccmake

use std::path::PathBuf;

use thiserror::Error;

use crate::icc::{IccError, TagSignature};
use crate::trc::{TemplateFamily, TrcId};

/// Result type for iccmake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synthesizing profiles
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Chromaticity with y = 0 cannot be converted to XYZ
    #[error("Chromaticity ({x}, {y}) has y = 0")]
    DivisionByZero { x: f64, y: f64 },

    #[error("Unknown tone curve id: {0:?}")]
    UnknownCurveId(String),

    /// Primaries or white point do not yield an invertible primary matrix
    #[error("Invalid primaries: {0}")]
    InvalidPrimaries(String),

    #[error("No v2 template for the {family:?} family ({})", .family.file_name())]
    TemplateNotFound { family: TemplateFamily },

    /// A tag the pipeline needs is absent or has the wrong type
    #[error("Required tag '{tag}' missing from {source_profile}")]
    TagReadFailure {
        tag: TagSignature,
        source_profile: &'static str,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed ICC bytes
    #[error("ICC error: {0}")]
    Icc(#[from] IccError),

    /// A template file that could not be decoded
    #[error("Invalid template {}: {source}", .path.display())]
    InvalidTemplate {
        path: PathBuf,
        #[source]
        source: IccError,
    },

    /// Configuration or catalog file that could not be decoded
    #[error("Invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog entry that breaks a data-model invariant
    #[error("Invalid catalog entry: {0}")]
    InvalidCatalogEntry(String),

    /// Two catalog entries would write the same file
    #[error("Duplicate output file name: {0}")]
    DuplicateFileName(String),

    /// Failure while building one catalog entry
    #[error("{base_name} ({trc}): {source}")]
    Entry {
        base_name: String,
        trc: TrcId,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the catalog entry being built
    pub fn for_entry(self, base_name: &str, trc: TrcId) -> Self {
        Error::Entry {
            base_name: base_name.to_string(),
            trc,
            source: Box::new(self),
        }
    }
}
