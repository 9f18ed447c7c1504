//! ICC Container
//!
//! Native encoding and decoding of the ICC profile format (ICC.1:2022 and
//! the v2 ICC.1:2001-04 text types).
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may be shared between tags)
//!
//! # Example
//!
//! ```ignore
//! use iccmake_core::icc::{IccProfile, TagSignature};
//!
//! let profile = IccProfile::parse(&bytes)?;
//! let red = profile.read_xyz(TagSignature::RED_COLORANT)?;
//! ```

pub mod header;
pub mod tags;

mod error;
mod profile;
mod types;

pub use error::IccError;
pub use header::{ColorSpace, IccHeader, ProfileClass, ProfileVersion, RenderingIntent};
pub use profile::IccProfile;
pub use tags::{CurveData, ParametricCurveData, TagData};
pub use types::{DateTimeNumber, S15Fixed16, TagSignature, TypeSignature, U8Fixed8, XyzNumber};
