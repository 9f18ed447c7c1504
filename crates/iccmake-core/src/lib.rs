//! # iccmake - ICC profile synthesis
//!
//! Builds matrix/TRC ICC profiles for a catalog of well-known RGB and gray
//! color spaces, one pair per tone curve: a v4 profile and a legacy v2
//! profile derived from it.
//!
//! ## Pipeline
//!
//! 1. [`ProfileSpec`] describes one color space: white, primaries, the
//!    published media white and black, and descriptive text
//! 2. [`V4ProfileBuilder`] computes D50-adapted colorants and the tone
//!    curve tags and assembles the v4 profile
//! 3. [`V2ProfileDeriver`] copies colorant (and, for pure gammas, curve)
//!    tags onto the v2 template of the curve's family
//! 4. [`NamingPolicy`] names both files; [`Synthesizer`] runs the catalog
//!    through a [`ProfileSink`]
//! 5. The abstract Lab and XYZ [`IdentityProfile`]s are written last
//!
//! ## Quick Start
//!
//! ```no_run
//! use iccmake_core::{MemorySink, NamingPolicy, Synthesizer, TemplateStore, catalog};
//!
//! let synthesizer = Synthesizer::new(
//!     catalog::builtin(),
//!     TemplateStore::synthesized(4096),
//!     NamingPolicy::default(),
//! );
//! let sink = MemorySink::new();
//! let report = synthesizer.run(&sink)?;
//! assert!(sink.get("Rec709-elle-V4-rec709.icc").is_some());
//! # Ok::<(), iccmake_core::Error>(())
//! ```

pub mod batch;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod icc;
pub mod identity;
pub mod math;
pub mod naming;
pub mod profile_spec;
pub mod template;
pub mod trc;
pub mod v2;
pub mod v4;

pub use batch::{BatchReport, DirectorySink, Job, MemorySink, ProfilePair, ProfileSink, Synthesizer};
pub use color::{Chromaticity, PrimarySet, WhitePoint, Xyz};
pub use config::SynthesisConfig;
pub use error::{Error, Result};
pub use icc::{IccError, IccProfile};
pub use identity::IdentityProfile;
pub use math::ToneCurve;
pub use naming::{NamingPolicy, ProfileGeneration};
pub use profile_spec::{ManufacturerOverride, ProfileSpec};
pub use template::TemplateStore;
pub use trc::{TemplateFamily, TrcId, tone_curve};
pub use v2::V2ProfileDeriver;
pub use v4::V4ProfileBuilder;

/// Version of iccmake
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
