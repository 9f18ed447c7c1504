//! # profile-tests
//!
//! Cross-CMS checks for profiles written by iccmake.
//!
//! This crate provides:
//! - The whole built-in catalog, synthesized in memory
//! - Wrappers that read those profiles back through lcms2 and moxcms
//!
//! ## Reference Implementations
//!
//! - **lcms2**: `cmsCreateRGBProfile` is the reference for colorants and
//!   adaptation; its parser is the reference for structural validity
//! - **moxcms**: pure Rust parser and transform engine

pub mod reference;

use std::collections::BTreeMap;

use iccmake_core::icc::DateTimeNumber;
use iccmake_core::{MemorySink, NamingPolicy, ProfileSpec, Synthesizer, TemplateStore, catalog};

/// Tolerance for one s15Fixed16 quantum
pub const QUANTUM: f64 = 1.0 / 65536.0;

/// Every built-in profile, keyed by file name
pub fn synthesize_catalog() -> BTreeMap<String, Vec<u8>> {
    let sink = MemorySink::new();
    Synthesizer::new(
        catalog::builtin(),
        TemplateStore::synthesized(1024),
        NamingPolicy::default(),
    )
    .with_creation_date(DateTimeNumber::from_unix_seconds(1_451_606_400))
    .with_parallel(true)
    .run(&sink)
    .expect("catalog synthesis failed");
    sink.into_files()
}

/// Built-in RGB entries
pub fn rgb_specs() -> Vec<ProfileSpec> {
    catalog::builtin().into_iter().filter(|s| !s.is_gray()).collect()
}

/// Largest per-component difference
pub fn max_abs_diff(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(&b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
