//! Parity tests against moxcms
//!
//! moxcms must read back the tags exactly as written and build working
//! transforms from them.

use iccmake_core::TrcId;
use profile_tests::reference::{moxcms_colorants, transform_moxcms};
use profile_tests::{QUANTUM, max_abs_diff, rgb_specs, synthesize_catalog};

#[test]
fn test_moxcms_parses_every_profile() {
    // Identity profiles are abstract; lcms2_parity covers them
    for (name, bytes) in synthesize_catalog().into_iter().filter(|(n, _)| !n.contains("Identity")) {
        let profile = moxcms::ColorProfile::new_from_slice(&bytes)
            .unwrap_or_else(|e| panic!("{}: {:?}", name, e));

        let expected = if name.starts_with("Gray") {
            moxcms::DataColorSpace::Gray
        } else {
            moxcms::DataColorSpace::Rgb
        };
        assert_eq!(profile.color_space, expected, "{}", name);
    }
}

#[test]
fn test_colorants_read_back() {
    let files = synthesize_catalog();

    for spec in rgb_specs() {
        let expected = spec
            .primaries
            .unwrap()
            .colorants(&spec.white_point)
            .unwrap()
            .map(|c| c.to_array());

        for version in ["V4", "trueV2"] {
            let name = format!("{}-elle-{}-g22.icc", spec.base_name, version);
            let read = moxcms_colorants(&files[&name]).unwrap();
            for channel in 0..3 {
                assert!(
                    max_abs_diff(read[channel], expected[channel]) <= QUANTUM,
                    "{} channel {}: {:?} vs {:?}",
                    name,
                    channel,
                    read[channel],
                    expected[channel]
                );
            }
        }
    }
}

#[test]
fn test_trc_encodings_seen_by_moxcms() {
    let files = synthesize_catalog();

    let gamma = moxcms::ColorProfile::new_from_slice(&files["ClayRGB-elle-V4-g22.icc"]).unwrap();
    match &gamma.red_trc {
        Some(moxcms::ToneReprCurve::Lut(lut)) => assert_eq!(lut.len(), 1),
        other => panic!("g22 should be a one-entry curv, got {:?}", other),
    }

    let para = moxcms::ColorProfile::new_from_slice(&files["ClayRGB-elle-V4-srgbtrc.icc"]).unwrap();
    match &para.red_trc {
        Some(moxcms::ToneReprCurve::Parametric(params)) => assert_eq!(params.len(), 5),
        other => panic!("srgbtrc should be para type 3, got {:?}", other),
    }

    let v2 = moxcms::ColorProfile::new_from_slice(&files["ClayRGB-elle-trueV2-srgbtrc.icc"]).unwrap();
    match &v2.red_trc {
        Some(moxcms::ToneReprCurve::Lut(lut)) => assert_eq!(lut.len(), 1024),
        other => panic!("v2 srgbtrc should be a sampled curv, got {:?}", other),
    }
}

#[test]
fn test_srgb_transform_is_near_identity() {
    let files = synthesize_catalog();
    let srgb = moxcms::ColorProfile::new_srgb();

    let pixels: Vec<u8> = (0..=255u8).step_by(3).flat_map(|v| [v, 255 - v, v / 2]).collect();
    for version in ["V4", "trueV2"] {
        let name = format!("sRGB-elle-{}-{}.icc", version, TrcId::Srgb);
        let out = transform_moxcms(&files[&name], &srgb, &pixels).unwrap();
        for (a, b) in pixels.iter().zip(&out) {
            assert!((*a as i32 - *b as i32).abs() <= 2, "{}: {} -> {}", name, a, b);
        }
    }
}
