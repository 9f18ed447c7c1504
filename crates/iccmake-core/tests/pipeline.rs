//! End-to-end properties of the synthesis pipeline
//!
//! Every test runs the built-in catalog through the same code path the CLI
//! uses and checks the encoded bytes, re-parsed with the crate's decoder.

use std::collections::HashSet;

use iccmake_core::icc::{ColorSpace, DateTimeNumber, ProfileClass, S15Fixed16, TagData, TagSignature};
use iccmake_core::color::ICC_D50;
use iccmake_core::{
    IccProfile, MemorySink, NamingPolicy, ProfileGeneration, ProfileSpec, Synthesizer, TemplateStore,
    TrcId, Xyz, catalog,
};

const QUANTUM: f64 = S15Fixed16::QUANTUM;

fn synthesizer() -> Synthesizer {
    Synthesizer::new(
        catalog::builtin(),
        TemplateStore::synthesized(1024),
        NamingPolicy::default(),
    )
    .with_creation_date(DateTimeNumber::from_unix_seconds(1_451_606_400))
}

fn run_all() -> MemorySink {
    let sink = MemorySink::new();
    synthesizer().run(&sink).expect("batch failed");
    sink
}

fn parse(sink: &MemorySink, name: &str) -> IccProfile {
    let bytes = sink.get(name).unwrap_or_else(|| panic!("{} was not written", name));
    IccProfile::parse(&bytes).unwrap_or_else(|e| panic!("{} does not parse: {}", name, e))
}

fn spec(name: &str) -> ProfileSpec {
    catalog::builtin()
        .into_iter()
        .find(|s| s.base_name == name)
        .unwrap()
}

#[test]
fn test_every_profile_is_written_once() {
    let sink = run_all();
    let names = sink.file_names();
    assert_eq!(names.len(), 10 * 6 * 2 + 3);

    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());

    assert!(names.contains(&"Rec709-elle-V4-rec709.icc".to_string()));
    assert!(names.contains(&"Rec709-elle-trueV2-rec709.icc".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("sRGB") && n.contains("rec709")));
}

#[test]
fn test_v2_colorants_match_v4_bytes() {
    let sink = run_all();
    let naming = NamingPolicy::default();
    for spec in catalog::builtin().iter().filter(|s| !s.is_gray()) {
        for trc in TrcId::ALL {
            let v4 = parse(&sink, &naming.file_name(&spec.base_name, trc, ProfileGeneration::V4));
            let v2 = parse(&sink, &naming.file_name(&spec.base_name, trc, ProfileGeneration::TrueV2));
            for sig in TagSignature::COLORANTS {
                assert_eq!(v2.tag_bytes(sig), v4.tag_bytes(sig), "{} {} {}", spec.base_name, trc, sig);
            }
        }
    }
}

#[test]
fn test_v2_trc_source_depends_on_family() {
    let sink = run_all();
    let templates = TemplateStore::synthesized(1024);

    let v4 = parse(&sink, "LargeRGB-elle-V4-g18.icc");
    let v2 = parse(&sink, "LargeRGB-elle-trueV2-g18.icc");
    for sig in TagSignature::RGB_TRCS {
        assert_eq!(v2.tag_bytes(sig), v4.tag_bytes(sig));
    }

    for trc in [TrcId::Srgb, TrcId::Rec709, TrcId::LabL] {
        let name = NamingPolicy::default().file_name("LargeRGB", trc, ProfileGeneration::TrueV2);
        let v2 = parse(&sink, &name);
        let template = templates.get(trc.family()).unwrap();
        for sig in TagSignature::RGB_TRCS {
            assert_eq!(v2.tag_bytes(sig), template.tag_bytes(sig), "{} {}", name, sig);
        }
    }
}

#[test]
fn test_gray_pair() {
    let sink = run_all();
    let v4 = parse(&sink, "Gray-elle-V4-g22.icc");
    let v2 = parse(&sink, "Gray-elle-trueV2-g22.icc");

    assert!(v4.header.version.is_v4());
    assert!(v2.header.version.is_v2());
    assert!(!v4.has_tag(TagSignature::MEDIA_BLACK));
    assert!(v2.has_tag(TagSignature::MEDIA_BLACK));
    assert_eq!(v4.description().as_deref(), Some("Gray-elle-V4-g22.icc"));
    assert_eq!(v2.description().as_deref(), Some("Gray-elle-trueV2-g22.icc"));
}

#[test]
fn test_red_colorant_round_trip() {
    let sink = run_all();
    for name in ["sRGB", "ClayRGB", "Rec2020", "ACEScg", "CIERGB", "LargeRGB"] {
        let spec = spec(name);
        let expected = spec.primaries.unwrap().colorants(&spec.white_point).unwrap();
        let profile = parse(&sink, &format!("{}-elle-V4-g10.icc", name));
        for (sig, want) in TagSignature::COLORANTS.into_iter().zip(expected) {
            let got = profile.read_xyz(sig).unwrap().unwrap();
            assert!(got.approx_eq(&want, QUANTUM), "{} {}: {:?} vs {:?}", name, sig, got, want);
        }
    }
}

#[test]
fn test_colorants_sum_to_d50() {
    let sink = run_all();
    for spec in catalog::builtin().iter().filter(|s| !s.is_gray()) {
        let profile = parse(&sink, &format!("{}-elle-V4-srgbtrc.icc", spec.base_name));
        let sum = TagSignature::COLORANTS
            .into_iter()
            .map(|sig| profile.read_xyz(sig).unwrap().unwrap())
            .fold(Xyz::default(), |acc, c| acc + c);
        assert!(sum.approx_eq(&ICC_D50, 3.0 * QUANTUM), "{}: {:?}", spec.base_name, sum);
    }
}

#[test]
fn test_rec709_carries_its_own_manufacturer() {
    let sink = run_all();
    let rec709 = parse(&sink, "Rec709-elle-trueV2-rec709.icc");
    let srgb = parse(&sink, "sRGB-elle-trueV2-srgbtrc.icc");
    assert!(rec709.manufacturer().unwrap().starts_with("Rec709 chromaticities"));
    assert!(srgb.manufacturer().unwrap().starts_with("sRGB chromaticities"));
}

#[test]
fn test_v4_trc_evaluates_like_preset() {
    let sink = run_all();
    for trc in TrcId::ALL {
        let profile = parse(&sink, &format!("Rec2020-elle-V4-{}.icc", trc));
        let tag: TagData = profile.tag(TagSignature::RED_TRC).unwrap().unwrap();
        let curve = trc.tone_curve();
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            let got = tag.eval_curve(x).unwrap();
            assert!((got - curve.eval(x)).abs() < 1e-3, "{} at {}: {}", trc, x, got);
        }
    }
}

#[test]
fn test_identity_profiles_are_abstract() {
    let sink = run_all();
    let expected = [
        ("Lab-D50-Identity-elle-V2.icc", ColorSpace::Lab, 2),
        ("Lab-D50-Identity-elle-V4.icc", ColorSpace::Lab, 4),
        ("XYZ-D50-Identity-elle-V4.icc", ColorSpace::Xyz, 4),
    ];
    for (name, pcs, major) in expected {
        let profile = parse(&sink, name);
        assert_eq!(profile.header.device_class, ProfileClass::Abstract, "{}", name);
        assert_eq!(profile.header.color_space, pcs, "{}", name);
        assert_eq!(profile.header.pcs, pcs, "{}", name);
        assert_eq!(profile.header.version.major, major, "{}", name);
        assert_eq!(profile.description().as_deref(), Some(name));
        assert_eq!(profile.copyright().as_deref(), Some(catalog::COPYRIGHT));
        assert!(profile.has_tag(TagSignature::A_TO_B0) && profile.has_tag(TagSignature::B_TO_A0));
    }

    let identities: Vec<_> = sink.file_names().into_iter().filter(|n| n.contains("Identity")).collect();
    assert_eq!(identities.len(), expected.len());
}
