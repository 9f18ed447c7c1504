//! Reference implementation wrappers
//!
//! Provides unified interfaces to read synthesized profiles with the
//! reference CMS implementations.

use iccmake_core::{ProfileSpec, ToneCurve, TrcId};

/// Colorants as lcms2 sees them: PCS XYZ of pure red, green and blue
///
/// Relative colorimetric to the XYZ profile, so the result is the
/// D50-adapted colorant and no further adaptation is applied.
pub fn lcms2_colorants(profile: &lcms2::Profile) -> Result<[[f64; 3]; 3], String> {
    use lcms2::{Intent, PixelFormat, Profile, Transform};

    let xyz = Profile::new_xyz();
    let transform = Transform::<[f64; 3], [f64; 3]>::new(
        profile,
        PixelFormat::RGB_DBL,
        &xyz,
        PixelFormat::XYZ_DBL,
        Intent::RelativeColorimetric,
    )
    .map_err(|e| format!("lcms2 transform: {:?}", e))?;

    let src = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let mut dst = [[0.0f64; 3]; 3];
    transform.transform_pixels(&src, &mut dst);
    Ok(dst)
}

/// Parse ICC bytes with lcms2
pub fn lcms2_profile(data: &[u8]) -> Result<lcms2::Profile, String> {
    lcms2::Profile::new_icc(data).map_err(|e| format!("lcms2 parse: {:?}", e))
}

/// lcms2 tone curve equivalent to a preset
///
/// lcms2 numbers the ICC type 3 piecewise function as 4.
pub fn lcms2_tone_curve(trc: TrcId) -> Result<lcms2::ToneCurve, String> {
    match trc.tone_curve() {
        ToneCurve::Gamma(g) => Ok(lcms2::ToneCurve::new(g)),
        ToneCurve::Piecewise(p) => lcms2::ToneCurve::new_parametric(
            4,
            &[p.gamma, p.slope, p.intercept, p.linear_slope, p.breakpoint],
        )
        .map_err(|e| format!("lcms2 curve: {:?}", e)),
    }
}

/// The profile `cmsCreateRGBProfile` builds for the same colorimetry
pub fn lcms2_reference_profile(spec: &ProfileSpec, trc: TrcId) -> Result<lcms2::Profile, String> {
    use lcms2::{CIExyY, CIExyYTRIPLE};

    let primaries = spec
        .primaries
        .ok_or_else(|| format!("{} has no primaries", spec.base_name))?;
    let xyy = |c: iccmake_core::Chromaticity| CIExyY {
        x: c.x,
        y: c.y,
        Y: c.luminance,
    };
    let white = CIExyY {
        x: spec.white_point.x,
        y: spec.white_point.y,
        Y: 1.0,
    };
    let triple = CIExyYTRIPLE {
        Red: xyy(primaries.red),
        Green: xyy(primaries.green),
        Blue: xyy(primaries.blue),
    };

    let curve = lcms2_tone_curve(trc)?;
    lcms2::Profile::new_rgb(&white, &triple, &[&curve, &curve, &curve])
        .map_err(|e| format!("lcms2 new_rgb: {:?}", e))
}

/// Colorants as moxcms reads them from the colorant tags
pub fn moxcms_colorants(data: &[u8]) -> Result<[[f64; 3]; 3], String> {
    let profile = moxcms::ColorProfile::new_from_slice(data)
        .map_err(|e| format!("moxcms parse: {:?}", e))?;
    Ok([
        profile.red_colorant,
        profile.green_colorant,
        profile.blue_colorant,
    ]
    .map(|c| [c.x as f64, c.y as f64, c.z as f64]))
}

/// 8-bit RGB → RGB transform between two encoded profiles through moxcms
pub fn transform_moxcms(src_profile_data: &[u8], dst: &moxcms::ColorProfile, pixels: &[u8]) -> Result<Vec<u8>, String> {
    use moxcms::{ColorProfile, Layout, TransformOptions};

    let src_profile = ColorProfile::new_from_slice(src_profile_data)
        .map_err(|e| format!("moxcms src profile: {:?}", e))?;

    let transform = src_profile
        .create_transform_8bit(Layout::Rgb, dst, Layout::Rgb, TransformOptions::default())
        .map_err(|e| format!("moxcms transform: {:?}", e))?;

    let mut out = vec![0u8; pixels.len()];
    transform
        .transform(pixels, &mut out)
        .map_err(|e| format!("moxcms execute: {:?}", e))?;
    Ok(out)
}

/// 8-bit RGB → RGB transform through lcms2
pub fn transform_lcms2(src: &lcms2::Profile, dst: &lcms2::Profile, pixels: &[[u8; 3]]) -> Result<Vec<[u8; 3]>, String> {
    use lcms2::{Intent, PixelFormat, Transform};

    let transform = Transform::<[u8; 3], [u8; 3]>::new(
        src,
        PixelFormat::RGB_8,
        dst,
        PixelFormat::RGB_8,
        Intent::RelativeColorimetric,
    )
    .map_err(|e| format!("lcms2 transform: {:?}", e))?;

    let mut out = vec![[0u8; 3]; pixels.len()];
    transform.transform_pixels(pixels, &mut out);
    Ok(out)
}
