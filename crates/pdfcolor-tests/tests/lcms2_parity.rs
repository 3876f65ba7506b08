//! Parity tests against lcms2
//!
//! ICCBased spaces are fed the ICC bytes of lcms2's own sRGB profile and
//! compared against an lcms2 transform of the same pixels.

use pdfcolor_core::{ColorSpaceResolver, DeviceKind, Object, ResolveOptions, device_space};
use pdfcolor_tests::accuracy::compare_rgb_buffers;
use pdfcolor_tests::fixtures::{cal_rgb_srgb_primaries, icc_based};
use pdfcolor_tests::reference::{lcms2_srgb_profile, transform_lcms2_to_srgb};
use pdfcolor_tests::samples::{random_rgb8, rgb8_cube_lattice};
use std::sync::Arc;

/// Maximum acceptable deltaE for parity tests
const PARITY_DELTA_E_THRESHOLD: f64 = 1.0;

fn convert_rgb8(model: &pdfcolor_core::ColorModel, pixels: &[u8]) -> anyhow::Result<Vec<u8>> {
    let samples: Vec<f32> = pixels.iter().map(|&v| v as f32 / 255.0).collect();
    let mut out = vec![0u8; pixels.len()];
    model.convert_row_rgb8(&samples, &mut out)?;
    Ok(out)
}

#[test]
fn test_icc_srgb_parity() -> anyhow::Result<()> {
    let profile = lcms2_srgb_profile()?;
    let resolver = ColorSpaceResolver::new();
    let model = resolver
        .resolve(&icc_based(profile.clone(), 3, None), None)?
        .unwrap();
    assert_eq!(model.arity(), 3);

    for (name, input) in [
        ("lattice", rgb8_cube_lattice()),
        ("random 42", random_rgb8(42, 1024)),
        ("random 12345", random_rgb8(12345, 1024)),
    ] {
        let ours = convert_rgb8(&model, &input)?;
        let reference = transform_lcms2_to_srgb(&profile, &input)?;
        let stats = compare_rgb_buffers(&reference, &ours);
        assert!(
            stats.max < PARITY_DELTA_E_THRESHOLD,
            "{}: deltaE mean={:.4}, max={:.4} (threshold={:.1})",
            name,
            stats.mean,
            stats.max,
            PARITY_DELTA_E_THRESHOLD
        );
    }
    Ok(())
}

#[test]
fn test_cal_rgb_matches_icc_srgb() -> anyhow::Result<()> {
    // A CalRGB space with sRGB primaries and gamma 2.2 lands close to sRGB;
    // only the transfer curve differs, so compare loosely.
    let profile = lcms2_srgb_profile()?;
    let resolver = ColorSpaceResolver::new();
    let cal = resolver.resolve(&cal_rgb_srgb_primaries(2.2), None)?.unwrap();
    let input = rgb8_cube_lattice();

    let ours = convert_rgb8(&cal, &input)?;
    let reference = transform_lcms2_to_srgb(&profile, &input)?;
    let stats = compare_rgb_buffers(&reference, &ours);
    assert!(stats.max < 5.0, "deltaE max={:.4}", stats.max);
    Ok(())
}

#[test]
fn test_icc_disabled_falls_back_to_alternate() -> anyhow::Result<()> {
    let options = ResolveOptions {
        use_icc_profiles: false,
        ..Default::default()
    };
    let resolver = ColorSpaceResolver::with_options(options);
    let alternate = cal_rgb_srgb_primaries(1.0);
    let desc = icc_based(lcms2_srgb_profile()?, 3, Some(alternate.clone()));

    let model = resolver.resolve(&desc, None)?.unwrap();
    let direct = resolver.resolve(&alternate, None)?.unwrap();
    assert!(Arc::ptr_eq(&model, &direct));
    Ok(())
}

#[test]
fn test_icc_disabled_without_alternate_uses_device_space() -> anyhow::Result<()> {
    let options = ResolveOptions {
        use_icc_profiles: false,
        ..Default::default()
    };
    let resolver = ColorSpaceResolver::with_options(options);
    let desc = icc_based(lcms2_srgb_profile()?, 3, None);
    let model = resolver.resolve(&desc, None)?.unwrap();
    assert!(Arc::ptr_eq(&model, &device_space(DeviceKind::Rgb)));
    Ok(())
}

#[test]
fn test_icc_channel_mismatch() -> anyhow::Result<()> {
    let resolver = ColorSpaceResolver::new();
    let desc = icc_based(lcms2_srgb_profile()?, 1, None);
    let err = resolver.resolve(&desc, None).unwrap_err();
    assert!(err.is_parse_error(), "{}", err);
    Ok(())
}

#[test]
fn test_icc_not_a_stream() {
    let resolver = ColorSpaceResolver::new();
    let desc = Object::array(vec![Object::name("ICCBased"), Object::int(3)]);
    assert!(resolver.resolve(&desc, None).unwrap_err().is_parse_error());
}
