//! Lab parity against palette
//!
//! A Lab space under D65 must agree with palette's CIELAB → sRGB.

use pdfcolor_core::ColorSpaceResolver;
use pdfcolor_tests::fixtures::{d65_white, lab};
use pdfcolor_tests::reference::palette_lab_to_srgb;
use pdfcolor_tests::samples::random_components;

const CHANNEL_TOLERANCE: f32 = 0.005;

#[test]
fn test_lab_d65_parity() -> anyhow::Result<()> {
    let resolver = ColorSpaceResolver::new();
    let model = resolver.resolve(&lab(d65_white(), None), None)?.unwrap();

    let samples = random_components(42, 2000, &[(0.0, 100.0), (-100.0, 100.0), (-100.0, 100.0)]);
    for lab in samples {
        let ours = model.to_rgb(&lab)?;
        let [r, g, b] = palette_lab_to_srgb(lab[0], lab[1], lab[2]);
        assert!(
            (ours.r - r).abs() < CHANNEL_TOLERANCE
                && (ours.g - g).abs() < CHANNEL_TOLERANCE
                && (ours.b - b).abs() < CHANNEL_TOLERANCE,
            "Lab {:?}: ours {:?}, palette [{}, {}, {}]",
            lab,
            ours,
            r,
            g,
            b
        );
    }
    Ok(())
}

#[test]
fn test_lab_neutral_axis() -> anyhow::Result<()> {
    let resolver = ColorSpaceResolver::new();
    let model = resolver.resolve(&lab(d65_white(), None), None)?.unwrap();

    for l in [0.0f32, 10.0, 25.0, 50.0, 75.0, 100.0] {
        let ours = model.to_rgb(&[l, 0.0, 0.0])?;
        let [r, _, _] = palette_lab_to_srgb(l, 0.0, 0.0);
        assert!((ours.r - ours.g).abs() < 1e-3 && (ours.g - ours.b).abs() < 1e-3);
        assert!((ours.r - r).abs() < CHANNEL_TOLERANCE, "L {}: {} vs {}", l, ours.r, r);
    }
    Ok(())
}

#[test]
fn test_lab_range_clips_before_conversion() -> anyhow::Result<()> {
    let resolver = ColorSpaceResolver::new();
    let model = resolver
        .resolve(&lab(d65_white(), Some([-50.0, 50.0, -50.0, 50.0])), None)?
        .unwrap();
    assert_eq!(model.component_range(1), (-50.0, 50.0));

    let clipped = model.to_rgb(&[60.0, 80.0, -80.0])?;
    let [r, g, b] = palette_lab_to_srgb(60.0, 50.0, -50.0);
    assert!((clipped.r - r).abs() < CHANNEL_TOLERANCE);
    assert!((clipped.g - g).abs() < CHANNEL_TOLERANCE);
    assert!((clipped.b - b).abs() < CHANNEL_TOLERANCE);
    Ok(())
}
