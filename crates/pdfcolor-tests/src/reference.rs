//! Reference conversions
//!
//! lcms2 is the ICC reference; palette is the CIELAB reference.

use anyhow::{Result, anyhow};
use palette::{FromColor, Lab, Srgb};

/// ICC bytes of the lcms2 built-in sRGB profile
pub fn lcms2_srgb_profile() -> Result<Vec<u8>> {
    lcms2::Profile::new_srgb()
        .icc()
        .map_err(|e| anyhow!("lcms2 icc: {}", e))
}

/// Transform RGB8 pixels from `profile` to sRGB using lcms2
pub fn transform_lcms2_to_srgb(profile: &[u8], src_pixels: &[u8]) -> Result<Vec<u8>> {
    use lcms2::{Intent, PixelFormat, Profile, Transform};

    let src_profile = Profile::new_icc(profile).map_err(|e| anyhow!("lcms2 src profile: {}", e))?;
    let dst_profile = Profile::new_srgb();

    let transform = Transform::new(
        &src_profile,
        PixelFormat::RGB_8,
        &dst_profile,
        PixelFormat::RGB_8,
        Intent::Perceptual,
    )
    .map_err(|e| anyhow!("lcms2 transform: {}", e))?;

    let mut dst_pixels = vec![0u8; src_pixels.len()];
    transform.transform_pixels(src_pixels, &mut dst_pixels);

    Ok(dst_pixels)
}

/// D65 CIELAB → sRGB through palette, clamped for display
pub fn palette_lab_to_srgb(l: f32, a: f32, b: f32) -> [f32; 3] {
    let lab: Lab = Lab::new(l, a, b);
    let srgb: Srgb = Srgb::from_color(lab);
    [
        srgb.red.clamp(0.0, 1.0),
        srgb.green.clamp(0.0, 1.0),
        srgb.blue.clamp(0.0, 1.0),
    ]
}
