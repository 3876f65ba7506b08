//! Display RGB
//!
//! The output of every color model: gamma-encoded sRGB, each channel
//! clamped to [0, 1].

use bytemuck::{Pod, Zeroable};

/// sRGB color in floating point (0.0-1.0 range)
///
/// `#[repr(C)]` and `Pod` so a converted row of colors can be handed to a
/// painting backend as a flat `&[f32]` without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gray level replicated on all channels
    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    #[inline]
    pub const fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from f64 channels, clamping to [0, 1]
    ///
    /// NaN channels become 0.
    #[inline]
    pub fn from_f64_clamped(rgb: [f64; 3]) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) as f32 };
        Self::new(c(rgb[0]), c(rgb[1]), c(rgb[2]))
    }

    /// Clamp all components to [0, 1]
    #[inline]
    pub fn clamp(&self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(c(self.r), c(self.g), c(self.b))
    }

    /// Convert to 8-bit values (0-255)
    #[inline]
    pub fn to_u8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    #[inline]
    pub fn is_in_gamut(&self) -> bool {
        (0.0..=1.0).contains(&self.r)
            && (0.0..=1.0).contains(&self.g)
            && (0.0..=1.0).contains(&self.b)
    }

    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl From<[f32; 3]> for Rgb {
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

/// View a row of colors as interleaved channels
pub fn as_channels(colors: &[Rgb]) -> &[f32] {
    bytemuck::cast_slice(colors)
}
