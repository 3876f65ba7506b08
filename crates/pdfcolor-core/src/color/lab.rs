//! CIELAB (L*a*b*) Color Space
//!
//! - L*: Lightness (0 = black, 100 = white)
//! - a*: Green-red axis
//! - b*: Blue-yellow axis

use crate::color::{WhitePoint, Xyz};

/// CIELAB color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness (0 to 100)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert from XYZ relative to a white point
    pub fn from_xyz_with_white(xyz: Xyz, white: &WhitePoint) -> Self {
        let fx = lab_f(xyz.x / white.xyz.x);
        let fy = lab_f(xyz.y / white.xyz.y);
        let fz = lab_f(xyz.z / white.xyz.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert to XYZ relative to a white point
    pub fn to_xyz_with_white(&self, white: &WhitePoint) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = self.a / 500.0 + fy;
        let fz = fy - self.b / 200.0;

        Xyz::new(
            lab_f_inv(fx) * white.xyz.x,
            lab_f_inv(fy) * white.xyz.y,
            lab_f_inv(fz) * white.xyz.z,
        )
    }

    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.l - other.l).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }
}

/// Lab forward function: f(t)
#[inline]
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    const DELTA_CUBED: f64 = DELTA * DELTA * DELTA;

    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Lab inverse function: f⁻¹(t)
#[inline]
fn lab_f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;

    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{D50, D65};

    #[test]
    fn test_white_maps_to_white_point() {
        let xyz = Lab::new(100.0, 0.0, 0.0).to_xyz_with_white(&D65);
        assert!(xyz.approx_eq(&D65.xyz, 1e-9));
    }

    #[test]
    fn test_black_is_zero() {
        let xyz = Lab::new(0.0, 0.0, 0.0).to_xyz_with_white(&D50);
        assert!(xyz.approx_eq(&Xyz::default(), 1e-9));
    }

    #[test]
    fn test_roundtrip_dark_and_light() {
        for original in [Lab::new(50.0, 25.0, -30.0), Lab::new(3.0, -2.0, 1.0)] {
            let xyz = original.to_xyz_with_white(&D50);
            let back = Lab::from_xyz_with_white(xyz, &D50);
            assert!(original.approx_eq(&back, 1e-9), "{:?} vs {:?}", original, back);
        }
    }
}
