//! White points
//!
//! PDF calibrated spaces carry their own `/WhitePoint` entry. The ICC D50
//! and sRGB D65 illuminants are provided as constants for adaptation.

use crate::color::Xyz;
use crate::{Error, Result};

/// A white point definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    /// CIE XYZ coordinates (Y normalized to 1.0 for document white points)
    pub xyz: Xyz,
}

impl WhitePoint {
    /// Create a new white point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            xyz: Xyz::new(x, y, z),
        }
    }

    /// Validate a document-supplied white point
    ///
    /// All three values must be positive and finite. The result is scaled so
    /// that Y is 1.0.
    pub fn from_document(values: [f64; 3]) -> Result<Self> {
        let [x, y, z] = values;
        if !(x > 0.0 && y > 0.0 && z > 0.0) || !values.iter().all(|v| v.is_finite()) {
            return Err(Error::parse(format!(
                "WhitePoint must be positive, got [{} {} {}]",
                x, y, z
            )));
        }
        Ok(Self::new(x / y, 1.0, z / y))
    }

    /// Get the chromaticity coordinates (x, y)
    pub fn chromaticity(&self) -> (f64, f64) {
        let sum = self.xyz.x + self.xyz.y + self.xyz.z;
        if sum > 0.0 {
            (self.xyz.x / sum, self.xyz.y / sum)
        } else {
            (0.0, 0.0)
        }
    }
}

/// CIE Standard Illuminant D50, the ICC PCS white
pub const D50: WhitePoint = WhitePoint::new(0.9642, 1.0, 0.8251);

/// CIE Standard Illuminant D65, the sRGB white
pub const D65: WhitePoint = WhitePoint::new(0.95047, 1.0, 1.08883);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d65_chromaticity() {
        let (x, y) = D65.chromaticity();
        assert!((x - 0.3127).abs() < 0.001);
        assert!((y - 0.3290).abs() < 0.001);
    }

    #[test]
    fn test_from_document_normalizes_y() {
        let wp = WhitePoint::from_document([0.9505 * 2.0, 2.0, 1.089 * 2.0]).unwrap();
        assert!((wp.xyz.y - 1.0).abs() < 1e-12);
        assert!((wp.xyz.x - 0.9505).abs() < 1e-12);
    }

    #[test]
    fn test_from_document_rejects_non_positive() {
        assert!(WhitePoint::from_document([0.0, 1.0, 1.0]).is_err());
        assert!(WhitePoint::from_document([0.95, -1.0, 1.0]).is_err());
        assert!(WhitePoint::from_document([f64::NAN, 1.0, 1.0]).is_err());
        assert!(WhitePoint::from_document([0.95, f64::INFINITY, 1.0]).is_err());
    }
}
