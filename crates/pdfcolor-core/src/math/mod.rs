//! Numeric helpers for the calibrated color models
//!
//! - 3x3 matrix operations for XYZ transforms
//! - Bradford chromatic adaptation
//! - sRGB and power transfer functions

pub mod chromatic_adaptation;
pub mod gamma;
pub mod matrix;

pub use chromatic_adaptation::{adapt_xyz, bradford_matrix};
pub use gamma::{gamma_decode, srgb_gamma_decode, srgb_gamma_encode};
pub use matrix::{Matrix3x3, XYZ_TO_LINEAR_SRGB};

use crate::color::{D65, WhitePoint, Xyz};

/// Build the XYZ (under `white`) → linear sRGB matrix
pub fn xyz_to_linear_srgb(white: &WhitePoint) -> Matrix3x3 {
    XYZ_TO_LINEAR_SRGB * bradford_matrix(white, &D65)
}

/// Apply a precomputed XYZ → linear sRGB matrix and encode for display
#[inline]
pub fn encode_srgb(matrix: &Matrix3x3, xyz: Xyz) -> [f64; 3] {
    let linear = matrix.multiply_vec(xyz.to_array());
    [
        srgb_gamma_encode(linear[0].clamp(0.0, 1.0)),
        srgb_gamma_encode(linear[1].clamp(0.0, 1.0)),
        srgb_gamma_encode(linear[2].clamp(0.0, 1.0)),
    ]
}
