//! Chromatic Adaptation
//!
//! Document white points are adapted to D65 before the sRGB matrix is
//! applied. Bradford is used throughout, as in ICC.1:2022 Annex E.

use crate::color::{WhitePoint, Xyz};
use crate::math::Matrix3x3;

/// Bradford matrix: XYZ → LMS (cone response)
const BRADFORD_XYZ_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.8951000, 0.2664000, -0.1614000],
    [-0.7502000, 1.7135000, 0.0367000],
    [0.0389000, -0.0685000, 1.0296000],
]);

/// Bradford matrix: LMS → XYZ
const BRADFORD_LMS_TO_XYZ: Matrix3x3 = Matrix3x3::new([
    [0.9869929, -0.1470543, 0.1599627],
    [0.4323053, 0.5183603, 0.0492912],
    [-0.0085287, 0.0400428, 0.9684867],
]);

/// Bradford adaptation matrix from `src` white to `dst` white
///
/// XYZ_dst = M × XYZ_src
pub fn bradford_matrix(src: &WhitePoint, dst: &WhitePoint) -> Matrix3x3 {
    let src_lms = BRADFORD_XYZ_TO_LMS.multiply_vec(src.xyz.to_array());
    let dst_lms = BRADFORD_XYZ_TO_LMS.multiply_vec(dst.xyz.to_array());

    let scale = Matrix3x3::diagonal(
        dst_lms[0] / src_lms[0],
        dst_lms[1] / src_lms[1],
        dst_lms[2] / src_lms[2],
    );

    BRADFORD_LMS_TO_XYZ * scale * BRADFORD_XYZ_TO_LMS
}

/// Adapt a single XYZ value between white points
pub fn adapt_xyz(xyz: Xyz, src: &WhitePoint, dst: &WhitePoint) -> Xyz {
    Xyz::from_array(bradford_matrix(src, dst).multiply_vec(xyz.to_array()))
}
