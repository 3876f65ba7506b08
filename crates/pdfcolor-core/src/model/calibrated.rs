//! CIE-based calibrated spaces: CalGray, CalRGB and Lab
//!
//! All three map their components to XYZ under the document white point,
//! adapt to D65 with Bradford, then encode as sRGB. The combined
//! adaptation + XYZ→linear sRGB matrix is computed once per space.

use crate::color::{Lab, Rgb, WhitePoint, Xyz};
use crate::math::{Matrix3x3, encode_srgb, gamma_decode, xyz_to_linear_srgb};
use crate::object::{PdfObject, number_array};
use crate::{Error, Result};

fn white_point<O: PdfObject>(dict: &O, family: &str) -> Result<WhitePoint> {
    let values = dict
        .get("WhitePoint")
        .ok_or_else(|| Error::parse(format!("{} dictionary has no WhitePoint", family)))?;
    let xyz: [f64; 3] = number_array(&values).ok_or_else(|| {
        Error::parse(format!("{} WhitePoint must be three numbers", family))
    })?;
    WhitePoint::from_document(xyz)
}

/// `/BlackPoint` is validated when present but does not affect conversion
fn check_black_point<O: PdfObject>(dict: &O, family: &str) -> Result<()> {
    match dict.get("BlackPoint") {
        Some(bp) if number_array::<_, 3>(&bp).is_none() => Err(Error::parse(format!(
            "{} BlackPoint must be three numbers",
            family
        ))),
        _ => Ok(()),
    }
}

/// Single-component calibrated gray
#[derive(Debug, Clone)]
pub struct CalGray {
    white: WhitePoint,
    gamma: f64,
    to_srgb: Matrix3x3,
}

impl CalGray {
    pub fn new(white: WhitePoint, gamma: f64) -> Self {
        Self {
            white,
            gamma,
            to_srgb: xyz_to_linear_srgb(&white),
        }
    }

    /// Parse a `/CalGray` dictionary
    pub fn from_dict<O: PdfObject>(dict: &O) -> Result<Self> {
        let white = white_point(dict, "CalGray")?;
        check_black_point(dict, "CalGray")?;
        let gamma = match dict.get("Gamma") {
            Some(g) => g
                .as_real()
                .filter(|g| *g > 0.0)
                .ok_or_else(|| Error::parse("CalGray Gamma must be a positive number"))?,
            None => 1.0,
        };
        Ok(Self::new(white, gamma))
    }

    pub fn white_point(&self) -> &WhitePoint {
        &self.white
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub(crate) fn to_rgb(&self, a: f32) -> Rgb {
        let ag = gamma_decode(f64::from(a).clamp(0.0, 1.0), self.gamma);
        Rgb::from_f64_clamped(encode_srgb(&self.to_srgb, self.white.xyz.scale(ag)))
    }
}

/// Three-component calibrated RGB
#[derive(Debug, Clone)]
pub struct CalRgb {
    white: WhitePoint,
    gamma: [f64; 3],
    matrix: Matrix3x3,
    to_srgb: Matrix3x3,
}

impl CalRgb {
    /// `matrix` maps gamma-decoded ABC to XYZ
    pub fn new(white: WhitePoint, gamma: [f64; 3], matrix: Matrix3x3) -> Self {
        Self {
            white,
            gamma,
            matrix,
            to_srgb: xyz_to_linear_srgb(&white),
        }
    }

    /// Parse a `/CalRGB` dictionary
    pub fn from_dict<O: PdfObject>(dict: &O) -> Result<Self> {
        let white = white_point(dict, "CalRGB")?;
        check_black_point(dict, "CalRGB")?;

        let gamma = match dict.get("Gamma") {
            Some(g) => number_array::<_, 3>(&g)
                .filter(|g| g.iter().all(|v| *v > 0.0))
                .ok_or_else(|| Error::parse("CalRGB Gamma must be three positive numbers"))?,
            None => [1.0; 3],
        };
        let matrix = match dict.get("Matrix") {
            Some(m) => number_array::<_, 9>(&m)
                .map(Matrix3x3::from_pdf_columns)
                .ok_or_else(|| Error::parse("CalRGB Matrix must be nine numbers"))?,
            None => Matrix3x3::identity(),
        };

        Ok(Self::new(white, gamma, matrix))
    }

    pub fn white_point(&self) -> &WhitePoint {
        &self.white
    }

    pub fn gamma(&self) -> [f64; 3] {
        self.gamma
    }

    pub fn matrix(&self) -> &Matrix3x3 {
        &self.matrix
    }

    pub(crate) fn to_rgb(&self, abc: [f32; 3]) -> Rgb {
        let decoded = [
            gamma_decode(f64::from(abc[0]).clamp(0.0, 1.0), self.gamma[0]),
            gamma_decode(f64::from(abc[1]).clamp(0.0, 1.0), self.gamma[1]),
            gamma_decode(f64::from(abc[2]).clamp(0.0, 1.0), self.gamma[2]),
        ];
        let xyz = Xyz::from_array(self.matrix.multiply_vec(decoded));
        Rgb::from_f64_clamped(encode_srgb(&self.to_srgb, xyz))
    }
}

/// CIE L*a*b* with a document white point
#[derive(Debug, Clone)]
pub struct LabSpace {
    white: WhitePoint,
    /// `[a_min, a_max, b_min, b_max]`
    range: [f64; 4],
    to_srgb: Matrix3x3,
}

impl LabSpace {
    pub const DEFAULT_RANGE: [f64; 4] = [-100.0, 100.0, -100.0, 100.0];

    pub fn new(white: WhitePoint, range: [f64; 4]) -> Self {
        Self {
            white,
            range,
            to_srgb: xyz_to_linear_srgb(&white),
        }
    }

    /// Parse a `/Lab` dictionary
    pub fn from_dict<O: PdfObject>(dict: &O) -> Result<Self> {
        let white = white_point(dict, "Lab")?;
        check_black_point(dict, "Lab")?;
        let range = match dict.get("Range") {
            Some(r) => number_array::<_, 4>(&r)
                .filter(|r| r[0] <= r[1] && r[2] <= r[3])
                .ok_or_else(|| Error::parse("Lab Range must be [amin amax bmin bmax]"))?,
            None => Self::DEFAULT_RANGE,
        };
        Ok(Self::new(white, range))
    }

    pub fn white_point(&self) -> &WhitePoint {
        &self.white
    }

    pub fn range(&self) -> [f64; 4] {
        self.range
    }

    /// L* spans [0, 100]; a* and b* span the dictionary `/Range`
    pub fn component_range(&self, index: usize) -> (f32, f32) {
        match index {
            0 => (0.0, 100.0),
            1 => (self.range[0] as f32, self.range[1] as f32),
            _ => (self.range[2] as f32, self.range[3] as f32),
        }
    }

    pub(crate) fn to_rgb(&self, lab: [f32; 3]) -> Rgb {
        let lab = Lab::new(
            f64::from(lab[0]).clamp(0.0, 100.0),
            f64::from(lab[1]).clamp(self.range[0], self.range[1]),
            f64::from(lab[2]).clamp(self.range[2], self.range[3]),
        );
        let xyz = lab.to_xyz_with_white(&self.white);
        Rgb::from_f64_clamped(encode_srgb(&self.to_srgb, xyz))
    }
}
