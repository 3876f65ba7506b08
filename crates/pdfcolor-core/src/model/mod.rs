//! Resolved color models
//!
//! A [`ColorModel`] is the executable form of a color space: it knows how
//! many components it takes and how to turn them into display RGB. Models
//! are immutable and shared behind `Arc`; nested models (Indexed base,
//! Separation alternate, Pattern underlying space) hold their own `Arc` to
//! the base, so a base referenced from several places is one instance.

mod alternate;
mod calibrated;
mod icc;
mod indexed;
mod pattern;

pub use alternate::{AlternateKind, AlternateSpace};
pub use calibrated::{CalGray, CalRgb, LabSpace};
pub use icc::IccBased;
pub use indexed::IndexedSpace;
pub use pattern::PatternSpace;

use crate::color::Rgb;
use crate::descriptor::ColorSpaceFamily;
use crate::device::cmyk_to_rgb;
use crate::transform::ProfileTransform;
use crate::{Error, Result, simd};
use std::sync::Arc;

/// DeviceGray, converted through the embedded gray calibration profile
#[derive(Debug, Clone)]
pub struct DeviceGray {
    transform: ProfileTransform,
}

impl DeviceGray {
    pub(crate) fn new(transform: ProfileTransform) -> Self {
        Self { transform }
    }

    fn to_rgb(&self, gray: f32) -> Result<Rgb> {
        Ok(Rgb::from(self.transform.convert(&[gray])?).clamp())
    }
}

/// An executable color space
#[derive(Debug)]
pub enum ColorModel {
    DeviceGray(DeviceGray),
    DeviceRgb,
    DeviceCmyk,
    CalGray(CalGray),
    CalRgb(CalRgb),
    Lab(LabSpace),
    IccBased(IccBased),
    Indexed(IndexedSpace),
    Alternate(AlternateSpace),
    Pattern(PatternSpace),
}

impl ColorModel {
    /// Number of components `to_rgb` expects
    ///
    /// A Pattern space without an underlying space takes no components: its
    /// colors are painted by the pattern itself.
    pub fn arity(&self) -> usize {
        match self {
            Self::DeviceGray(_) | Self::CalGray(_) | Self::Indexed(_) => 1,
            Self::DeviceRgb | Self::CalRgb(_) | Self::Lab(_) => 3,
            Self::DeviceCmyk => 4,
            Self::IccBased(icc) => icc.channels(),
            Self::Alternate(alt) => alt.arity(),
            Self::Pattern(pattern) => pattern.arity(),
        }
    }

    /// Family this model was resolved from
    pub fn family(&self) -> ColorSpaceFamily {
        match self {
            Self::DeviceGray(_) => ColorSpaceFamily::DeviceGray,
            Self::DeviceRgb => ColorSpaceFamily::DeviceRgb,
            Self::DeviceCmyk => ColorSpaceFamily::DeviceCmyk,
            Self::CalGray(_) => ColorSpaceFamily::CalGray,
            Self::CalRgb(_) => ColorSpaceFamily::CalRgb,
            Self::Lab(_) => ColorSpaceFamily::Lab,
            Self::IccBased(_) => ColorSpaceFamily::IccBased,
            Self::Indexed(_) => ColorSpaceFamily::Indexed,
            Self::Alternate(alt) => match alt.kind() {
                AlternateKind::Separation => ColorSpaceFamily::Separation,
                AlternateKind::DeviceN => ColorSpaceFamily::DeviceN,
            },
            Self::Pattern(_) => ColorSpaceFamily::Pattern,
        }
    }

    /// Underlying model of Indexed, Separation/DeviceN and Pattern spaces
    pub fn base(&self) -> Option<&Arc<ColorModel>> {
        match self {
            Self::Indexed(indexed) => Some(indexed.base()),
            Self::Alternate(alt) => Some(alt.base()),
            Self::Pattern(pattern) => pattern.base(),
            _ => None,
        }
    }

    pub fn is_device(&self) -> bool {
        matches!(self, Self::DeviceGray(_) | Self::DeviceRgb | Self::DeviceCmyk)
    }

    /// Valid range of component `index`
    ///
    /// Used to scale 8-bit samples (Indexed lookup tables, image data) into
    /// component values. Everything but Lab uses [0, 1].
    pub fn component_range(&self, index: usize) -> (f32, f32) {
        match self {
            Self::Lab(lab) => lab.component_range(index),
            _ => (0.0, 1.0),
        }
    }

    /// Convert one color to display RGB
    ///
    /// `components.len()` must equal [`arity`](Self::arity).
    pub fn to_rgb(&self, components: &[f32]) -> Result<Rgb> {
        let arity = self.arity();
        if components.len() != arity {
            return Err(Error::ComponentCount {
                expected: arity,
                actual: components.len(),
            });
        }

        match self {
            Self::DeviceGray(gray) => gray.to_rgb(components[0]),
            Self::DeviceRgb => Ok(Rgb::new(components[0], components[1], components[2]).clamp()),
            Self::DeviceCmyk => Ok(Rgb::from(cmyk_to_rgb(
                components[0],
                components[1],
                components[2],
                components[3],
            ))),
            Self::CalGray(cal) => Ok(cal.to_rgb(components[0])),
            Self::CalRgb(cal) => Ok(cal.to_rgb([components[0], components[1], components[2]])),
            Self::Lab(lab) => Ok(lab.to_rgb([components[0], components[1], components[2]])),
            Self::IccBased(icc) => icc.to_rgb(components),
            Self::Indexed(indexed) => indexed.to_rgb(components[0]),
            Self::Alternate(alt) => alt.to_rgb(components),
            Self::Pattern(pattern) => pattern.to_rgb(components),
        }
    }

    /// Convert a row of interleaved samples to packed RGB8
    ///
    /// `samples` holds `arity` components per pixel; `out` receives three
    /// bytes per pixel.
    pub fn convert_row_rgb8(&self, samples: &[f32], out: &mut [u8]) -> Result<()> {
        let arity = self.arity();
        if arity == 0 || samples.len() % arity != 0 {
            return Err(Error::InvalidArgument(format!(
                "{} samples do not split into pixels of {} components",
                samples.len(),
                arity
            )));
        }
        let pixels = samples.len() / arity;
        if out.len() < pixels * 3 {
            return Err(Error::InvalidArgument(format!(
                "output holds {} bytes, need {}",
                out.len(),
                pixels * 3
            )));
        }

        let colors = samples
            .chunks_exact(arity)
            .map(|pixel| self.to_rgb(pixel))
            .collect::<Result<Vec<_>>>()?;
        simd::unit_f32_to_u8_batch(crate::color::rgb::as_channels(&colors), &mut out[..pixels * 3]);
        Ok(())
    }
}
