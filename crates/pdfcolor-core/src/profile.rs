//! ICC Color Profile handling
//!
//! Embedded `/ICCBased` profiles are parsed by moxcms. This module is the
//! thin wrapper that exposes what the color models need: the data color
//! space, its channel count, and a transform to sRGB.

use crate::transform::{ProfileTransform, RenderingIntent};
use crate::{Error, Result};
use moxcms::{DataColorSpace, Layout, TransformOptions};
use std::sync::Arc;

/// Data color space of an ICC profile, as far as PDF cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProfileColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Lab,
    /// Any other data space (XYZ, YCbCr, multi-channel, ...)
    Other,
}

impl ProfileColorSpace {
    /// Number of channels, or None for data spaces PDF cannot use directly
    pub fn channels(&self) -> Option<usize> {
        match self {
            Self::Gray => Some(1),
            Self::Rgb | Self::Lab => Some(3),
            Self::Cmyk => Some(4),
            Self::Other => None,
        }
    }

    /// moxcms source layout for this data space
    fn layout(&self) -> Option<Layout> {
        match self {
            Self::Gray => Some(Layout::Gray),
            Self::Rgb => Some(Layout::Rgb),
            // moxcms carries four-channel CMYK in the RGBA layout
            Self::Cmyk => Some(Layout::Rgba),
            Self::Lab | Self::Other => None,
        }
    }
}

impl From<DataColorSpace> for ProfileColorSpace {
    fn from(cs: DataColorSpace) -> Self {
        match cs {
            DataColorSpace::Gray => Self::Gray,
            DataColorSpace::Rgb => Self::Rgb,
            DataColorSpace::Cmyk => Self::Cmyk,
            DataColorSpace::Lab => Self::Lab,
            _ => Self::Other,
        }
    }
}

/// ICC Color Profile
#[derive(Debug, Clone)]
pub struct IccProfile {
    inner: moxcms::ColorProfile,
}

impl IccProfile {
    /// Create a profile from raw ICC data
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let inner = moxcms::ColorProfile::new_from_slice(data)
            .map_err(|e| Error::Profile(format!("{:?}", e)))?;
        Ok(Self { inner })
    }

    /// Built-in sRGB profile
    pub fn new_srgb() -> Self {
        Self {
            inner: moxcms::ColorProfile::new_srgb(),
        }
    }

    /// Built-in gray profile with a pure power curve
    pub fn new_gray_with_gamma(gamma: f32) -> Self {
        Self {
            inner: moxcms::ColorProfile::new_gray_with_gamma(gamma),
        }
    }

    /// Built-in gray profile with the sRGB tone curve (sGray)
    ///
    /// Mid-gray maps to the same sRGB code value on all three channels.
    pub fn new_srgb_gray() -> Self {
        let srgb = moxcms::ColorProfile::new_srgb();
        let mut gray = moxcms::ColorProfile::new_gray_with_gamma(1.0);
        gray.gray_trc = srgb.green_trc.clone();
        Self { inner: gray }
    }

    /// Data color space of the profile
    pub fn color_space(&self) -> ProfileColorSpace {
        self.inner.color_space.into()
    }

    /// Number of input channels, if the data space is usable
    pub fn channels(&self) -> Option<usize> {
        self.color_space().channels()
    }

    /// Access the inner moxcms profile
    pub fn inner(&self) -> &moxcms::ColorProfile {
        &self.inner
    }

    /// Create a floating-point transform from this profile to sRGB
    pub fn to_srgb_transform(&self, intent: RenderingIntent) -> Result<ProfileTransform> {
        let color_space = self.color_space();
        let (layout, channels) = match (color_space.layout(), color_space.channels()) {
            (Some(layout), Some(channels)) => (layout, channels),
            _ => {
                return Err(Error::Profile(format!(
                    "no display transform for {:?} profiles",
                    color_space
                )));
            }
        };

        let options = TransformOptions {
            rendering_intent: intent.into(),
            ..Default::default()
        };
        let executor = self
            .inner
            .create_transform_f32(layout, &moxcms::ColorProfile::new_srgb(), Layout::Rgb, options)
            .map_err(|e| Error::Profile(format!("{:?}", e)))?;

        Ok(ProfileTransform::new(Arc::from(executor), channels))
    }
}

impl From<moxcms::ColorProfile> for IccProfile {
    fn from(inner: moxcms::ColorProfile) -> Self {
        Self { inner }
    }
}
