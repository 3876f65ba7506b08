//! Device color spaces
//!
//! DeviceGray, DeviceRGB, DeviceCMYK and the bare Pattern space are
//! document-independent. Each is built once per process and shared by every
//! resolver; [`device_space`] hands out clones of the same `Arc`.

use crate::model::{ColorModel, DeviceGray, PatternSpace};
use crate::profile::IccProfile;
use crate::transform::RenderingIntent;
use crate::{Error, Result};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// One of the four device-level spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Gray,
    Rgb,
    Cmyk,
    Pattern,
}

impl DeviceKind {
    /// Kind for a plain color space name, including the inline-image
    /// abbreviations `G`, `RGB` and `CMYK`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DeviceGray" | "G" => Some(Self::Gray),
            "DeviceRGB" | "RGB" => Some(Self::Rgb),
            "DeviceCMYK" | "CMYK" => Some(Self::Cmyk),
            "Pattern" => Some(Self::Pattern),
            _ => None,
        }
    }

    /// Number of components, with the bare Pattern space taking none
    pub fn components(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Cmyk => 4,
            Self::Pattern => 0,
        }
    }
}

impl TryFrom<u32> for DeviceKind {
    type Error = Error;

    /// Numeric codes: 0 gray, 1 RGB, 2 CMYK, 3 pattern
    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Gray),
            1 => Ok(Self::Rgb),
            2 => Ok(Self::Cmyk),
            3 => Ok(Self::Pattern),
            other => Err(Error::InvalidArgument(format!(
                "Unknown Color Space name: {}",
                other
            ))),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown device color space: {}", s)))
    }
}

static DEVICE_GRAY: LazyLock<Arc<ColorModel>> = LazyLock::new(|| {
    // Every gray conversion depends on this profile; there is no sensible
    // degraded mode, so failing here aborts initialization.
    let profile = IccProfile::new_srgb_gray();
    match profile.to_srgb_transform(RenderingIntent::Perceptual) {
        Ok(transform) => Arc::new(ColorModel::DeviceGray(DeviceGray::new(transform))),
        Err(e) => panic!("embedded gray calibration profile is unusable: {}", e),
    }
});

static DEVICE_RGB: LazyLock<Arc<ColorModel>> = LazyLock::new(|| Arc::new(ColorModel::DeviceRgb));

static DEVICE_CMYK: LazyLock<Arc<ColorModel>> =
    LazyLock::new(|| Arc::new(ColorModel::DeviceCmyk));

static PATTERN: LazyLock<Arc<ColorModel>> =
    LazyLock::new(|| Arc::new(ColorModel::Pattern(PatternSpace::new(None))));

/// Shared singleton for a device kind
pub fn device_space(kind: DeviceKind) -> Arc<ColorModel> {
    match kind {
        DeviceKind::Gray => Arc::clone(&DEVICE_GRAY),
        DeviceKind::Rgb => Arc::clone(&DEVICE_RGB),
        DeviceKind::Cmyk => Arc::clone(&DEVICE_CMYK),
        DeviceKind::Pattern => Arc::clone(&PATTERN),
    }
}

/// Shared singleton for a numeric device code (see [`DeviceKind::try_from`])
pub fn device_space_by_code(code: u32) -> Result<Arc<ColorModel>> {
    DeviceKind::try_from(code).map(device_space)
}

/// Uncalibrated CMYK → RGB: each channel is `1 - min(1, ink + K)`
#[inline]
pub(crate) fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> [f32; 3] {
    let channel = |ink: f32| 1.0 - (ink.clamp(0.0, 1.0) + k.clamp(0.0, 1.0)).min(1.0);
    [channel(c), channel(m), channel(y)]
}
