//! ICCBased spaces backed by an embedded profile

use crate::color::Rgb;
use crate::profile::{IccProfile, ProfileColorSpace};
use crate::transform::{ProfileTransform, RenderingIntent};
use crate::{Error, Result};

/// An ICCBased space with a working transform to sRGB
#[derive(Debug, Clone)]
pub struct IccBased {
    color_space: ProfileColorSpace,
    transform: ProfileTransform,
}

impl IccBased {
    /// Build the display transform for `profile`
    ///
    /// `declared` is the stream's `/N`; when given it must agree with the
    /// profile's data space.
    pub fn new(
        profile: &IccProfile,
        declared: Option<usize>,
        intent: RenderingIntent,
    ) -> Result<Self> {
        let color_space = profile.color_space();
        if let (Some(n), Some(channels)) = (declared, color_space.channels()) {
            if n != channels {
                return Err(Error::parse(format!(
                    "ICCBased /N is {} but the profile has {} channels ({:?})",
                    n, channels, color_space
                )));
            }
        }

        let transform = profile.to_srgb_transform(intent)?;
        Ok(Self {
            color_space,
            transform,
        })
    }

    pub fn color_space(&self) -> ProfileColorSpace {
        self.color_space
    }

    pub fn channels(&self) -> usize {
        self.transform.channels()
    }

    pub(crate) fn to_rgb(&self, components: &[f32]) -> Result<Rgb> {
        Ok(Rgb::from(self.transform.convert(components)?).clamp())
    }
}
