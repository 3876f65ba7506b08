//! Profile-to-display transforms
//!
//! Wraps a moxcms floating-point executor that converts one color from an
//! ICC profile's data space to sRGB.

use crate::{Error, Result};
use moxcms::TransformExecutor;
use std::fmt;
use std::sync::Arc;

/// Rendering intent for ICC transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderingIntent {
    /// Perceptual rendering intent - best for photographic images
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors, clips out-of-gamut
    RelativeColorimetric,
    /// Saturation - maintains saturation, may shift hue
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
}

impl RenderingIntent {
    /// Parse a PDF rendering intent name (`/RI`, `/Intent`)
    ///
    /// Unknown names fall back to relative colorimetric, as PDF readers do.
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Perceptual" => Self::Perceptual,
            "Saturation" => Self::Saturation,
            "AbsoluteColorimetric" => Self::AbsoluteColorimetric,
            _ => Self::RelativeColorimetric,
        }
    }
}

impl From<RenderingIntent> for moxcms::RenderingIntent {
    fn from(intent: RenderingIntent) -> Self {
        match intent {
            RenderingIntent::Perceptual => moxcms::RenderingIntent::Perceptual,
            RenderingIntent::RelativeColorimetric => moxcms::RenderingIntent::RelativeColorimetric,
            RenderingIntent::Saturation => moxcms::RenderingIntent::Saturation,
            RenderingIntent::AbsoluteColorimetric => moxcms::RenderingIntent::AbsoluteColorimetric,
        }
    }
}

pub(crate) type Executor = dyn TransformExecutor<f32> + Send + Sync;

/// A single-color transform from a profile's data space to sRGB
#[derive(Clone)]
pub struct ProfileTransform {
    executor: Arc<Executor>,
    channels: usize,
}

impl ProfileTransform {
    pub(crate) fn new(executor: Arc<Executor>, channels: usize) -> Self {
        Self { executor, channels }
    }

    /// Number of input channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Convert one color; `components` must hold exactly `channels` values
    pub fn convert(&self, components: &[f32]) -> Result<[f32; 3]> {
        if components.len() != self.channels {
            return Err(Error::ComponentCount {
                expected: self.channels,
                actual: components.len(),
            });
        }

        let mut src = [0.0f32; 4];
        for (dst, &c) in src.iter_mut().zip(components) {
            *dst = c.clamp(0.0, 1.0);
        }

        let mut dst = [0.0f32; 3];
        self.executor
            .transform(&src[..self.channels], &mut dst)
            .map_err(|e| Error::Profile(format!("{:?}", e)))?;
        Ok(dst)
    }
}

impl fmt::Debug for ProfileTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileTransform")
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names() {
        assert_eq!(
            RenderingIntent::from_pdf_name("Perceptual"),
            RenderingIntent::Perceptual
        );
        assert_eq!(
            RenderingIntent::from_pdf_name("Saturation"),
            RenderingIntent::Saturation
        );
        assert_eq!(
            RenderingIntent::from_pdf_name("Nonsense"),
            RenderingIntent::RelativeColorimetric
        );
    }

    #[test]
    fn test_intent_maps_to_moxcms() {
        let intent: moxcms::RenderingIntent = RenderingIntent::AbsoluteColorimetric.into();
        assert!(matches!(
            intent,
            moxcms::RenderingIntent::AbsoluteColorimetric
        ));
    }
}
