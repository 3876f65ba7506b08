//! Pattern spaces

use super::ColorModel;
use crate::color::Rgb;
use crate::{Error, Result};
use std::sync::Arc;

/// A Pattern space, optionally over an underlying space
///
/// Colored patterns carry their own colors and the space is a bare marker.
/// Uncolored patterns are painted with a color in the underlying space.
#[derive(Debug)]
pub struct PatternSpace {
    base: Option<Arc<ColorModel>>,
}

impl PatternSpace {
    pub fn new(base: Option<Arc<ColorModel>>) -> Self {
        Self { base }
    }

    pub fn base(&self) -> Option<&Arc<ColorModel>> {
        self.base.as_ref()
    }

    pub fn arity(&self) -> usize {
        self.base.as_ref().map_or(0, |base| base.arity())
    }

    pub(crate) fn to_rgb(&self, components: &[f32]) -> Result<Rgb> {
        match &self.base {
            Some(base) => base.to_rgb(components),
            None => Err(Error::InvalidArgument(
                "Pattern space without an underlying space has no color".into(),
            )),
        }
    }
}
