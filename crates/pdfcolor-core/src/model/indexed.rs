//! Indexed (palette) spaces

use super::ColorModel;
use crate::color::Rgb;
use crate::descriptor::ColorSpaceFamily;
use crate::object::{ObjectKind, PdfObject};
use crate::options::IndexPolicy;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::warn;

/// Largest allowed `hival`
pub const MAX_HIVAL: usize = 255;

/// A palette over a base space
///
/// The lookup table holds `(hival + 1) × base.arity()` bytes, one byte per
/// base component. Every entry is converted once at construction.
#[derive(Debug)]
pub struct IndexedSpace {
    base: Arc<ColorModel>,
    hival: usize,
    lookup: Vec<u8>,
    palette: Vec<Rgb>,
    policy: IndexPolicy,
}

impl IndexedSpace {
    pub fn new(
        base: Arc<ColorModel>,
        hival: usize,
        mut lookup: Vec<u8>,
        policy: IndexPolicy,
    ) -> Result<Self> {
        match base.family() {
            ColorSpaceFamily::Pattern | ColorSpaceFamily::Indexed => {
                return Err(Error::parse(format!(
                    "Indexed base cannot be a {} space",
                    base.family()
                )));
            }
            _ => {}
        }
        if hival > MAX_HIVAL {
            return Err(Error::parse(format!(
                "Indexed hival {} exceeds {}",
                hival, MAX_HIVAL
            )));
        }

        let arity = base.arity();
        if arity == 0 {
            return Err(Error::parse("Indexed base takes no components"));
        }
        let expected = (hival + 1) * arity;
        if lookup.len() < expected {
            warn!(
                expected,
                actual = lookup.len(),
                "Indexed lookup table is short, padding with zeros"
            );
        }
        lookup.resize(expected, 0);

        let palette = lookup
            .chunks_exact(arity)
            .map(|entry| {
                let components: Vec<f32> = entry
                    .iter()
                    .enumerate()
                    .map(|(i, &byte)| {
                        let (lo, hi) = base.component_range(i);
                        lo + f32::from(byte) / 255.0 * (hi - lo)
                    })
                    .collect();
                base.to_rgb(&components)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            base,
            hival,
            lookup,
            palette,
            policy,
        })
    }

    /// Build from the `hival` and `lookup` elements of an Indexed descriptor
    pub(crate) fn from_objects<O: PdfObject>(
        base: Arc<ColorModel>,
        hival: &O,
        lookup: &O,
        policy: IndexPolicy,
    ) -> Result<Self> {
        let hival = hival
            .as_int()
            .or_else(|| {
                // Some writers emit hival as a real; accept integral values
                hival
                    .as_real()
                    .filter(|r| r.fract() == 0.0)
                    .map(|r| r as i64)
            })
            .ok_or_else(|| {
                Error::parse(format!("Indexed hival must be an integer, got {}", hival.describe()))
            })?;
        let hival = usize::try_from(hival)
            .map_err(|_| Error::parse(format!("Indexed hival {} is negative", hival)))?;

        let bytes = match lookup.kind() {
            ObjectKind::Stream => lookup.stream_bytes(),
            ObjectKind::String => lookup.string_bytes(),
            _ => None,
        }
        .ok_or_else(|| {
            Error::parse(format!(
                "Indexed lookup must be a string or stream, got {}",
                lookup.describe()
            ))
        })?;

        Self::new(base, hival, bytes.into_owned(), policy)
    }

    pub fn base(&self) -> &Arc<ColorModel> {
        &self.base
    }

    pub fn hival(&self) -> usize {
        self.hival
    }

    /// Lookup table, padded or truncated to its exact size
    pub fn lookup(&self) -> &[u8] {
        &self.lookup
    }

    /// Precomputed display color of every entry
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub(crate) fn to_rgb(&self, index: f32) -> Result<Rgb> {
        let rounded = index.round();
        let in_range = rounded >= 0.0 && rounded <= self.hival as f32;
        let slot = match (in_range, self.policy) {
            (true, _) => rounded as usize,
            (false, IndexPolicy::Clamp) if !rounded.is_nan() => {
                rounded.clamp(0.0, self.hival as f32) as usize
            }
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Index {} is outside the palette [0, {}]",
                    index, self.hival
                )));
            }
        };
        Ok(self.palette[slot])
    }
}
