//! Separation and DeviceN spaces
//!
//! Both name one or more colorants and carry a tint transform into an
//! alternate space. Rendering always goes through the alternate; real
//! colorant separation is left to output devices.

use super::ColorModel;
use crate::color::Rgb;
use crate::descriptor::ColorSpaceFamily;
use crate::function::TransferFunction;
use crate::object::{ObjectKind, PdfObject};
use crate::{Error, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlternateKind {
    Separation,
    DeviceN,
}

/// Colorants mapped through a tint transform into a base space
#[derive(Debug)]
pub struct AlternateSpace {
    kind: AlternateKind,
    colorants: Vec<String>,
    base: Arc<ColorModel>,
    function: Arc<dyn TransferFunction>,
}

impl AlternateSpace {
    /// The function must take one input per colorant and produce one output
    /// per base component.
    pub fn new(
        kind: AlternateKind,
        colorants: Vec<String>,
        base: Arc<ColorModel>,
        function: Arc<dyn TransferFunction>,
    ) -> Result<Self> {
        if colorants.is_empty() {
            return Err(Error::parse(format!("{:?} space names no colorants", kind)));
        }
        if kind == AlternateKind::Separation && colorants.len() != 1 {
            return Err(Error::parse("Separation space names exactly one colorant"));
        }
        if base.family() == ColorSpaceFamily::Pattern || base.arity() == 0 {
            return Err(Error::parse(format!(
                "{:?} alternate cannot be a {} space",
                kind,
                base.family()
            )));
        }
        if function.inputs() != colorants.len() || function.outputs() != base.arity() {
            return Err(Error::parse(format!(
                "{:?} tint transform maps {} -> {}, need {} -> {}",
                kind,
                function.inputs(),
                function.outputs(),
                colorants.len(),
                base.arity()
            )));
        }

        Ok(Self {
            kind,
            colorants,
            base,
            function,
        })
    }

    /// Colorant names from element 1 of the descriptor: a single name for
    /// Separation, an array of names for DeviceN
    pub(crate) fn colorants_from<O: PdfObject>(kind: AlternateKind, names: &O) -> Result<Vec<String>> {
        let invalid = || {
            Error::parse(format!(
                "{:?} colorants must be names, got {}",
                kind,
                names.describe()
            ))
        };
        match (kind, names.kind()) {
            (AlternateKind::Separation, ObjectKind::Name) => {
                Ok(vec![names.as_name().ok_or_else(invalid)?.to_string()])
            }
            (AlternateKind::DeviceN, ObjectKind::Array) => names
                .as_array()
                .ok_or_else(invalid)?
                .iter()
                .map(|n| n.as_name().map(str::to_string).ok_or_else(invalid))
                .collect(),
            _ => Err(invalid()),
        }
    }

    pub fn kind(&self) -> AlternateKind {
        self.kind
    }

    pub fn colorants(&self) -> &[String] {
        &self.colorants
    }

    pub fn base(&self) -> &Arc<ColorModel> {
        &self.base
    }

    pub fn function(&self) -> &Arc<dyn TransferFunction> {
        &self.function
    }

    pub fn arity(&self) -> usize {
        self.colorants.len()
    }

    pub(crate) fn to_rgb(&self, components: &[f32]) -> Result<Rgb> {
        let tint: Vec<f32> = components.iter().map(|c| c.clamp(0.0, 1.0)).collect();
        let mapped = self.function.evaluate(&tint)?;
        self.base.to_rgb(&mapped)
    }
}
