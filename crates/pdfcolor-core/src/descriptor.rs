//! Color space descriptor grammar
//!
//! A descriptor is either a name (`/DeviceRGB`, `/CS0`) or an array whose
//! first element is a family tag:
//!
//! ```text
//! [/CalGray <<dict>>]        [/CalRGB <<dict>>]        [/Lab <<dict>>]
//! [/ICCBased stream]         [/Indexed base hival lookup]
//! [/Separation name alt fn]  [/DeviceN [names] alt fn]
//! [/Pattern]                 [/Pattern base]
//! ```
//!
//! Tag matching is exact and case-sensitive. `I` is accepted for `Indexed`
//! here; the `G`/`RGB`/`CMYK` abbreviations are only valid as plain names
//! (see [`crate::device::DeviceKind::from_name`]).

use crate::object::{ObjectKind, PdfObject};
use crate::{Error, Result};
use std::fmt;

/// Color space family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceFamily {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    CalGray,
    CalRgb,
    Lab,
    IccBased,
    Indexed,
    Separation,
    DeviceN,
    Pattern,
}

impl ColorSpaceFamily {
    /// Family for an array tag, or None if the tag is not a known family
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CalGray" => Some(Self::CalGray),
            "CalRGB" => Some(Self::CalRgb),
            "Lab" => Some(Self::Lab),
            "ICCBased" => Some(Self::IccBased),
            "Indexed" | "I" => Some(Self::Indexed),
            "Separation" => Some(Self::Separation),
            "DeviceN" => Some(Self::DeviceN),
            "Pattern" => Some(Self::Pattern),
            _ => None,
        }
    }

    /// Canonical PDF name of the family
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRgb => "DeviceRGB",
            Self::DeviceCmyk => "DeviceCMYK",
            Self::CalGray => "CalGray",
            Self::CalRgb => "CalRGB",
            Self::Lab => "Lab",
            Self::IccBased => "ICCBased",
            Self::Indexed => "Indexed",
            Self::Separation => "Separation",
            Self::DeviceN => "DeviceN",
            Self::Pattern => "Pattern",
        }
    }
}

impl fmt::Display for ColorSpaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdf_name())
    }
}

/// A tagged array descriptor split into its family and elements
///
/// `elements[0]` is the tag itself, so element indices match the PDF
/// reference (`elements[1]` is the first argument).
#[derive(Debug, Clone)]
pub struct TaggedDescriptor<O> {
    pub family: ColorSpaceFamily,
    pub elements: Vec<O>,
}

impl<O: PdfObject> TaggedDescriptor<O> {
    /// Split an array descriptor
    ///
    /// Fails on anything that is not a non-empty array with a known name tag.
    pub fn parse(descriptor: &O) -> Result<Self> {
        let elements = descriptor.as_array().ok_or_else(|| {
            Error::parse(format!(
                "expected a color space name or array, got {}",
                descriptor.describe()
            ))
        })?;

        let first = elements
            .first()
            .ok_or_else(|| Error::parse("empty color space array"))?;
        let tag = first.as_name().ok_or_else(|| {
            Error::parse(format!(
                "color space array must start with a name, got {}",
                first.describe()
            ))
        })?;

        let family = ColorSpaceFamily::from_tag(tag).ok_or_else(|| Error::UnknownColorSpace {
            tag: tag.to_string(),
            argument: elements
                .get(1)
                .map_or_else(|| "nothing".to_string(), |arg| arg.describe()),
        })?;

        Ok(Self { family, elements })
    }

    /// Required element `index`
    pub fn element(&self, index: usize) -> Result<&O> {
        self.elements.get(index).ok_or_else(|| {
            Error::parse(format!(
                "{} color space is missing element {}",
                self.family, index
            ))
        })
    }

    /// Required dictionary element `index`
    pub fn dict(&self, index: usize) -> Result<&O> {
        let obj = self.element(index)?;
        if obj.kind() != ObjectKind::Dict {
            return Err(Error::parse(format!(
                "{} color space expects a dictionary, got {}",
                self.family,
                obj.describe()
            )));
        }
        Ok(obj)
    }

    /// Only the tag is present
    pub fn is_bare(&self) -> bool {
        self.elements.len() == 1
    }
}
