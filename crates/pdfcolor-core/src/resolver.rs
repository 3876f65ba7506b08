//! Descriptor resolution
//!
//! [`ColorSpaceResolver`] turns color space descriptors into shared
//! [`ColorModel`]s. One resolver belongs to one document: its cache is keyed
//! on the document's object identities.
//!
//! Missing references resolve to `None`. Malformed structure is an error,
//! and an error anywhere in a nested descriptor fails the whole resolution
//! without caching anything for the outer descriptor.

use crate::cache::{Claim, ResolutionCache};
use crate::descriptor::{ColorSpaceFamily, TaggedDescriptor};
use crate::device::{DeviceKind, device_space};
use crate::function::{FunctionFactory, StandardFunctions};
use crate::model::{
    AlternateKind, AlternateSpace, CalGray, CalRgb, ColorModel, IccBased, IndexedSpace, LabSpace,
    PatternSpace,
};
use crate::object::PdfObject;
use crate::options::ResolveOptions;
use crate::profile::IccProfile;
use crate::{Error, Result};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Outcome of building a tagged descriptor
enum Built {
    /// Publish in the cache under the descriptor's identity
    Cache(Arc<ColorModel>),
    /// Return without caching
    Transient(Arc<ColorModel>),
    /// A required sub-descriptor is missing
    Absent,
}

/// Resolves color space descriptors for one document
///
/// `F` builds tint transforms for Separation and DeviceN spaces.
pub struct ColorSpaceResolver<O: PdfObject, F = StandardFunctions> {
    cache: ResolutionCache<O::Id>,
    options: ResolveOptions,
    functions: F,
    _object: PhantomData<fn(&O)>,
}

impl<O: PdfObject> ColorSpaceResolver<O> {
    pub fn new() -> Self {
        Self::with_options(ResolveOptions::default())
    }

    pub fn with_options(options: ResolveOptions) -> Self {
        Self::with_functions(options, StandardFunctions)
    }
}

impl<O: PdfObject> Default for ColorSpaceResolver<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PdfObject, F: FunctionFactory<O>> ColorSpaceResolver<O, F> {
    pub fn with_functions(options: ResolveOptions, functions: F) -> Self {
        Self {
            cache: ResolutionCache::new(),
            options,
            functions,
            _object: PhantomData,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn cache(&self) -> &ResolutionCache<O::Id> {
        &self.cache
    }

    /// The factory building tint transforms
    pub fn functions(&self) -> &F {
        &self.functions
    }

    /// Resolve `descriptor`, looking plain names up in the `/ColorSpace`
    /// subdictionary of `resources`
    ///
    /// Returns `Ok(None)` when the descriptor is null, names a space that is
    /// not in `resources`, or needs a base space that is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use pdfcolor_core::{ColorSpaceResolver, Object, Rgb};
    ///
    /// let resolver = ColorSpaceResolver::new();
    /// let cmyk = resolver.resolve(&Object::name("DeviceCMYK"), None)?.unwrap();
    /// assert_eq!(cmyk.arity(), 4);
    /// assert_eq!(cmyk.to_rgb(&[0.0, 0.0, 0.0, 1.0])?, Rgb::BLACK);
    /// # Ok::<(), pdfcolor_core::Error>(())
    /// ```
    pub fn resolve(
        &self,
        descriptor: &O,
        resources: Option<&O>,
    ) -> Result<Option<Arc<ColorModel>>> {
        self.resolve_at(descriptor, resources, 0)
    }

    fn resolve_at(
        &self,
        descriptor: &O,
        resources: Option<&O>,
        depth: usize,
    ) -> Result<Option<Arc<ColorModel>>> {
        if depth > self.options.max_depth {
            return Err(Error::parse(format!(
                "color space nesting exceeds {} levels",
                self.options.max_depth
            )));
        }

        if let Some(name) = descriptor.as_name() {
            if let Some(kind) = DeviceKind::from_name(name) {
                return Ok(Some(device_space(kind)));
            }
            let Some(target) = resources
                .and_then(|res| res.get("ColorSpace"))
                .and_then(|spaces| spaces.get(name))
            else {
                debug!(color_space = %name, "color space name not found in resources");
                return Ok(None);
            };
            return self.resolve_at(&target, resources, depth + 1);
        }

        if descriptor.is_null() {
            return Ok(None);
        }

        let id = descriptor.id();
        let slot = match self.cache.claim(id) {
            Claim::Ready(model) => {
                trace!(?id, "color space cache hit");
                return Ok(Some(model));
            }
            Claim::Vacant(slot) => slot,
            Claim::Cycle => {
                return Err(Error::parse(format!(
                    "color space {} refers back to itself",
                    descriptor.describe()
                )));
            }
        };

        // Any early return drops the slot and hands the identity to the next waiter
        let parsed = TaggedDescriptor::parse(descriptor)?;
        match self.build(&parsed, resources, depth)? {
            Built::Cache(model) => {
                debug!(family = %parsed.family, ?id, "resolved color space");
                Ok(Some(slot.publish(model)))
            }
            Built::Transient(model) => Ok(Some(model)),
            Built::Absent => {
                debug!(family = %parsed.family, ?id, "color space base is missing");
                Ok(None)
            }
        }
    }

    fn build(
        &self,
        desc: &TaggedDescriptor<O>,
        resources: Option<&O>,
        depth: usize,
    ) -> Result<Built> {
        let fresh = |model: ColorModel| -> Result<Built> { Ok(Built::Cache(Arc::new(model))) };

        match desc.family {
            ColorSpaceFamily::CalGray => {
                fresh(ColorModel::CalGray(CalGray::from_dict(desc.dict(1)?)?))
            }
            ColorSpaceFamily::CalRgb => {
                fresh(ColorModel::CalRgb(CalRgb::from_dict(desc.dict(1)?)?))
            }
            ColorSpaceFamily::Lab => fresh(ColorModel::Lab(LabSpace::from_dict(desc.dict(1)?)?)),
            ColorSpaceFamily::IccBased => self.build_icc(desc.element(1)?, resources, depth),
            ColorSpaceFamily::Indexed => {
                let Some(base) = self.resolve_at(desc.element(1)?, resources, depth + 1)? else {
                    return Ok(Built::Absent);
                };
                let indexed = IndexedSpace::from_objects(
                    base,
                    desc.element(2)?,
                    desc.element(3)?,
                    self.options.index_policy,
                )?;
                fresh(ColorModel::Indexed(indexed))
            }
            ColorSpaceFamily::Separation | ColorSpaceFamily::DeviceN => {
                let kind = if desc.family == ColorSpaceFamily::Separation {
                    AlternateKind::Separation
                } else {
                    AlternateKind::DeviceN
                };
                let colorants = AlternateSpace::colorants_from(kind, desc.element(1)?)?;
                let Some(base) = self.resolve_at(desc.element(2)?, resources, depth + 1)? else {
                    return Ok(Built::Absent);
                };
                let function = self.functions.build(desc.element(3)?)?;
                fresh(ColorModel::Alternate(AlternateSpace::new(
                    kind, colorants, base, function,
                )?))
            }
            ColorSpaceFamily::Pattern => {
                if desc.is_bare() {
                    return Ok(Built::Transient(device_space(DeviceKind::Pattern)));
                }
                let base = self.resolve_at(desc.element(1)?, resources, depth + 1)?;
                Ok(Built::Transient(Arc::new(ColorModel::Pattern(
                    PatternSpace::new(base),
                ))))
            }
            ColorSpaceFamily::DeviceGray
            | ColorSpaceFamily::DeviceRgb
            | ColorSpaceFamily::DeviceCmyk => Err(Error::parse(format!(
                "{} is a name, not an array tag",
                desc.family
            ))),
        }
    }

    fn build_icc(&self, stream: &O, resources: Option<&O>, depth: usize) -> Result<Built> {
        let declared = match stream.get("N") {
            Some(n) => Some(
                n.as_int()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        Error::parse(format!("ICCBased /N must be a count, got {}", n.describe()))
                    })?,
            ),
            None => None,
        };

        if !self.options.use_icc_profiles {
            return self.icc_fallback(stream, declared, resources, depth);
        }

        let data = stream.stream_bytes().ok_or_else(|| {
            Error::parse(format!("ICCBased expects a stream, got {}", stream.describe()))
        })?;
        let profile = IccProfile::from_bytes(&data)?;

        match IccBased::new(&profile, declared, self.options.rendering_intent) {
            Ok(icc) => Ok(Built::Cache(Arc::new(ColorModel::IccBased(icc)))),
            Err(Error::Profile(reason)) => {
                warn!(
                    color_space = ?profile.color_space(),
                    %reason,
                    "ICC profile has no display transform, using alternate space"
                );
                self.icc_fallback(stream, declared.or(profile.channels()), resources, depth)
            }
            Err(e) => Err(e),
        }
    }

    /// `/Alternate` when present and resolvable, else the device space with
    /// `channels` components
    fn icc_fallback(
        &self,
        stream: &O,
        channels: Option<usize>,
        resources: Option<&O>,
        depth: usize,
    ) -> Result<Built> {
        if let Some(alternate) = stream.get("Alternate") {
            if let Some(model) = self.resolve_at(&alternate, resources, depth + 1)? {
                return Ok(Built::Cache(model));
            }
        }

        let kind = match channels {
            Some(1) => DeviceKind::Gray,
            Some(3) => DeviceKind::Rgb,
            Some(4) => DeviceKind::Cmyk,
            other => {
                return Err(Error::parse(format!(
                    "ICCBased space has no device fallback for {:?} components",
                    other
                )));
            }
        };
        Ok(Built::Cache(device_space(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::object::Object;
    use crate::options::IndexPolicy;

    fn resources(entries: Vec<(&str, Object)>) -> Object {
        Object::dict([("ColorSpace", Object::dict(entries))])
    }

    fn gray_palette() -> Object {
        Object::array(vec![
            Object::name("Indexed"),
            Object::name("DeviceGray"),
            Object::int(1),
            Object::string(vec![0x00, 0xFF]),
        ])
    }

    #[test]
    fn test_device_names() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let rgb = resolver.resolve(&Object::name("RGB"), None).unwrap().unwrap();
        assert!(Arc::ptr_eq(&rgb, &device_space(DeviceKind::Rgb)));
        let pattern = resolver.resolve(&Object::name("Pattern"), None).unwrap().unwrap();
        assert!(Arc::ptr_eq(&pattern, &device_space(DeviceKind::Pattern)));
    }

    #[test]
    fn test_unknown_name_is_absent() {
        let resolver = ColorSpaceResolver::<Object>::new();
        assert!(resolver.resolve(&Object::name("CS9"), None).unwrap().is_none());
        let res = resources(vec![("CS0", Object::name("DeviceRGB"))]);
        assert!(resolver.resolve(&Object::name("CS9"), Some(&res)).unwrap().is_none());
        assert!(resolver.resolve(&Object::null(), Some(&res)).unwrap().is_none());
    }

    #[test]
    fn test_named_resource() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let res = resources(vec![("CS0", gray_palette())]);
        let first = resolver.resolve(&Object::name("CS0"), Some(&res)).unwrap().unwrap();
        let second = resolver.resolve(&Object::name("CS0"), Some(&res)).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.family(), ColorSpaceFamily::Indexed);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[test]
    fn test_indexed_gray() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let indexed = resolver.resolve(&gray_palette(), None).unwrap().unwrap();
        let black = indexed.to_rgb(&[0.0]).unwrap();
        let white = indexed.to_rgb(&[1.0]).unwrap();
        assert!(black.approx_eq(&Rgb::BLACK, 0.02), "{:?}", black);
        assert!(white.approx_eq(&Rgb::WHITE, 0.02), "{:?}", white);
        assert!(indexed.to_rgb(&[2.0]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_indexed_clamp_policy() {
        let options = ResolveOptions {
            index_policy: IndexPolicy::Clamp,
            ..Default::default()
        };
        let resolver = ColorSpaceResolver::<Object>::with_options(options);
        let indexed = resolver.resolve(&gray_palette(), None).unwrap().unwrap();
        assert_eq!(indexed.to_rgb(&[5.0]).unwrap(), indexed.to_rgb(&[1.0]).unwrap());
    }

    #[test]
    fn test_indexed_missing_base_is_absent() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let desc = Object::array(vec![
            Object::name("Indexed"),
            Object::name("Missing"),
            Object::int(0),
            Object::string(vec![0]),
        ]);
        assert!(resolver.resolve(&desc, None).unwrap().is_none());
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_pattern_forms() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let bare = resolver.resolve(&Object::names(&["Pattern"]), None).unwrap().unwrap();
        assert!(Arc::ptr_eq(&bare, &device_space(DeviceKind::Pattern)));

        let over_rgb = Object::names(&["Pattern", "DeviceRGB"]);
        let a = resolver.resolve(&over_rgb, None).unwrap().unwrap();
        let b = resolver.resolve(&over_rgb, None).unwrap().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.arity(), 3);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_unknown_tag() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let err = resolver
            .resolve(&Object::names(&["Bogus", "DeviceRGB"]), None)
            .unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn test_device_tag_in_array_is_rejected() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let err = resolver.resolve(&Object::names(&["DeviceRGB"]), None).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_separation_inner_error_propagates() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let desc = Object::array(vec![
            Object::name("Separation"),
            Object::name("Spot"),
            Object::names(&["Bogus"]),
            Object::dict([("FunctionType", Object::int(2))]),
        ]);
        let err = resolver.resolve(&desc, None).unwrap_err();
        assert!(matches!(err, Error::UnknownColorSpace { .. }));
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_separation_with_exponential_tint() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let tint = Object::dict([
            ("FunctionType", Object::int(2)),
            ("Domain", Object::reals(&[0.0, 1.0])),
            ("C0", Object::reals(&[0.0, 0.0, 0.0, 0.0])),
            ("C1", Object::reals(&[0.0, 1.0, 1.0, 0.0])),
            ("N", Object::int(1)),
        ]);
        let desc = Object::array(vec![
            Object::name("Separation"),
            Object::name("Red"),
            Object::name("DeviceCMYK"),
            tint,
        ]);
        let sep = resolver.resolve(&desc, None).unwrap().unwrap();
        assert_eq!(sep.family(), ColorSpaceFamily::Separation);
        assert_eq!(sep.to_rgb(&[1.0]).unwrap(), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_self_reference_is_parse_error() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let desc = Object::array(vec![
            Object::name("Indexed"),
            Object::name("CS0"),
            Object::int(0),
            Object::string(vec![0]),
        ]);
        let res = resources(vec![("CS0", desc.clone())]);
        let err = resolver.resolve(&desc, Some(&res)).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("refers back to itself"), "{}", err);
        assert!(resolver.cache().is_empty());

        // The failed build released the identity instead of wedging it
        assert!(resolver.resolve(&desc, Some(&res)).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_deep_nesting_hits_depth_limit() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let mut desc = Object::name("DeviceRGB");
        for _ in 0..40 {
            desc = Object::array(vec![Object::name("Pattern"), desc]);
        }
        let err = resolver.resolve(&desc, None).unwrap_err();
        assert!(err.to_string().contains("nesting"), "{}", err);
    }

    #[test]
    fn test_icc_disabled_uses_alternate() {
        let options = ResolveOptions {
            use_icc_profiles: false,
            ..Default::default()
        };
        let resolver = ColorSpaceResolver::<Object>::with_options(options);
        let stream = Object::stream([("N", Object::int(4))], vec![0u8; 16]);
        let desc = Object::array(vec![Object::name("ICCBased"), stream]);
        let model = resolver.resolve(&desc, None).unwrap().unwrap();
        assert!(Arc::ptr_eq(&model, &device_space(DeviceKind::Cmyk)));
    }

    #[test]
    fn test_icc_garbage_is_parse_error() {
        let resolver = ColorSpaceResolver::<Object>::new();
        let stream = Object::stream([("N", Object::int(3))], vec![1u8; 16]);
        let desc = Object::array(vec![Object::name("ICCBased"), stream]);
        assert!(resolver.resolve(&desc, None).unwrap_err().is_parse_error());
    }
}
