//! Descriptor fixtures
//!
//! Builders for the color space descriptors a PDF page would carry, on the
//! in-memory object graph.

use pdfcolor_core::Object;

/// D65 white point as a PDF array
pub fn d65_white() -> Object {
    Object::reals(&[0.95047, 1.0, 1.08883])
}

/// D50 white point as a PDF array
pub fn d50_white() -> Object {
    Object::reals(&[0.9642, 1.0, 0.8251])
}

pub fn cal_gray(white: Object, gamma: f64) -> Object {
    Object::array(vec![
        Object::name("CalGray"),
        Object::dict([("WhitePoint", white), ("Gamma", Object::real(gamma))]),
    ])
}

/// CalRGB with sRGB primaries under D65
pub fn cal_rgb_srgb_primaries(gamma: f64) -> Object {
    Object::array(vec![
        Object::name("CalRGB"),
        Object::dict([
            ("WhitePoint", d65_white()),
            ("Gamma", Object::reals(&[gamma; 3])),
            (
                "Matrix",
                Object::reals(&[
                    0.4124564, 0.2126729, 0.0193339, 0.3575761, 0.7151522, 0.1191920, 0.1804375,
                    0.0721750, 0.9503041,
                ]),
            ),
        ]),
    ])
}

pub fn lab(white: Object, range: Option<[f64; 4]>) -> Object {
    let mut entries = vec![("WhitePoint", white)];
    if let Some(range) = range {
        entries.push(("Range", Object::reals(&range)));
    }
    Object::array(vec![Object::name("Lab"), Object::dict(entries)])
}

/// `[/ICCBased stream]` with `/N` and an optional `/Alternate`
pub fn icc_based(profile: Vec<u8>, n: i64, alternate: Option<Object>) -> Object {
    let mut entries = vec![("N", Object::int(n))];
    if let Some(alternate) = alternate {
        entries.push(("Alternate", alternate));
    }
    Object::array(vec![Object::name("ICCBased"), Object::stream(entries, profile)])
}

/// `[/Indexed base hival lookup]` with a string lookup table
pub fn indexed(base: Object, hival: i64, lookup: Vec<u8>) -> Object {
    Object::array(vec![
        Object::name("Indexed"),
        base,
        Object::int(hival),
        Object::string(lookup),
    ])
}

/// FunctionType 2 dictionary from C0 to C1
pub fn exponential(c0: &[f64], c1: &[f64], n: f64) -> Object {
    Object::dict([
        ("FunctionType", Object::int(2)),
        ("Domain", Object::reals(&[0.0, 1.0])),
        ("C0", Object::reals(c0)),
        ("C1", Object::reals(c1)),
        ("N", Object::real(n)),
    ])
}

/// Spot color over CMYK: tint 1 is the given CMYK ink
pub fn separation(colorant: &str, cmyk: [f64; 4]) -> Object {
    Object::array(vec![
        Object::name("Separation"),
        Object::name(colorant),
        Object::name("DeviceCMYK"),
        exponential(&[0.0; 4], &cmyk, 1.0),
    ])
}

/// `[/DeviceN [names] alternate function]`
pub fn device_n(colorants: &[&str], alternate: Object, function: Object) -> Object {
    Object::array(vec![
        Object::name("DeviceN"),
        Object::names(colorants),
        alternate,
        function,
    ])
}

/// Resource dictionary whose `/ColorSpace` holds `entries`
pub fn resources(entries: Vec<(&str, Object)>) -> Object {
    Object::dict([("ColorSpace", Object::dict(entries))])
}
