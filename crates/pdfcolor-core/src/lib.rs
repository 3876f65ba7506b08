//! # pdfcolor - PDF color space resolution
//!
//! Turns the color space descriptors found in a PDF document into
//! executable color models that convert component tuples to display RGB.
//!
//! ## Supported spaces
//!
//! - **Device**: DeviceGray, DeviceRGB, DeviceCMYK (process-wide singletons)
//! - **CIE-based**: CalGray, CalRGB, Lab, ICCBased (profiles via moxcms)
//! - **Special**: Indexed, Separation, DeviceN, Pattern
//!
//! ## Quick Start
//!
//! ```
//! use pdfcolor_core::{ColorSpaceResolver, Object};
//!
//! // [/Indexed /DeviceRGB 1 <FF0000 0000FF>]
//! let palette = Object::array(vec![
//!     Object::name("Indexed"),
//!     Object::name("DeviceRGB"),
//!     Object::int(1),
//!     Object::string(vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF]),
//! ]);
//! let resources = Object::dict([("ColorSpace", Object::dict([("CS0", palette)]))]);
//!
//! let resolver = ColorSpaceResolver::new();
//! let model = resolver
//!     .resolve(&Object::name("CS0"), Some(&resources))?
//!     .expect("CS0 is defined");
//!
//! assert_eq!(model.arity(), 1);
//! assert_eq!(model.to_rgb(&[1.0])?.to_u8(), [0, 0, 255]);
//! # Ok::<(), pdfcolor_core::Error>(())
//! ```
//!
//! Host document models plug in by implementing [`PdfObject`] for their own
//! object handle; [`Object`] is a self-contained in-memory graph.

pub mod cache;
pub mod color;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod function;
pub mod math;
pub mod model;
pub mod object;
pub mod options;
pub mod profile;
pub mod resolver;
pub mod simd;
pub mod transform;

pub use cache::ResolutionCache;
pub use color::{Lab, Rgb, WhitePoint, Xyz};
pub use descriptor::ColorSpaceFamily;
pub use device::{DeviceKind, device_space, device_space_by_code};
pub use error::{Error, Result};
pub use function::{FnFunction, FunctionFactory, StandardFunctions, TransferFunction};
pub use model::ColorModel;
pub use object::{Object, ObjectKind, PdfObject};
pub use options::{IndexPolicy, ResolveOptions};
pub use profile::{IccProfile, ProfileColorSpace};
pub use resolver::ColorSpaceResolver;
pub use transform::RenderingIntent;

/// Version of pdfcolor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
