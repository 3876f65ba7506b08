//! Color types used by the calibrated models
//!
//! This module provides:
//! - CIE XYZ
//! - CIELAB (L*a*b*)
//! - Display RGB output
//! - White point definitions

pub mod lab;
pub mod rgb;
pub mod white_point;
pub mod xyz;

pub use lab::Lab;
pub use rgb::Rgb;
pub use white_point::{D50, D65, WhitePoint};
pub use xyz::Xyz;
