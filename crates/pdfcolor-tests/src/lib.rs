//! # pdfcolor-tests
//!
//! Integration and reference parity tests for pdfcolor.
//!
//! This crate provides:
//! - Descriptor fixtures built on the in-memory object graph
//! - Reference conversions through lcms2 and palette
//! - Accuracy measurement using deltaE2000
//! - Seeded component generators
//!
//! ## Reference Implementations
//!
//! - **lcms2**: ICC transforms and profile bytes for ICCBased spaces
//! - **palette**: CIELAB → sRGB for Lab spaces

pub mod accuracy;
pub mod fixtures;
pub mod reference;
pub mod samples;

pub use accuracy::{DeltaEStats, compare_rgb_buffers, delta_e_2000};
