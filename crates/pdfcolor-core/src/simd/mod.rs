//! Batch kernels with runtime CPU dispatch
//!
//! Functions here are compiled for several instruction sets with
//! `multiversion` and pick the best one at runtime. The scalar fallback is
//! always available.

mod batch;

pub use batch::unit_f32_to_u8_batch;
