// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model and per-vertex transform kernel for the Quadra instanced quad
//! rendering stage.
//!
//! A quad instance is a packed record describing one rectangle: position,
//! four corner colors, atlas coordinates for a color and a mask texture,
//! and indices into shared per-batch lookup tables. The kernel in
//! [`kernel`] maps one `(instance, corner)` pair to the clip-space position
//! and interpolated attributes consumed by a downstream per-pixel stage.
//!
//! # Usage
//!
//! This crate holds the pieces shared between batch drivers; most users
//! want `quadra_cpu`, which builds batches from a high-level description
//! and runs the kernel over every vertex.
//!
//! # Features
//!
//! - `std` (enabled by default): Get floating point functions from the
//!   standard library (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
#![cfg_attr(feature = "libm", doc = "[libm]: libm")]
#![cfg_attr(not(feature = "libm"), doc = "[libm]: https://crates.io/crates/libm")]
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]
#![no_std]

// Suppress the unused_crate_dependencies lint when libm is enabled but the
// float functions come from the standard library.
#[cfg(feature = "libm")]
use libm as _;

#[cfg(feature = "std")]
extern crate std;

pub mod clip;
pub mod instance;
pub mod kernel;
pub mod math;
pub mod matrix;
pub mod snap;
pub mod tables;
pub mod vertex;

pub use peniko;
pub use peniko::color;
pub use peniko::kurbo;
