// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU batch driver for the Quadra quad vertex stage.
//!
//! This crate owns the producer side of the vertex-stage contract: it
//! packs high-level [`Quad`] descriptions into wire-format instance
//! records, validates them against the bound lookup tables, and runs the
//! per-vertex kernel over every vertex of a batch — serially, or in
//! parallel with the `multithreading` feature.
//!
//! # Features
//!
//! - `std` (enabled by default): Get floating point functions from the
//!   standard library (likely using your target's libc).
//! - `libm`: Use floating point implementations from libm.
//! - `multithreading`: Enable multi-threaded batch transforms.

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

mod batch;
mod error;

pub use batch::{Quad, QuadBatch, TRIANGLE_CORNERS, VERTICES_PER_QUAD};
pub use error::BatchError;

pub use quadra_common::instance::{QuadInstance, Rotation};
pub use quadra_common::kernel::transform_vertex;
pub use quadra_common::snap::SnapMode;
pub use quadra_common::tables::{QuadTables, TileParams};
pub use quadra_common::vertex::{Corner, QuadVertex};
