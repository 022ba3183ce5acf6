// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Producer-contract violations.

use thiserror::Error;

/// Errors detected while building or validating a batch.
///
/// The vertex kernel itself has no error channel; everything that would
/// make it misbehave is caught here, at the producer boundary, before the
/// batch is transformed.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum BatchError {
    /// A table index does not fit the packable index range.
    #[error("table index {index} exceeds the packable range 0..{limit}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// One past the largest packable index.
        limit: usize,
    },
    /// A packed index points past the end of a bound table.
    #[error("{table} table has {len} entries but instance {instance} uses index {index}")]
    TableTooSmall {
        /// Name of the undersized table.
        table: &'static str,
        /// Number of entries the table actually has.
        len: usize,
        /// The out-of-range index.
        index: usize,
        /// Position of the offending instance in the batch.
        instance: usize,
    },
    /// A rectangle has a non-positive extent on some axis.
    ///
    /// Zero-size rectangles make the interpolation parameter of the
    /// degenerate axis undefined and must be rejected upstream.
    #[error("rectangle of size {width}x{height} has a non-positive extent")]
    DegenerateRect {
        /// Rectangle width.
        width: f32,
        /// Rectangle height.
        height: f32,
    },
    /// A coordinate, channel, or angle is NaN or infinite.
    #[error("non-finite value in {field}")]
    NonFiniteField {
        /// Name of the offending field.
        field: &'static str,
    },
}
