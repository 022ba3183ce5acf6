// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned clip rectangles.

use bytemuck::{Pod, Zeroable};
use peniko::kurbo::Rect;

/// An axis-aligned clip rectangle.
///
/// The outer clip is always tested by the per-pixel stage. The inner clip
/// is applied by the vertex stage when the quad is axis-aligned; a rotated
/// quad's edges no longer line up with the clip axes, so the vertex stage
/// passes the rectangle through and the per-pixel stage tests it instead.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ClipRect {
    /// Minimum corner (x0, y0).
    pub p0: [f32; 2],
    /// Maximum corner (x1, y1).
    pub p1: [f32; 2],
}

impl ClipRect {
    /// Sentinel rectangle covering effectively all of space.
    ///
    /// Emitted in place of the inner clip once it has already been applied,
    /// telling the per-pixel stage to skip inner-clip testing. The bounds
    /// stay well inside the f32 range so consumers can still do arithmetic
    /// on them.
    pub const UNBOUNDED: Self = Self {
        p0: [-1.0e9, -1.0e9],
        p1: [1.0e9, 1.0e9],
    };

    /// Create a clip rectangle from its edge coordinates.
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            p0: [x0, y0],
            p1: [x1, y1],
        }
    }

    /// Create a clip rectangle from a kurbo rectangle.
    pub fn from_kurbo(rect: &Rect) -> Self {
        Self::new(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
    }

    /// Clamp a point into the rectangle, component-wise.
    #[inline]
    pub fn clamp_point(&self, p: [f32; 2]) -> [f32; 2] {
        [
            p[0].clamp(self.p0[0], self.p1[0]),
            p[1].clamp(self.p0[1], self.p1[1]),
        ]
    }

    /// Whether this is the sentinel emitted for an already-applied clip.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }
}
