// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad corners and the per-vertex output record.

use crate::clip::ClipRect;
use crate::tables::TileParams;
use bytemuck::{Pod, Zeroable};

/// One corner of a quad.
///
/// The 2-bit vertex index encodes the corner as a flag pair: bit 0 selects
/// the right edge, bit 1 the bottom edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Corner {
    /// Vertex index 0.
    TopLeft,
    /// Vertex index 1.
    TopRight,
    /// Vertex index 2.
    BottomLeft,
    /// Vertex index 3.
    BottomRight,
}

impl Corner {
    /// All four corners, in vertex-index order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The corner for a vertex index in `0..4`.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[usize::from(index & 3)]
    }

    /// The vertex index of this corner.
    #[inline]
    pub fn index(self) -> u8 {
        u8::from(self.is_right()) | (u8::from(self.is_bottom()) << 1)
    }

    /// Whether this corner lies on the right edge of the rectangle.
    #[inline]
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Whether this corner lies on the bottom edge of the rectangle.
    #[inline]
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    /// The local position of this corner for a rectangle with the given
    /// origin and size.
    #[inline]
    pub fn position(self, origin: [f32; 2], size: [f32; 2]) -> [f32; 2] {
        [
            origin[0] + if self.is_right() { size[0] } else { 0.0 },
            origin[1] + if self.is_bottom() { size[1] } else { 0.0 },
        ]
    }
}

/// The exact corner color used for border-corner geometry.
///
/// Border corners split the quad into two solid-color triangles along the
/// top-left/bottom-right diagonal: the first triangle is uniformly the
/// top-right color, the second uniformly the bottom-left color. The two
/// diagonal corners belong to both triangles and take the color of
/// whichever triangle the vertex is emitted for.
#[inline]
pub fn border_corner_color(
    corner: Corner,
    second_triangle: bool,
    color_tr: [f32; 4],
    color_bl: [f32; 4],
) -> [f32; 4] {
    match (corner, second_triangle) {
        (Corner::TopRight, _) => color_tr,
        (Corner::BottomLeft, _) => color_bl,
        (_, false) => color_tr,
        (_, true) => color_bl,
    }
}

/// Attributes produced for one vertex, consumed by the per-pixel stage.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct QuadVertex {
    /// Final clip-space position.
    pub position: [f32; 4],
    /// Pre-projection position, used downstream to test the deferred
    /// inner clip.
    pub local_position: [f32; 2],
    /// Resolved color, channels normalized to `[0, 1]`.
    pub color: [f32; 4],
    /// Interpolated color-atlas coordinate.
    pub color_tex_coord: [f32; 2],
    /// Interpolated mask-atlas coordinate, normalized by the atlas tile
    /// size.
    pub mask_tex_coord: [f32; 2],
    /// Outer clip rectangle, always tested by the per-pixel stage.
    pub clip_out_rect: ClipRect,
    /// Inner clip rectangle, or [`ClipRect::UNBOUNDED`] when the clip was
    /// already applied by the vertex stage.
    pub clip_in_rect: ClipRect,
    /// Tiling parameters selected for this instance.
    pub tile_params: TileParams,
}
