// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared per-batch lookup tables.

use crate::clip::ClipRect;
use crate::matrix::Matrix4;
use crate::snap::SnapMode;
use bytemuck::{Pod, Zeroable};

/// Number of entries addressable by a packed 7-bit table index.
///
/// Tables indexed by packed fields must either have at least this many
/// entries or have every index range-checked by the producer.
pub const TABLE_LEN: usize = 128;

/// Tiling parameters selected per instance and forwarded to the per-pixel
/// stage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TileParams {
    /// Origin of the repeated tile in atlas space.
    pub origin: [f32; 2],
    /// Size of the repeated tile.
    pub size: [f32; 2],
}

/// Read-only lookup tables shared by every instance of a draw batch.
///
/// The tables must not be mutated while a batch referencing them is being
/// transformed; every vertex of the batch observes this one snapshot.
/// Borrowing them immutably for the duration of the transform is what
/// makes the batch embarrassingly parallel.
#[derive(Copy, Clone, Debug)]
pub struct QuadTables<'a> {
    /// Per-instance tiling parameters.
    pub tile_params: &'a [TileParams],
    /// Clip rectangles, shared by the inner and outer clip indices.
    pub clip_rects: &'a [ClipRect],
    /// Per-instance positional offsets.
    pub offsets: &'a [[f32; 2]],
    /// Per-instance transform palette.
    pub transforms: &'a [Matrix4],
    /// Mask-atlas tile size; mask coordinates are divided by it.
    pub atlas_tile_size: [f32; 2],
    /// Device pixels per layout pixel.
    pub device_pixel_ratio: f32,
    /// Global projection applied after the palette transform.
    pub projection: Matrix4,
    /// Rounding flavor used for pixel snapping.
    pub snap_mode: SnapMode,
}

impl QuadTables<'_> {
    /// The tiling parameters at `index`.
    #[inline]
    pub fn tile_params(&self, index: usize) -> TileParams {
        debug_assert!(index < self.tile_params.len(), "tile index out of range");
        self.tile_params[index]
    }

    /// The clip rectangle at `index`.
    #[inline]
    pub fn clip_rect(&self, index: usize) -> ClipRect {
        debug_assert!(index < self.clip_rects.len(), "clip index out of range");
        self.clip_rects[index]
    }

    /// The positional offset at `index`.
    #[inline]
    pub fn offset(&self, index: usize) -> [f32; 2] {
        debug_assert!(index < self.offsets.len(), "offset index out of range");
        self.offsets[index]
    }

    /// The palette transform at `index`.
    #[inline]
    pub fn transform(&self, index: usize) -> Matrix4 {
        debug_assert!(index < self.transforms.len(), "transform index out of range");
        self.transforms[index]
    }
}
