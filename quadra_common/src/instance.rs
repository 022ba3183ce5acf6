// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The packed per-instance record and its attribute decoding.

use bytemuck::{Pod, Zeroable};

/// Mask extracting the table index from the low bits of a packed field.
pub const INDEX_MASK: u32 = 0x7F;

/// Value of the flag bit stored above the index bits.
pub const FLAG_BIT: u32 = 0x80;

/// One instanced rectangle, shared by all four of its corner vertices.
///
/// The record is `#[repr(C)]` and [`Pod`] so a batch of instances can be
/// handed to an execution substrate as raw bytes. Every field is `f32`,
/// including the packed index fields in [`misc`](Self::misc), which hold
/// small non-negative integers.
///
/// The layout of the texture-rectangle fields mirrors the corner order of
/// the color fields: the `top` descriptor carries the two top corners
/// left-to-right, the `bottom` descriptor the two bottom corners
/// right-to-left, so that for an axis-aligned atlas rectangle
/// `color_tex_bottom[2]` always equals `color_tex_top[0]` (both are the
/// left edge). That redundancy is what lets the third bottom component be
/// repurposed as the rotation encoding; see [`Rotation`].
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct QuadInstance {
    /// Rectangle origin (x, y) and size (w, h), in layout pixels.
    ///
    /// Sizes must be positive. A zero-size axis makes the interpolation
    /// parameter of that axis undefined; producers reject such quads.
    pub position_rect: [f32; 4],
    /// Top-left corner color, channels in `[0, 255]`.
    pub color_tl: [f32; 4],
    /// Top-right corner color, channels in `[0, 255]`.
    pub color_tr: [f32; 4],
    /// Bottom-right corner color, channels in `[0, 255]`.
    pub color_br: [f32; 4],
    /// Bottom-left corner color, channels in `[0, 255]`.
    pub color_bl: [f32; 4],
    /// Color-atlas coordinates of the top corners: `(tl.u, tl.v, tr.u, tr.v)`.
    pub color_tex_top: [f32; 4],
    /// Color-atlas coordinates of the bottom corners: `(br.u, br.v, bl.u, bl.v)`.
    ///
    /// The third component doubles as the rotation encoding.
    pub color_tex_bottom: [f32; 4],
    /// Mask-atlas coordinates of the top corners, laid out like
    /// [`color_tex_top`](Self::color_tex_top).
    pub mask_tex_top: [f32; 4],
    /// Mask-atlas coordinates of the bottom corners, laid out like
    /// [`color_tex_bottom`](Self::color_tex_bottom) but with no rotation
    /// overload.
    pub mask_tex_bottom: [f32; 4],
    /// Packed table indices and flags.
    ///
    /// The layout is:
    /// - `misc[0]`: index into the offset table and the transform palette
    ///   (one index, two tables), in the low 7 bits.
    /// - `misc[1]`: index of the inner clip rectangle.
    /// - `misc[2]`: index of the outer clip rectangle.
    /// - `misc[3]`: index into the tile-parameter table in the low 7 bits;
    ///   the bit above (value >= 128) flags border-corner geometry.
    pub misc: [f32; 4],
}

/// Extract the table index stored in the low bits of a packed field.
#[inline]
pub fn low_index(field: f32) -> usize {
    debug_assert!(field >= 0.0, "packed fields are non-negative by contract");
    (field as u32 & INDEX_MASK) as usize
}

/// Whether the flag bit above the index bits of a packed field is set.
#[inline]
pub fn has_high_flag(field: f32) -> bool {
    field >= FLAG_BIT as f32
}

/// Table indices and flags decoded from [`QuadInstance::misc`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadAttributes {
    /// Index into both the offset table and the transform palette.
    pub transform_index: usize,
    /// Index of the inner clip rectangle.
    pub clip_in_index: usize,
    /// Index of the outer clip rectangle.
    pub clip_out_index: usize,
    /// Index into the tile-parameter table.
    pub tile_index: usize,
    /// Whether this instance renders border-corner geometry.
    pub border_corner: bool,
}

impl QuadAttributes {
    /// Decode the packed `misc` field of an instance.
    ///
    /// The clip indices are plain non-negative integers; only fields 0 and
    /// 3 carry the index-plus-flag bit packing.
    pub fn decode(misc: &[f32; 4]) -> Self {
        debug_assert!(
            misc[1] >= 0.0 && misc[2] >= 0.0,
            "clip indices are non-negative by contract"
        );
        Self {
            transform_index: low_index(misc[0]),
            clip_in_index: misc[1] as usize,
            clip_out_index: misc[2] as usize,
            tile_index: low_index(misc[3]),
            border_corner: has_high_flag(misc[3]),
        }
    }

    /// Pack the attributes into a `misc` field.
    ///
    /// Inverse of [`decode`](Self::decode) for indices within the packable
    /// range.
    pub fn pack(&self) -> [f32; 4] {
        debug_assert!(
            self.transform_index <= INDEX_MASK as usize && self.tile_index <= INDEX_MASK as usize,
            "packed indices exceed the 7-bit range"
        );
        let flag = if self.border_corner { FLAG_BIT } else { 0 };
        [
            self.transform_index as f32,
            self.clip_in_index as f32,
            self.clip_out_index as f32,
            (self.tile_index as u32 | flag) as f32,
        ]
    }
}

/// Rotation state of a quad instance.
///
/// On the wire, rotation rides in `color_tex_bottom[2]`: a negative value
/// means the quad is rotated by the value's magnitude (radians, about the
/// rectangle center), and the coordinate that slot would otherwise hold is
/// recovered from `color_tex_top[0]`. The tagged form exists so that
/// everything above the wire format can ignore the overload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Rotation {
    /// Axis-aligned; the inner clip is applied by the vertex stage.
    None,
    /// Rotated by the angle in radians; inner clipping is deferred to the
    /// per-pixel stage.
    Angle(f32),
}

impl Rotation {
    /// Decode the wire value of the dual-purpose coordinate field.
    ///
    /// The test is strict negativity, so an encoded angle of zero decodes
    /// as `None`.
    #[inline]
    pub fn from_encoded(encoded: f32) -> Self {
        if encoded < 0.0 {
            Self::Angle(-encoded)
        } else {
            Self::None
        }
    }

    /// The wire value of the field, given the coordinate it would
    /// otherwise hold.
    #[inline]
    pub fn to_encoded(self, coord: f32) -> f32 {
        match self {
            Self::None => coord,
            Self::Angle(angle) => -angle,
        }
    }
}
