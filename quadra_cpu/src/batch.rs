// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building and transforming instance batches.

use crate::error::BatchError;
use quadra_common::instance::{QuadAttributes, QuadInstance, Rotation};
use quadra_common::kernel::transform_vertex;
use quadra_common::kurbo::Rect;
use quadra_common::peniko::Color;
use quadra_common::tables::{QuadTables, TABLE_LEN};
use quadra_common::vertex::{Corner, QuadVertex};

/// Corner order of the two triangles every instance expands to.
///
/// The quad splits along its top-left/bottom-right diagonal; the first
/// three entries form the first triangle. Border-corner geometry colors
/// the two triangles independently, so callers feeding the expanded
/// vertices to a rasterizer must preserve this grouping.
pub const TRIANGLE_CORNERS: [Corner; 6] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomRight,
    Corner::TopLeft,
    Corner::BottomRight,
    Corner::BottomLeft,
];

/// Number of vertices emitted per instance.
pub const VERTICES_PER_QUAD: usize = TRIANGLE_CORNERS.len();

/// A single rectangle to be added to a batch.
#[derive(Clone, Debug)]
pub struct Quad {
    /// Position and size, in layout pixels.
    pub rect: Rect,
    /// Corner colors: top-left, top-right, bottom-right, bottom-left.
    pub colors: [Color; 4],
    /// Color-atlas rectangle.
    pub color_tex: Rect,
    /// Mask-atlas rectangle.
    pub mask_tex: Rect,
    /// Rotation about the rectangle center.
    pub rotation: Rotation,
    /// Index into the offset table and the transform palette.
    pub transform_index: usize,
    /// Index of the inner clip rectangle.
    pub clip_in_index: usize,
    /// Index of the outer clip rectangle.
    pub clip_out_index: usize,
    /// Index into the tile-parameter table.
    pub tile_index: usize,
    /// Render as border-corner geometry: a crisp two-color diagonal split
    /// instead of a bilinear blend.
    pub border_corner: bool,
}

/// The two wire descriptors of an axis-aligned atlas rectangle: the top
/// corners left-to-right, the bottom corners right-to-left.
fn tex_descriptors(rect: &Rect) -> ([f32; 4], [f32; 4]) {
    let (x0, y0, x1, y1) = (rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32);
    ([x0, y0, x1, y0], [x1, y1, x0, y1])
}

/// Scale color components from `[0, 1]` to the wire's `[0, 255]` range.
///
/// Out-of-range components are passed through unclamped; the consumer is
/// expected to clamp if it cares.
fn channels(color: Color) -> [f32; 4] {
    color.components.map(|c| c * 255.0)
}

fn ensure_finite(values: &[f32], field: &'static str) -> Result<(), BatchError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(BatchError::NonFiniteField { field })
    }
}

fn ensure_packable(index: usize) -> Result<(), BatchError> {
    if index >= TABLE_LEN {
        Err(BatchError::IndexOutOfRange {
            index,
            limit: TABLE_LEN,
        })
    } else {
        Ok(())
    }
}

/// A batch of packed quad instances sharing one table snapshot.
#[derive(Clone, Debug, Default)]
pub struct QuadBatch {
    instances: Vec<QuadInstance>,
}

impl QuadBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch from already-packed instance records.
    ///
    /// The records are trusted as far as [`push`](Self::push)'s checks go;
    /// run [`validate`](Self::validate) before transforming if they come
    /// from an untrusted producer.
    pub fn from_instances(instances: Vec<QuadInstance>) -> Self {
        Self { instances }
    }

    /// Number of instances in the batch.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the batch contains no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The packed instance records.
    pub fn instances(&self) -> &[QuadInstance] {
        &self.instances
    }

    /// The packed instance records as raw bytes, for handing the batch to
    /// an execution substrate.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Pack a quad and append it to the batch.
    ///
    /// Rejects quads that would violate the kernel's producer contract:
    /// indices outside the packable range, non-positive rectangle extents,
    /// and non-finite coordinates or angles.
    pub fn push(&mut self, quad: &Quad) -> Result<(), BatchError> {
        let result = self.try_push(quad);
        if let Err(err) = &result {
            log::warn!("rejected quad: {err}");
        }
        result
    }

    fn try_push(&mut self, quad: &Quad) -> Result<(), BatchError> {
        let (width, height) = (quad.rect.width() as f32, quad.rect.height() as f32);
        ensure_finite(
            &[
                quad.rect.x0 as f32,
                quad.rect.y0 as f32,
                width,
                height,
            ],
            "position rect",
        )?;
        if width <= 0.0 || height <= 0.0 {
            return Err(BatchError::DegenerateRect { width, height });
        }

        ensure_packable(quad.transform_index)?;
        ensure_packable(quad.clip_in_index)?;
        ensure_packable(quad.clip_out_index)?;
        ensure_packable(quad.tile_index)?;

        let (color_tex_top, mut color_tex_bottom) = tex_descriptors(&quad.color_tex);
        let (mask_tex_top, mask_tex_bottom) = tex_descriptors(&quad.mask_tex);
        ensure_finite(&color_tex_top, "color tex rect")?;
        ensure_finite(&color_tex_bottom, "color tex rect")?;
        ensure_finite(&mask_tex_top, "mask tex rect")?;
        ensure_finite(&mask_tex_bottom, "mask tex rect")?;
        if let Rotation::Angle(angle) = quad.rotation {
            ensure_finite(&[angle], "rotation angle")?;
        }
        // The rotation encoding rides in the third bottom component; its
        // coordinate is recoverable from the top descriptor.
        color_tex_bottom[2] = quad.rotation.to_encoded(color_tex_bottom[2]);

        let misc = QuadAttributes {
            transform_index: quad.transform_index,
            clip_in_index: quad.clip_in_index,
            clip_out_index: quad.clip_out_index,
            tile_index: quad.tile_index,
            border_corner: quad.border_corner,
        }
        .pack();

        self.instances.push(QuadInstance {
            position_rect: [
                quad.rect.x0 as f32,
                quad.rect.y0 as f32,
                width,
                height,
            ],
            color_tl: channels(quad.colors[0]),
            color_tr: channels(quad.colors[1]),
            color_br: channels(quad.colors[2]),
            color_bl: channels(quad.colors[3]),
            color_tex_top,
            color_tex_bottom,
            mask_tex_top,
            mask_tex_bottom,
            misc,
        });
        Ok(())
    }

    /// Check every packed instance against the actual table lengths.
    ///
    /// Returns the first violation. [`push`](Self::push) bounds indices
    /// against the packable range only; tables shorter than that range are
    /// legal as long as no instance reaches past them, which is what this
    /// verifies.
    pub fn validate(&self, tables: &QuadTables<'_>) -> Result<(), BatchError> {
        for (i, instance) in self.instances.iter().enumerate() {
            let attrs = QuadAttributes::decode(&instance.misc);
            let checks = [
                ("offset", tables.offsets.len(), attrs.transform_index),
                ("transform", tables.transforms.len(), attrs.transform_index),
                ("clip", tables.clip_rects.len(), attrs.clip_in_index),
                ("clip", tables.clip_rects.len(), attrs.clip_out_index),
                ("tile", tables.tile_params.len(), attrs.tile_index),
            ];
            for (table, len, index) in checks {
                if index >= len {
                    let err = BatchError::TableTooSmall {
                        table,
                        len,
                        index,
                        instance: i,
                    };
                    log::warn!("invalid batch: {err}");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Transform every vertex of the batch.
    ///
    /// Each instance expands to the six vertices of [`TRIANGLE_CORNERS`],
    /// in batch order. The tables are borrowed for the whole call; they
    /// must not change underneath it.
    pub fn transform(&self, tables: &QuadTables<'_>) -> Vec<QuadVertex> {
        let mut out = Vec::with_capacity(self.instances.len() * VERTICES_PER_QUAD);
        for instance in &self.instances {
            out.extend(expand(instance, tables));
        }
        out
    }

    /// Like [`transform`](Self::transform), but parallel over instances.
    ///
    /// Produces the same vertices in the same order.
    #[cfg(feature = "multithreading")]
    pub fn transform_par(&self, tables: &QuadTables<'_>) -> Vec<QuadVertex> {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        self.instances
            .par_iter()
            .flat_map_iter(|instance| expand(instance, tables))
            .collect()
    }
}

/// Expand one instance into its six triangle-list vertices.
fn expand(instance: &QuadInstance, tables: &QuadTables<'_>) -> [QuadVertex; 6] {
    std::array::from_fn(|i| transform_vertex(instance, TRIANGLE_CORNERS[i], i >= 3, tables))
}
