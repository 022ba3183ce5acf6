// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-vertex transform kernel.
//!
//! A pure, allocation-free mapping from one `(instance, corner)` pair to
//! the output attributes of that vertex. All four corners of an instance
//! are computed independently; there is no cross-vertex state, so a batch
//! driver may evaluate vertices in any order or in parallel.

use crate::clip::ClipRect;
use crate::instance::{QuadAttributes, QuadInstance, Rotation};
use crate::math::{bilerp2, bilerp4};
use crate::snap::snap_point;
use crate::tables::QuadTables;
use crate::vertex::{Corner, QuadVertex, border_corner_color};

#[cfg(not(feature = "std"))]
use peniko::kurbo::common::FloatFuncs as _;

/// Wire color channels are stored in `[0, 255]`.
const CHANNEL_SCALE: f32 = 255.0;

/// Transform one corner vertex of one instance.
///
/// `second_triangle` identifies which of the quad's two triangles the
/// vertex is emitted for. The canonical decomposition splits along the
/// top-left/bottom-right diagonal: `(TopLeft, TopRight, BottomRight)`
/// first, then `(TopLeft, BottomRight, BottomLeft)`. Callers with a
/// different rasterization setup must map their own provoking-vertex
/// convention onto this flag; it only affects border-corner geometry.
///
/// The instance must satisfy the producer contract: positive sizes (the
/// interpolation parameter divides by them), non-negative packed indices,
/// and indices within the bound tables. Violations are caught by debug
/// assertions, not by an error return.
pub fn transform_vertex(
    instance: &QuadInstance,
    corner: Corner,
    second_triangle: bool,
    tables: &QuadTables<'_>,
) -> QuadVertex {
    let attrs = QuadAttributes::decode(&instance.misc);

    // Snap the offset rectangle origin to the device pixel grid. The size
    // passes through unchanged.
    let [x, y, w, h] = instance.position_rect;
    let offset = tables.offset(attrs.transform_index);
    let origin = snap_point(
        [x + offset[0], y + offset[1]],
        tables.device_pixel_ratio,
        tables.snap_mode,
    );
    let size = [w, h];

    let mut local = corner.position(origin, size);

    // Resolve the two geometric modes. An axis-aligned quad is clipped
    // here and now; a rotated quad keeps its corners and hands the inner
    // clip to the per-pixel stage, since its edges no longer line up with
    // the clip axes.
    let mut color_tex_bottom = instance.color_tex_bottom;
    let clip_in_rect = match Rotation::from_encoded(color_tex_bottom[2]) {
        Rotation::Angle(angle) => {
            let center = [origin[0] + size[0] * 0.5, origin[1] + size[1] * 0.5];
            let (sin, cos) = (angle.sin(), angle.cos());
            let dx = local[0] - center[0];
            let dy = local[1] - center[1];
            local = [
                center[0] + dx * cos - dy * sin,
                center[1] + dx * sin + dy * cos,
            ];
            // The angle rides in the slot of a coordinate that always
            // equals the left edge of the top descriptor; restore it
            // before interpolating.
            color_tex_bottom[2] = instance.color_tex_top[0];
            tables.clip_rect(attrs.clip_in_index)
        }
        Rotation::None => {
            local = tables.clip_rect(attrs.clip_in_index).clamp_point(local);
            ClipRect::UNBOUNDED
        }
    };

    // Interpolation parameter across the (snapped) rectangle.
    let st = [
        (local[0] - origin[0]) / size[0],
        (local[1] - origin[1]) / size[1],
    ];

    let color_tex_coord = bilerp2(
        [instance.color_tex_top[0], instance.color_tex_top[1]],
        [instance.color_tex_top[2], instance.color_tex_top[3]],
        [color_tex_bottom[0], color_tex_bottom[1]],
        [color_tex_bottom[2], color_tex_bottom[3]],
        st,
    );

    let mask = bilerp2(
        [instance.mask_tex_top[0], instance.mask_tex_top[1]],
        [instance.mask_tex_top[2], instance.mask_tex_top[3]],
        [instance.mask_tex_bottom[0], instance.mask_tex_bottom[1]],
        [instance.mask_tex_bottom[2], instance.mask_tex_bottom[3]],
        st,
    );
    let mask_tex_coord = [
        mask[0] / tables.atlas_tile_size[0],
        mask[1] / tables.atlas_tile_size[1],
    ];

    let color = if attrs.border_corner {
        border_corner_color(corner, second_triangle, instance.color_tr, instance.color_bl)
    } else {
        bilerp4(
            instance.color_tl,
            instance.color_tr,
            instance.color_br,
            instance.color_bl,
            st,
        )
    };
    let color = color.map(|c| c / CHANNEL_SCALE);

    let world = tables.transform(attrs.transform_index).transform_point(local);
    let position = tables.projection.transform_vec4(world);

    QuadVertex {
        position,
        local_position: local,
        color,
        color_tex_coord,
        mask_tex_coord,
        clip_out_rect: tables.clip_rect(attrs.clip_out_index),
        clip_in_rect,
        tile_params: tables.tile_params(attrs.tile_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix4;
    use crate::snap::SnapMode;
    use crate::tables::TileParams;
    use core::f32::consts::FRAC_PI_2;

    const COLOR_TL: [f32; 4] = [255.0, 0.0, 0.0, 255.0];
    const COLOR_TR: [f32; 4] = [0.0, 255.0, 0.0, 255.0];
    const COLOR_BR: [f32; 4] = [0.0, 0.0, 255.0, 255.0];
    const COLOR_BL: [f32; 4] = [255.0, 255.0, 0.0, 255.0];

    const TILE_PARAMS: [TileParams; 2] = [
        TileParams {
            origin: [0.0, 0.0],
            size: [0.0, 0.0],
        },
        TileParams {
            origin: [4.0, 8.0],
            size: [16.0, 16.0],
        },
    ];
    const CLIP_RECTS: [ClipRect; 2] = [
        ClipRect::new(0.0, 0.0, 1000.0, 1000.0),
        ClipRect::new(12.0, 12.0, 28.0, 28.0),
    ];
    const OFFSETS: [[f32; 2]; 2] = [[0.0, 0.0], [5.0, 5.0]];
    const TRANSFORMS: [Matrix4; 2] = [Matrix4::IDENTITY, Matrix4::IDENTITY];

    fn tables() -> QuadTables<'static> {
        QuadTables {
            tile_params: &TILE_PARAMS,
            clip_rects: &CLIP_RECTS,
            offsets: &OFFSETS,
            transforms: &TRANSFORMS,
            atlas_tile_size: [2.0, 4.0],
            device_pixel_ratio: 1.0,
            projection: Matrix4::IDENTITY,
            snap_mode: SnapMode::Round,
        }
    }

    fn instance() -> QuadInstance {
        QuadInstance {
            position_rect: [10.0, 10.0, 20.0, 20.0],
            color_tl: COLOR_TL,
            color_tr: COLOR_TR,
            color_br: COLOR_BR,
            color_bl: COLOR_BL,
            color_tex_top: [0.0, 0.0, 1.0, 0.0],
            color_tex_bottom: [1.0, 1.0, 0.0, 1.0],
            mask_tex_top: [0.0, 0.0, 2.0, 0.0],
            mask_tex_bottom: [2.0, 4.0, 0.0, 4.0],
            misc: [0.0, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn corner_colors_are_exact() {
        let tables = tables();
        let instance = instance();
        let expected = [COLOR_TL, COLOR_TR, COLOR_BL, COLOR_BR];
        for (corner, expected) in Corner::ALL.into_iter().zip(expected) {
            let vertex = transform_vertex(&instance, corner, false, &tables);
            assert_eq!(vertex.color, expected.map(|c| c / 255.0), "{corner:?}");
        }
    }

    #[test]
    fn bottom_right_end_to_end() {
        let tables = tables();
        let vertex = transform_vertex(&instance(), Corner::BottomRight, false, &tables);
        assert_eq!(vertex.local_position, [30.0, 30.0]);
        assert_eq!(vertex.color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(vertex.color_tex_coord, [1.0, 1.0]);
        // Mask coordinate (2, 4) normalized by the (2, 4) tile size.
        assert_eq!(vertex.mask_tex_coord, [1.0, 1.0]);
        assert_eq!(vertex.position, [30.0, 30.0, 0.0, 1.0]);
        assert!(vertex.clip_in_rect.is_unbounded());
        assert_eq!(vertex.clip_out_rect, CLIP_RECTS[0]);
    }

    #[test]
    fn snapping_applies_offset_then_rounds() {
        let mut tables = tables();
        tables.device_pixel_ratio = 2.0;
        let mut instance = instance();
        instance.position_rect = [10.2, 10.2, 20.0, 20.0];
        // misc[0] = 1 selects the (5, 5) offset.
        instance.misc[0] = 1.0;
        let vertex = transform_vertex(&instance, Corner::TopLeft, false, &tables);
        // 15.2 snaps to 15.0 at two device pixels per layout pixel.
        assert_eq!(vertex.local_position, [15.0, 15.0]);
    }

    #[test]
    fn axis_aligned_quad_is_clamped_now() {
        let mut instance = instance();
        // Inner clip 1 is (12, 12)..(28, 28).
        instance.misc[1] = 1.0;
        let tables = tables();
        let tl = transform_vertex(&instance, Corner::TopLeft, false, &tables);
        let br = transform_vertex(&instance, Corner::BottomRight, false, &tables);
        assert_eq!(tl.local_position, [12.0, 12.0]);
        assert_eq!(br.local_position, [28.0, 28.0]);
        // The clip was applied, so the output carries the sentinel.
        assert!(tl.clip_in_rect.is_unbounded());
        // And the interpolation parameter follows the clamped position.
        assert_eq!(tl.color_tex_coord, [0.1, 0.1]);
    }

    #[test]
    fn rotated_quad_defers_clipping() {
        let mut instance = instance();
        instance.misc[1] = 1.0;
        instance.color_tex_bottom[2] = -FRAC_PI_2;
        let tables = tables();
        let vertex = transform_vertex(&instance, Corner::BottomRight, false, &tables);
        // (30, 30) rotated a quarter turn about (20, 20).
        assert!((vertex.local_position[0] - 10.0).abs() < 1e-4);
        assert!((vertex.local_position[1] - 30.0).abs() < 1e-4);
        // Clipping is deferred: the inner clip passes through unmodified.
        assert_eq!(vertex.clip_in_rect, CLIP_RECTS[1]);
    }

    #[test]
    fn rotation_restores_overloaded_coordinate() {
        let mut instance = instance();
        instance.color_tex_bottom[2] = -FRAC_PI_2;
        let tables = tables();
        // The bottom-left corner of a quarter-turned quad lands where the
        // bottom-right corner was, so its atlas coordinate must
        // interpolate to the restored bottom-left corner value.
        let vertex = transform_vertex(&instance, Corner::BottomLeft, false, &tables);
        assert!((vertex.local_position[0] - 10.0).abs() < 1e-4);
        assert!((vertex.local_position[1] - 10.0).abs() < 1e-4);
        let st = [
            (vertex.local_position[0] - 10.0) / 20.0,
            (vertex.local_position[1] - 10.0) / 20.0,
        ];
        assert!(st[0].abs() < 1e-5 && st[1].abs() < 1e-5);
        // st ~ (0, 0) maps to the top-left atlas corner.
        assert!((vertex.color_tex_coord[0]).abs() < 1e-4);
        assert!((vertex.color_tex_coord[1]).abs() < 1e-4);
    }

    #[test]
    fn zero_angle_takes_the_axis_aligned_path() {
        let mut instance = instance();
        instance.color_tex_bottom[2] = Rotation::Angle(0.0).to_encoded(0.0);
        instance.misc[1] = 1.0;
        let tables = tables();
        let vertex = transform_vertex(&instance, Corner::TopLeft, false, &tables);
        assert!(vertex.clip_in_rect.is_unbounded());
        assert_eq!(vertex.local_position, [12.0, 12.0]);
    }

    #[test]
    fn border_corner_ignores_interpolation() {
        let mut instance = instance();
        // Tile index 1 with the border-corner flag.
        instance.misc[3] = 129.0;
        let tables = tables();
        let tr = COLOR_TR.map(|c| c / 255.0);
        let bl = COLOR_BL.map(|c| c / 255.0);
        for corner in Corner::ALL {
            let first = transform_vertex(&instance, corner, false, &tables);
            let second = transform_vertex(&instance, corner, true, &tables);
            let expected_first = if corner == Corner::BottomLeft { bl } else { tr };
            let expected_second = if corner == Corner::TopRight { tr } else { bl };
            assert_eq!(first.color, expected_first, "{corner:?}");
            assert_eq!(second.color, expected_second, "{corner:?}");
        }
        // The flag also carries the tile index in its low bits.
        let vertex = transform_vertex(&instance, Corner::TopLeft, false, &tables);
        assert_eq!(vertex.tile_params, TILE_PARAMS[1]);
    }

    #[test]
    fn projection_and_palette_are_applied_in_order() {
        let translate = Matrix4::from_affine(&crate::kurbo::Affine::translate((100.0, 0.0)));
        let transforms = [translate];
        let mut tables = tables();
        tables.transforms = &transforms;
        tables.projection = Matrix4::ortho(0.0, 200.0, 200.0, 0.0, -1.0, 1.0);
        let vertex = transform_vertex(&instance(), Corner::TopLeft, false, &tables);
        // Local (10, 10), translated to (110, 10), then projected.
        assert_eq!(vertex.local_position, [10.0, 10.0]);
        assert!((vertex.position[0] - 0.1).abs() < 1e-6);
        assert!((vertex.position[1] - 0.9).abs() < 1e-6);
        assert_eq!(vertex.position[3], 1.0);
    }
}
