// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end batch transforms through the public API.

use quadra_common::clip::ClipRect;
use quadra_common::kurbo::Rect;
use quadra_common::matrix::Matrix4;
use quadra_common::peniko::Color;
use quadra_cpu::{
    Corner, Quad, QuadBatch, QuadTables, Rotation, SnapMode, TRIANGLE_CORNERS, TileParams,
};
use std::f32::consts::FRAC_PI_2;

const TILE_PARAMS: [TileParams; 1] = [TileParams {
    origin: [0.0, 0.0],
    size: [32.0, 32.0],
}];
const CLIP_RECTS: [ClipRect; 2] = [
    ClipRect::new(0.0, 0.0, 1000.0, 1000.0),
    ClipRect::new(12.0, 12.0, 28.0, 28.0),
];
const OFFSETS: [[f32; 2]; 1] = [[0.0, 0.0]];
const TRANSFORMS: [Matrix4; 1] = [Matrix4::IDENTITY];

fn tables() -> QuadTables<'static> {
    QuadTables {
        tile_params: &TILE_PARAMS,
        clip_rects: &CLIP_RECTS,
        offsets: &OFFSETS,
        transforms: &TRANSFORMS,
        atlas_tile_size: [1.0, 1.0],
        device_pixel_ratio: 1.0,
        projection: Matrix4::IDENTITY,
        snap_mode: SnapMode::Round,
    }
}

fn quad() -> Quad {
    Quad {
        rect: Rect::new(10.0, 10.0, 30.0, 30.0),
        colors: [
            Color::new([1.0, 0.0, 0.0, 1.0]),
            Color::new([0.0, 1.0, 0.0, 1.0]),
            Color::new([0.0, 0.0, 1.0, 1.0]),
            Color::new([1.0, 1.0, 0.0, 1.0]),
        ],
        color_tex: Rect::new(0.0, 0.0, 1.0, 1.0),
        mask_tex: Rect::new(0.0, 0.0, 1.0, 1.0),
        rotation: Rotation::None,
        transform_index: 0,
        clip_in_index: 0,
        clip_out_index: 0,
        tile_index: 0,
        border_corner: false,
    }
}

fn vertex_of(vertices: &[quadra_cpu::QuadVertex], corner: Corner) -> &quadra_cpu::QuadVertex {
    let i = TRIANGLE_CORNERS.iter().position(|&c| c == corner).unwrap();
    &vertices[i]
}

#[test]
fn axis_aligned_quad_end_to_end() {
    let mut batch = QuadBatch::new();
    batch.push(&quad()).unwrap();
    batch.validate(&tables()).unwrap();

    let vertices = batch.transform(&tables());
    let br = vertex_of(&vertices, Corner::BottomRight);
    assert_eq!(br.local_position, [30.0, 30.0]);
    assert_eq!(br.position, [30.0, 30.0, 0.0, 1.0]);
    // The bottom-right corner takes the bottom-right color exactly.
    assert_eq!(br.color, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(br.color_tex_coord, [1.0, 1.0]);
    assert!(br.clip_in_rect.is_unbounded());
    assert_eq!(br.clip_out_rect, CLIP_RECTS[0]);

    let tl = vertex_of(&vertices, Corner::TopLeft);
    assert_eq!(tl.color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(tl.color_tex_coord, [0.0, 0.0]);
}

#[test]
fn rotated_quad_end_to_end() {
    let mut batch = QuadBatch::new();
    batch
        .push(&Quad {
            rotation: Rotation::Angle(FRAC_PI_2),
            clip_in_index: 1,
            ..quad()
        })
        .unwrap();

    let vertices = batch.transform(&tables());
    let br = vertex_of(&vertices, Corner::BottomRight);
    // A quarter turn about the center (20, 20) carries (30, 30) to (10, 30).
    assert!((br.local_position[0] - 10.0).abs() < 1e-4);
    assert!((br.local_position[1] - 30.0).abs() < 1e-4);
    // Clipping is deferred: the inner clip passes through for the
    // per-pixel stage to apply.
    assert_eq!(br.clip_in_rect, CLIP_RECTS[1]);
    assert!(!br.clip_in_rect.is_unbounded());
}

#[test]
fn inner_clip_applies_only_to_axis_aligned_quads() {
    let mut batch = QuadBatch::new();
    batch.push(&Quad { clip_in_index: 1, ..quad() }).unwrap();

    let vertices = batch.transform(&tables());
    let tl = vertex_of(&vertices, Corner::TopLeft);
    assert_eq!(tl.local_position, [12.0, 12.0]);
    assert!(tl.clip_in_rect.is_unbounded());
}

#[test]
fn border_corner_batch_splits_diagonally() {
    let mut batch = QuadBatch::new();
    batch
        .push(&Quad {
            border_corner: true,
            ..quad()
        })
        .unwrap();

    let vertices = batch.transform(&tables());
    let tr = [0.0, 1.0, 0.0, 1.0];
    let bl = [1.0, 1.0, 0.0, 1.0];
    // First triangle solid top-right color, second solid bottom-left.
    for vertex in &vertices[..3] {
        assert_eq!(vertex.color, tr);
    }
    for vertex in &vertices[3..] {
        assert_eq!(vertex.color, bl);
    }
}

#[cfg(feature = "multithreading")]
#[test]
fn parallel_transform_matches_serial() {
    let mut batch = QuadBatch::new();
    for i in 0..64 {
        let origin = 10.0 + i as f64;
        batch
            .push(&Quad {
                rect: Rect::new(origin, origin, origin + 20.0, origin + 20.0),
                rotation: if i % 3 == 0 {
                    Rotation::Angle(0.1 * i as f32)
                } else {
                    Rotation::None
                },
                clip_in_index: (i % 2) as usize,
                border_corner: i % 5 == 0,
                ..quad()
            })
            .unwrap();
    }

    let tables = tables();
    assert_eq!(batch.transform(&tables), batch.transform_par(&tables));
}
