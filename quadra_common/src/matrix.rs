// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 4x4 transformation matrices.

use bytemuck::{Pod, Zeroable};
use core::ops::Mul;
use peniko::kurbo::Affine;

/// Column-major 4x4 transformation matrix.
///
/// Used for the per-instance transform palette and the global projection.
/// `Pod` so a palette can be bound as raw bytes.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// The matrix columns.
    pub cols: [[f32; 4]; 4],
}

impl Matrix4 {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Embed a 2D affine transform from kurbo.
    pub fn from_affine(affine: &Affine) -> Self {
        let c = affine.as_coeffs().map(|x| x as f32);
        Self {
            cols: [
                [c[0], c[1], 0.0, 0.0],
                [c[2], c[3], 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [c[4], c[5], 0.0, 1.0],
            ],
        }
    }

    /// Orthographic projection mapping `[left, right] x [bottom, top]` and
    /// the `[near, far]` depth range onto the `[-1, 1]` clip cube.
    ///
    /// Passing the framebuffer extents as `ortho(0.0, w, h, 0.0, -1.0, 1.0)`
    /// yields the usual y-down device space.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rcp_w = 1.0 / (right - left);
        let rcp_h = 1.0 / (top - bottom);
        let rcp_d = 1.0 / (far - near);
        Self {
            cols: [
                [2.0 * rcp_w, 0.0, 0.0, 0.0],
                [0.0, 2.0 * rcp_h, 0.0, 0.0],
                [0.0, 0.0, -2.0 * rcp_d, 0.0],
                [
                    -(right + left) * rcp_w,
                    -(top + bottom) * rcp_h,
                    -(far + near) * rcp_d,
                    1.0,
                ],
            ],
        }
    }

    /// Transform a homogeneous 4-component vector.
    #[inline]
    pub fn transform_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.cols[0][i] * v[0]
                + self.cols[1][i] * v[1]
                + self.cols[2][i] * v[2]
                + self.cols[3][i] * v[3];
        }
        out
    }

    /// Transform a 2D point as the homogeneous point `(x, y, 0, 1)`.
    #[inline]
    pub fn transform_point(&self, p: [f32; 2]) -> [f32; 4] {
        self.transform_vec4([p[0], p[1], 0.0, 1.0])
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    /// Compose transforms; `(a * b)` applies `b` first.
    #[inline]
    fn mul(self, other: Self) -> Self {
        Self {
            cols: other.cols.map(|col| self.transform_vec4(col)),
        }
    }
}
