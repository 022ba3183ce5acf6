// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping coordinates to the device pixel grid.
//!
//! Rectangle origins are snapped so that edges land on exact device-pixel
//! boundaries; otherwise bilinear sampling in the per-pixel stage blends
//! across texel boundaries it shouldn't.

#[cfg(not(feature = "std"))]
use peniko::kurbo::common::FloatFuncs as _;

/// How [`snap`] rounds a device-space coordinate to the pixel grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SnapMode {
    /// Round to nearest, ties away from zero.
    #[default]
    Round,
    /// `floor(0.5 + x)`, for targets without a native round.
    ///
    /// Identical to [`Round`](Self::Round) for non-negative input.
    Floor,
}

/// Snap a coordinate to the nearest device pixel boundary.
#[inline]
pub fn snap(p: f32, device_pixel_ratio: f32, mode: SnapMode) -> f32 {
    let device = p * device_pixel_ratio;
    let rounded = match mode {
        SnapMode::Round => device.round(),
        SnapMode::Floor => (0.5 + device).floor(),
    };
    rounded / device_pixel_ratio
}

/// Snap both components of a point.
#[inline]
pub fn snap_point(p: [f32; 2], device_pixel_ratio: f32, mode: SnapMode) -> [f32; 2] {
    [
        snap(p[0], device_pixel_ratio, mode),
        snap(p[1], device_pixel_ratio, mode),
    ]
}
