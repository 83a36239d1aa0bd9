// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! kurbo → tiny-skia conversions.

#![expect(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32; icon coordinates are small"
)]

use kurbo::{Affine, PathEl, Shape};
use laminar_core::color::Color;
use tiny_skia::{Path, PathBuilder, Transform};

/// Flattening tolerance for shapes that are not already Bézier paths.
const TOLERANCE: f64 = 0.1;

pub(crate) fn transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

pub(crate) fn color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Converts any kurbo shape to a tiny-skia path. Returns `None` for empty
/// shapes.
pub(crate) fn path(shape: &impl Shape) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in shape.path_elements(TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32);
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
