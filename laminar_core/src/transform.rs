// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer sampling matrices.
//!
//! Each layer's raster is sampled through its own affine matrix, independent
//! of where the enclosing rounded rect sits or how it is clipped. The matrix
//! maps canvas (raster) space into the icon's local drawing space, whose
//! origin is the top-left corner of the visible square:
//!
//! ```text
//!   M = T(dx - viewport_offset, dy - viewport_offset) · S(scale, about layer_center)
//! ```
//!
//! At rest (`scale = 1`, zero offset) `M` is a pure translation by
//! `-viewport_offset`, so the visible square shows exactly the canvas region
//! `[viewport_offset, viewport_offset + icon_size]²`.

use kurbo::{Affine, Point, Vec2};

use crate::geometry::IconGeometry;
use crate::layer::LayerState;

/// Computes the sampling matrix for a layer with the given scale and offset.
///
/// The scale is applied about `(layer_center, layer_center)` first, then the
/// offset combined with the re-centering term `-viewport_offset`.
#[inline]
#[must_use]
pub fn layer_matrix(scale: f64, offset: Vec2, layer_center: f64, viewport_offset: f64) -> Affine {
    let recenter = Vec2::new(offset.x - viewport_offset, offset.y - viewport_offset);
    Affine::translate(recenter) * Affine::scale_about(scale, Point::new(layer_center, layer_center))
}

/// Computes the sampling matrix for `state` under `geometry`.
#[inline]
#[must_use]
pub fn matrix_for(state: &LayerState, geometry: IconGeometry) -> Affine {
    layer_matrix(
        state.scale(),
        state.offset(),
        geometry.layer_center(),
        geometry.viewport_offset(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn rest_matrix_is_recentering_translation() {
        let g = IconGeometry::from_density(1.0);
        let m = layer_matrix(1.0, Vec2::ZERO, g.layer_center(), g.viewport_offset());
        assert_eq!(m.as_coeffs(), [1.0, 0.0, 0.0, 1.0, -18.0, -18.0]);
    }

    #[test]
    fn visible_square_samples_safe_zone_at_rest() {
        let g = IconGeometry::from_density(2.0);
        let vo = g.viewport_offset();
        let icon = f64::from(g.icon_size());
        let m = layer_matrix(1.0, Vec2::ZERO, g.layer_center(), vo);
        let inv = m.inverse();

        let visible = Rect::new(0.0, 0.0, icon, icon);
        let corners = [
            Point::new(visible.x0, visible.y0),
            Point::new(visible.x1, visible.y0),
            Point::new(visible.x1, visible.y1),
            Point::new(visible.x0, visible.y1),
        ];
        let expected = [
            Point::new(vo, vo),
            Point::new(vo + icon, vo),
            Point::new(vo + icon, vo + icon),
            Point::new(vo, vo + icon),
        ];
        for (c, e) in corners.iter().zip(expected) {
            assert_point_eq(inv * *c, e);
        }
    }

    #[test]
    fn scale_keeps_layer_center_fixed() {
        let g = IconGeometry::from_density(1.0);
        let c = g.layer_center();
        let vo = g.viewport_offset();
        let m = layer_matrix(1.3, Vec2::ZERO, c, vo);
        // The canvas center lands on the center of the visible square.
        assert_point_eq(m * Point::new(c, c), Point::new(c - vo, c - vo));
    }

    #[test]
    fn scaled_layer_still_covers_visible_square() {
        let g = IconGeometry::from_density(1.0);
        let icon = f64::from(g.icon_size());
        let layer = f64::from(g.layer_size());
        for s in [1.0, 1.1, 1.3] {
            let m = layer_matrix(s, Vec2::ZERO, g.layer_center(), g.viewport_offset());
            let covered = m.transform_rect_bbox(Rect::new(0.0, 0.0, layer, layer));
            assert!(
                covered.x0 <= 0.0 && covered.y0 <= 0.0 && covered.x1 >= icon && covered.y1 >= icon,
                "scale {s} leaves a gap: {covered:?}"
            );
        }
    }

    #[test]
    fn offset_is_applied_after_scale() {
        let g = IconGeometry::from_density(1.0);
        let c = g.layer_center();
        let vo = g.viewport_offset();
        let m = layer_matrix(2.0, Vec2::new(5.0, -3.0), c, vo);
        assert_point_eq(m * Point::new(c, c), Point::new(c - vo + 5.0, c - vo - 3.0));
    }

    #[test]
    fn matrix_for_reads_layer_state() {
        let g = IconGeometry::from_density(1.0);
        let mut state = LayerState::default();
        state.set_translate_factor(0.5);
        state.displace_x(10.0);
        let m = matrix_for(&state, g);
        assert_eq!(m.translation(), Vec2::new(5.0 - 18.0, -18.0));
    }
}
