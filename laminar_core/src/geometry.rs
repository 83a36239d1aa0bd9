// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon canvas geometry.
//!
//! Layers are rasterized into a square canvas of side `layer_size`, which is
//! larger than the visible `icon_size` square. The difference is split evenly
//! on each side as `viewport_offset`; it is the headroom that lets layers be
//! translated and scaled without exposing their edges.
//!
//! ```text
//!   ┌───────────── layer_size ─────────────┐
//!   │   viewport_offset                    │
//!   │      ┌──────── icon_size ───────┐    │
//!   │      │                          │    │
//!   │      │     visible square       │    │
//!   │      │                          │    │
//!   │      └──────────────────────────┘    │
//!   └──────────────────────────────────────┘
//! ```

/// Side of the layer canvas in density-independent units.
pub const LAYER_SIZE_DP: f64 = 108.0;

/// Fraction of the visible icon added as extra inset on each side.
///
/// With `0.25`, the canvas is `1 + 2 × 0.25 = 1.5` times the visible icon.
pub const EXTRA_INSET_FRACTION: f64 = 0.25;

/// Fixed canvas and icon sizes for one compositor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconGeometry {
    layer_size: u32,
    icon_size: u32,
}

impl IconGeometry {
    /// Creates geometry from explicit pixel sizes.
    ///
    /// # Panics
    ///
    /// Panics if either size is zero or if `icon_size >= layer_size`.
    #[must_use]
    pub fn new(layer_size: u32, icon_size: u32) -> Self {
        assert!(
            layer_size > 0 && icon_size > 0,
            "icon geometry sizes must be non-zero"
        );
        assert!(
            icon_size < layer_size,
            "icon size {icon_size} must be smaller than layer size {layer_size}"
        );
        Self {
            layer_size,
            icon_size,
        }
    }

    /// Derives geometry for a display density (pixels per density-independent
    /// unit).
    ///
    /// # Panics
    ///
    /// Panics if `density` is not positive and finite.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sizes are small positive pixel counts"
    )]
    pub fn from_density(density: f64) -> Self {
        assert!(
            density.is_finite() && density > 0.0,
            "density must be positive, got {density}"
        );
        let layer_size = libm::round(LAYER_SIZE_DP * density) as u32;
        let icon_size = (f64::from(layer_size) / (1.0 + 2.0 * EXTRA_INSET_FRACTION)) as u32;
        Self::new(layer_size, icon_size)
    }

    /// Side of the rasterization canvas in pixels.
    #[inline]
    #[must_use]
    pub const fn layer_size(self) -> u32 {
        self.layer_size
    }

    /// Side of the visible icon square in pixels.
    #[inline]
    #[must_use]
    pub const fn icon_size(self) -> u32 {
        self.icon_size
    }

    /// Offset that re-centers the canvas onto the visible square.
    #[inline]
    #[must_use]
    pub fn viewport_offset(self) -> f64 {
        f64::from((self.layer_size - self.icon_size) / 2)
    }

    /// Center of the canvas along either axis; layers scale about this point.
    #[inline]
    #[must_use]
    pub fn layer_center(self) -> f64 {
        f64::from(self.layer_size / 2)
    }
}

impl Default for IconGeometry {
    fn default() -> Self {
        Self::from_density(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_one() {
        let g = IconGeometry::from_density(1.0);
        assert_eq!(g.layer_size(), 108);
        assert_eq!(g.icon_size(), 72);
        assert_eq!(g.viewport_offset(), 18.0);
        assert_eq!(g.layer_center(), 54.0);
    }

    #[test]
    fn density_xxhdpi() {
        let g = IconGeometry::from_density(3.0);
        assert_eq!(g.layer_size(), 324);
        assert_eq!(g.icon_size(), 216);
        assert_eq!(g.viewport_offset(), 54.0);
    }

    #[test]
    fn fractional_density_rounds_canvas() {
        // 108 * 2.625 = 283.5 -> 284; 284 / 1.5 = 189.33 -> 189
        let g = IconGeometry::from_density(2.625);
        assert_eq!(g.layer_size(), 284);
        assert_eq!(g.icon_size(), 189);
        // (284 - 189) / 2 = 47 with integer division.
        assert_eq!(g.viewport_offset(), 47.0);
    }

    #[test]
    fn icon_is_smaller_than_layer() {
        for d in [0.75, 1.0, 1.5, 2.0, 3.0, 4.0] {
            let g = IconGeometry::from_density(d);
            assert!(g.icon_size() < g.layer_size(), "density {d}");
        }
    }

    #[test]
    #[should_panic(expected = "must be smaller than layer size")]
    fn icon_larger_than_layer_panics() {
        let _ = IconGeometry::new(50, 100);
    }

    #[test]
    #[should_panic(expected = "must be smaller than layer size")]
    fn icon_filling_the_layer_panics() {
        let _ = IconGeometry::new(100, 100);
    }

    #[test]
    #[should_panic(expected = "density must be positive")]
    fn zero_density_panics() {
        let _ = IconGeometry::from_density(0.0);
    }
}
