// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution-independent layer sources.

use std::fmt;

use kurbo::{Affine, BezPath};
use laminar_core::color::Color;
use laminar_core::geometry::LAYER_SIZE_DP;
use tiny_skia::{ColorU8, FillRule, FilterQuality, Paint, Pixmap, PixmapPaint};

use crate::RasterError;
use crate::convert;

/// Side of the coordinate space [`VectorLayer`] paths are authored in.
pub const VECTOR_VIEWPORT: f64 = LAYER_SIZE_DP;

/// Something that can paint one icon layer.
pub trait Drawable: fmt::Debug {
    /// Paints into the whole of `canvas`, scaled to fill it. The canvas is
    /// transparent on entry.
    fn draw(&self, canvas: &mut Pixmap);
}

/// A solid color over the whole layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill(pub Color);

impl Drawable for Fill {
    fn draw(&self, canvas: &mut Pixmap) {
        canvas.fill(convert::color(self.0));
    }
}

/// A filled path authored in a [`VECTOR_VIEWPORT`]-sized square.
#[derive(Clone, Debug)]
pub struct VectorLayer {
    path: BezPath,
    color: Color,
}

impl VectorLayer {
    /// Creates a vector layer.
    #[must_use]
    pub fn new(path: BezPath, color: Color) -> Self {
        Self { path, color }
    }

    /// The path, in viewport units.
    #[must_use]
    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

impl Drawable for VectorLayer {
    fn draw(&self, canvas: &mut Pixmap) {
        let Some(path) = convert::path(&self.path) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(convert::color(self.color));
        paint.anti_alias = true;
        let scale = f64::from(canvas.width()) / VECTOR_VIEWPORT;
        canvas.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            convert::transform(Affine::scale(scale)),
            None,
        );
    }
}

/// A bitmap stretched over the whole layer.
#[derive(Clone)]
pub struct BitmapLayer {
    pixmap: Pixmap,
}

impl fmt::Debug for BitmapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitmapLayer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish_non_exhaustive()
    }
}

impl BitmapLayer {
    /// Wraps an existing pixmap.
    #[must_use]
    pub fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Builds a bitmap from straight-alpha RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, RasterError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
        let expected = pixmap.pixels().len() * 4;
        if data.len() != expected {
            return Err(RasterError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(Self { pixmap })
    }

    /// The source pixels.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Drawable for BitmapLayer {
    fn draw(&self, canvas: &mut Pixmap) {
        let sx = f64::from(canvas.width()) / f64::from(self.pixmap.width());
        let sy = f64::from(canvas.height()) / f64::from(self.pixmap.height());
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        canvas.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &paint,
            convert::transform(Affine::scale_non_uniform(sx, sy)),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape};

    fn canvas(size: u32) -> Pixmap {
        Pixmap::new(size, size).unwrap()
    }

    fn alpha(p: &Pixmap, x: u32, y: u32) -> u8 {
        p.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn fill_covers_everything() {
        let mut c = canvas(16);
        Fill(Color::from_rgba8(10, 20, 30, 255)).draw(&mut c);
        let px = c.pixel(15, 15).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (10, 20, 30, 255));
    }

    #[test]
    fn vector_layer_scales_from_viewport() {
        // Left half of the viewport.
        let half = Rect::new(0.0, 0.0, 54.0, 108.0).to_path(0.1);
        let layer = VectorLayer::new(half, Color::WHITE);
        let mut c = canvas(216);
        layer.draw(&mut c);
        assert_eq!(alpha(&c, 10, 100), 255);
        assert_eq!(alpha(&c, 100, 100), 255);
        assert_eq!(alpha(&c, 115, 100), 0, "right half stays clear");
    }

    #[test]
    fn bitmap_is_stretched() {
        // 2×1 bitmap: opaque red, transparent.
        let layer = BitmapLayer::from_rgba8(2, 1, &[255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
        let mut c = canvas(20);
        layer.draw(&mut c);
        assert_eq!(c.pixel(2, 10).unwrap().red(), 255);
        assert_eq!(alpha(&c, 18, 10), 0);
    }

    #[test]
    fn bitmap_rejects_short_data() {
        assert_eq!(
            BitmapLayer::from_rgba8(2, 2, &[0; 8]).unwrap_err(),
            RasterError::DataLength {
                expected: 16,
                actual: 8
            }
        );
    }
}
