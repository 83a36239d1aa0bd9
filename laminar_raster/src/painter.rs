// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Executes composite plans into a pixmap.

use kurbo::{Affine, Point};
use laminar_core::backend::Painter;
use laminar_core::compositor::{CompositePlan, DrawItem};
use tiny_skia::{FillRule, FilterQuality, Paint, Pattern, Pixmap, SpreadMode};

use crate::convert;
use crate::{RasterError, RasterLayerPair};

/// Paints compositors into an owned target pixmap.
///
/// Each plan is drawn at the current [`origin`](Self::set_origin), so one
/// painter can lay out a whole grid of compositors.
pub struct PixmapPainter {
    target: Pixmap,
    origin: Point,
}

impl std::fmt::Debug for PixmapPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapPainter")
            .field("width", &self.target.width())
            .field("height", &self.target.height())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl PixmapPainter {
    /// Creates a painter with a transparent `width × height` target.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let target = Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
        Ok(Self {
            target,
            origin: Point::ORIGIN,
        })
    }

    /// Where the next plan's view space starts in the target.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Clears the target to `color`.
    pub fn clear(&mut self, color: laminar_core::color::Color) {
        self.target.fill(convert::color(color));
    }

    /// The target pixmap.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.target
    }

    /// Consumes the painter and returns the target pixmap.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.target
    }
}

impl Painter<RasterLayerPair> for PixmapPainter {
    fn paint(&mut self, plan: &CompositePlan, surfaces: &RasterLayerPair) {
        let Some(pixmaps) = surfaces.pixmaps() else {
            log::trace!("skipping plan for unbound surfaces");
            return;
        };
        let base = Affine::translate(self.origin.to_vec2()) * plan.view_transform;
        let ts = convert::transform(base);

        for item in plan.items() {
            match item {
                DrawItem::Shadow(shadow) => {
                    let Some(path) = convert::path(&shadow.shape) else {
                        continue;
                    };
                    let mut paint = Paint::default();
                    paint.set_color(convert::color(shadow.color));
                    paint.anti_alias = true;
                    self.target
                        .fill_path(&path, &paint, FillRule::Winding, ts, None);
                }
                DrawItem::Layer { shape, draw } => {
                    let Some(path) = convert::path(&shape) else {
                        continue;
                    };
                    let paint = Paint {
                        shader: Pattern::new(
                            pixmaps[draw.layer].as_ref(),
                            SpreadMode::Pad,
                            FilterQuality::Bilinear,
                            1.0,
                            convert::transform(draw.matrix),
                        ),
                        anti_alias: true,
                        ..Paint::default()
                    };
                    self.target
                        .fill_path(&path, &paint, FillRule::Winding, ts, None);
                }
            }
        }
    }
}
