// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-compositor layer pixmaps.

use laminar_core::backend::{BindError, LayerSurfaces};
use laminar_core::layer::{Layer, LayerPair};
use tiny_skia::{Color, Pixmap};

use crate::{Drawable, Icon};

/// The background and foreground pixmaps of one compositor.
///
/// Pixmaps are allocated on the first successful bind and reused afterwards:
/// a rebind clears them to transparent and draws the new icon. The whole icon
/// is validated before either pixmap is touched.
#[derive(Debug, Default)]
pub struct RasterLayerPair {
    pixmaps: Option<LayerPair<Pixmap>>,
    allocations: u32,
}

impl RasterLayerPair {
    /// Creates an empty pair; nothing is allocated until the first bind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One layer's pixmap, once allocated.
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&Pixmap> {
        self.pixmaps.as_ref().map(|p| &p[layer])
    }

    /// Both pixmaps, once allocated.
    #[must_use]
    pub fn pixmaps(&self) -> Option<&LayerPair<Pixmap>> {
        self.pixmaps.as_ref()
    }

    /// How many times pixmaps have been allocated (diagnostics).
    #[must_use]
    pub fn allocations(&self) -> u32 {
        self.allocations
    }

    fn rasterize_layers(
        &mut self,
        background: &dyn Drawable,
        foreground: &dyn Drawable,
        size: u32,
    ) -> Result<(), BindError> {
        let pixmaps = match &mut self.pixmaps {
            Some(p) if p.background.width() == size => {
                p.background.fill(Color::TRANSPARENT);
                p.foreground.fill(Color::TRANSPARENT);
                p
            }
            slot => {
                let alloc = || Pixmap::new(size, size).ok_or(BindError::Allocation { size });
                let fresh = LayerPair::new(alloc()?, alloc()?);
                self.allocations += 1;
                log::debug!("allocated {size}x{size} layer pixmaps");
                slot.insert(fresh)
            }
        };
        background.draw(&mut pixmaps.background);
        foreground.draw(&mut pixmaps.foreground);
        Ok(())
    }
}

impl LayerSurfaces for RasterLayerPair {
    type Icon = Icon;

    fn rasterize(&mut self, icon: &Icon, layer_size: u32) -> Result<(), BindError> {
        let layers = Layer::ALL.map(|layer| icon.layer(layer).ok_or(BindError::MissingLayer(layer)));
        let result = match layers {
            [Ok(background), Ok(foreground)] => {
                self.rasterize_layers(background, foreground, layer_size)
            }
            [Err(e), _] | [_, Err(e)] => Err(e),
        };
        if let Err(e) = &result {
            log::warn!("icon bind failed: {e}");
        }
        result
    }

    fn is_populated(&self) -> bool {
        self.pixmaps.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fill;
    use laminar_core::color::Color as RgbaColor;

    fn red_on_blue() -> Icon {
        Icon::new(
            Fill(RgbaColor::from_rgba8(0, 0, 255, 255)),
            Fill(RgbaColor::from_rgba8(255, 0, 0, 255)),
        )
    }

    fn rgba(p: &Pixmap) -> (u8, u8, u8, u8) {
        let px = p.pixel(0, 0).unwrap();
        (px.red(), px.green(), px.blue(), px.alpha())
    }

    #[test]
    fn first_bind_allocates_layer_sized_pixmaps() {
        let mut pair = RasterLayerPair::new();
        assert!(!pair.is_populated());
        pair.rasterize(&red_on_blue(), 108).unwrap();
        assert!(pair.is_populated());
        assert_eq!(pair.allocations(), 1);
        let bg = pair.layer(Layer::Background).unwrap();
        assert_eq!((bg.width(), bg.height()), (108, 108));
        assert_eq!(rgba(bg), (0, 0, 255, 255));
        assert_eq!(rgba(pair.layer(Layer::Foreground).unwrap()), (255, 0, 0, 255));
    }

    #[test]
    fn rebind_clears_and_reuses() {
        let mut pair = RasterLayerPair::new();
        pair.rasterize(&red_on_blue(), 108).unwrap();

        // A foreground that draws nothing must leave a transparent pixmap.
        let empty = crate::VectorLayer::new(kurbo::BezPath::new(), RgbaColor::WHITE);
        let icon = Icon::new(Fill(RgbaColor::WHITE), empty);
        pair.rasterize(&icon, 108).unwrap();
        assert_eq!(pair.allocations(), 1, "pixmaps reused");
        assert_eq!(rgba(pair.layer(Layer::Foreground).unwrap()), (0, 0, 0, 0));
        assert_eq!(rgba(pair.layer(Layer::Background).unwrap()), (255, 255, 255, 255));
    }

    #[test]
    fn missing_layer_leaves_content_untouched() {
        let mut pair = RasterLayerPair::new();
        pair.rasterize(&red_on_blue(), 108).unwrap();

        let mut broken = red_on_blue();
        broken.foreground = None;
        broken.background = Some(std::sync::Arc::new(Fill(RgbaColor::WHITE)));
        assert_eq!(
            pair.rasterize(&broken, 108),
            Err(BindError::MissingLayer(Layer::Foreground))
        );
        assert_eq!(rgba(pair.layer(Layer::Background).unwrap()), (0, 0, 255, 255));
        assert_eq!(rgba(pair.layer(Layer::Foreground).unwrap()), (255, 0, 0, 255));
    }

    #[test]
    fn missing_layer_on_first_bind_allocates_nothing() {
        let mut pair = RasterLayerPair::new();
        let err = pair.rasterize(&Icon::default(), 108).unwrap_err();
        assert_eq!(err, BindError::MissingLayer(Layer::Background));
        assert!(!pair.is_populated());
        assert_eq!(pair.allocations(), 0);
    }

    #[test]
    fn zero_size_reports_allocation_failure() {
        let mut pair = RasterLayerPair::new();
        assert_eq!(
            pair.rasterize(&red_on_blue(), 0),
            Err(BindError::Allocation { size: 0 })
        );
        assert!(!pair.is_populated());
    }
}
