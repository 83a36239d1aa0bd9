// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use laminar_core::layer::Layer;

use crate::Drawable;

/// A pair of layer sources as delivered by an icon loader.
///
/// Either layer may be missing; such an icon is rejected at bind time.
/// Cloning is cheap: the drawables are shared.
#[derive(Clone, Debug, Default)]
pub struct Icon {
    /// Drawn first, directly above the shadow.
    pub background: Option<Arc<dyn Drawable>>,
    /// Drawn over the background.
    pub foreground: Option<Arc<dyn Drawable>>,
}

impl Icon {
    /// Creates a complete icon.
    #[must_use]
    pub fn new(background: impl Drawable + 'static, foreground: impl Drawable + 'static) -> Self {
        Self {
            background: Some(Arc::new(background)),
            foreground: Some(Arc::new(foreground)),
        }
    }

    /// One layer's source, if present.
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&dyn Drawable> {
        match layer {
            Layer::Background => self.background.as_deref(),
            Layer::Foreground => self.foreground.as_deref(),
        }
    }
}
