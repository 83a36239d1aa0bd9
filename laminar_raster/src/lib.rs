// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU raster backend for `laminar_core`, built on `tiny-skia`.
//!
//! - [`Drawable`] sources ([`Fill`], [`VectorLayer`], [`BitmapLayer`]) describe
//!   what a layer looks like, independent of resolution.
//! - [`Icon`] pairs a background and a foreground drawable.
//! - [`RasterLayerPair`] implements
//!   [`LayerSurfaces`](laminar_core::backend::LayerSurfaces): it owns the two
//!   square layer pixmaps of one compositor, allocated on first bind and
//!   cleared (not reallocated) on every rebind.
//! - [`PixmapPainter`] implements
//!   [`Painter`](laminar_core::backend::Painter): it fills the plan's rounded
//!   rects into a target pixmap, sampling each layer through a pattern shader
//!   with the layer's own matrix.
//!
//! Bind and allocation failures are reported through the `log` facade in
//! addition to being returned.

mod convert;
mod drawable;
mod icon;
mod painter;
mod store;

pub use drawable::{BitmapLayer, Drawable, Fill, VECTOR_VIEWPORT, VectorLayer};
pub use icon::Icon;
pub use painter::PixmapPainter;
pub use store::RasterLayerPair;

/// Errors raised by raster helpers outside the bind path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// A pixmap of the requested size could not be created.
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Pixel data does not match the declared dimensions.
    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    DataLength {
        /// `width × height × 4`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}
