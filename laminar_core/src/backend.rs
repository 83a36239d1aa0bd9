// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for raster integrations.
//!
//! The core never touches pixels. A raster backend provides two pieces:
//!
//! - **Layer surfaces**: Implements [`LayerSurfaces`] to own the two layer
//!   rasters of one compositor and (re)fill them from an icon.
//!
//! - **Painter**: Implements [`Painter`] to execute a
//!   [`CompositePlan`](crate::compositor::CompositePlan) against those
//!   surfaces and some destination.
//!
//! # Crate boundaries
//!
//! `laminar_core` owns the parameter model, transform math, motion, and this
//! contract module. Backend crates (such as `laminar_raster`) depend on
//! `laminar_core` and provide the pixel work. Application code depends on
//! both and wires them together in a frame loop.

use crate::compositor::CompositePlan;
use crate::layer::Layer;

/// Why binding an icon to a compositor failed.
///
/// A failed bind leaves the compositor's previous raster content untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The icon is missing one of its two layers.
    #[error("icon has no {0} layer")]
    MissingLayer(Layer),
    /// A layer raster of `size × size` pixels could not be allocated.
    #[error("cannot allocate a {size}x{size} layer raster")]
    Allocation {
        /// Requested side length in pixels.
        size: u32,
    },
    /// The catalog has no icon for this position (it is empty).
    #[error("no icon for position {position}")]
    NoIcon {
        /// The requested list position.
        position: usize,
    },
}

/// The two layer rasters owned by one compositor.
///
/// Implementations must validate the whole icon before modifying anything,
/// so a failed [`rasterize`](Self::rasterize) leaves the previous content
/// intact.
pub trait LayerSurfaces {
    /// The icon type this backend can rasterize.
    type Icon: ?Sized;

    /// Renders both layers of `icon` into `layer_size × layer_size` rasters,
    /// allocating them on first use and clearing them on reuse.
    fn rasterize(&mut self, icon: &Self::Icon, layer_size: u32) -> Result<(), BindError>;

    /// Whether both rasters hold content from a successful bind.
    fn is_populated(&self) -> bool;
}

/// Executes a composite plan.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: FrameTime) {
///     // Motion: settle springs write through the bridge.
///     if let Some(frame) = controller.on_frame(now) {
///         frame.update.apply_to(&mut bridge);
///     }
///
///     // Composite: every compositor that asked for a redraw paints.
///     for id in bridge.slots() {
///         let compositor = bridge.compositor_mut(id);
///         if compositor.take_redraw() {
///             compositor.draw(&mut painter);
///         }
///     }
/// }
/// ```
pub trait Painter<S: ?Sized> {
    /// Paints `plan`, sampling layer content from `surfaces`.
    fn paint(&mut self, plan: &CompositePlan, surfaces: &S);
}
