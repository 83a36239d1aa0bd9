// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single on-screen icon instance.
//!
//! [`IconCompositor`] owns one pair of layer rasters (through its
//! [`LayerSurfaces`] backend), the per-layer transform state, and the shape
//! configuration. Setters update state and request a redraw; nothing is
//! painted until the caller asks for a [`CompositePlan`].
//!
//! A plan is produced only once both the view size and a successful bind are
//! known. Before that, drawing is deferred rather than an error.
//!
//! Plan coordinates are *icon-local*: the visible square spans
//! `(0, 0)..(icon_size, icon_size)`. [`CompositePlan::view_transform`] places
//! that square in the view (centered, then scaled by the background layer's
//! scale about the view center).

use kurbo::{Affine, Point, Rect, RoundedRect, Size, Vec2};

use crate::backend::{BindError, LayerSurfaces, Painter};
use crate::color::Color;
use crate::geometry::IconGeometry;
use crate::layer::{Layer, LayerPair, LayerState};
use crate::motion::{clamp_velocity, displacement};
use crate::settle::VelocityTarget;
use crate::transform::matrix_for;

/// Shape configuration, resolved once per instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconStyle {
    /// Canvas and icon sizes.
    pub geometry: IconGeometry,
    /// Shadow fill; transparent disables the shadow.
    pub shadow_color: Color,
    /// Downward shadow offset in pixels; `<= 0` disables the shadow.
    pub shadow_dy: f64,
}

impl IconStyle {
    /// A style without shadow.
    #[must_use]
    pub fn new(geometry: IconGeometry) -> Self {
        Self {
            geometry,
            shadow_color: Color::TRANSPARENT,
            shadow_dy: 0.0,
        }
    }

    /// Returns this style with a drop shadow.
    #[must_use]
    pub fn with_shadow(mut self, color: Color, dy: f64) -> Self {
        self.shadow_color = color;
        self.shadow_dy = dy;
        self
    }

    /// The shadow parameters, if a shadow is drawn at all.
    #[must_use]
    pub fn shadow(&self) -> Option<(Color, f64)> {
        (!self.shadow_color.is_transparent() && self.shadow_dy > 0.0)
            .then_some((self.shadow_color, self.shadow_dy))
    }
}

impl Default for IconStyle {
    fn default() -> Self {
        Self::new(IconGeometry::default())
    }
}

/// One layer's draw: which raster, sampled through which matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDraw {
    /// Which raster to sample.
    pub layer: Layer,
    /// Maps layer canvas space into icon-local space.
    pub matrix: Affine,
}

/// The drop shadow's draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowDraw {
    /// Icon-local shape, already offset by the shadow's `dy`.
    pub shape: RoundedRect,
    /// Fill color.
    pub color: Color,
}

/// A single draw command, in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawItem {
    /// Solid rounded rect below the icon.
    Shadow(ShadowDraw),
    /// Rounded rect filled with a layer raster.
    Layer {
        /// Icon-local shape shared by both layers.
        shape: RoundedRect,
        /// Raster and sampling matrix.
        draw: LayerDraw,
    },
}

/// Everything needed to paint one compositor for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositePlan {
    /// Maps icon-local space into view space.
    pub view_transform: Affine,
    /// The rounded-rect mask shared by both layers.
    pub shape: RoundedRect,
    /// Drop shadow, if configured.
    pub shadow: Option<ShadowDraw>,
    /// Both layers, each with its own sampling matrix.
    pub layers: LayerPair<LayerDraw>,
}

impl CompositePlan {
    /// Draw items in paint order: shadow, background, foreground.
    pub fn items(&self) -> impl Iterator<Item = DrawItem> + '_ {
        let shape = self.shape;
        self.shadow
            .map(DrawItem::Shadow)
            .into_iter()
            .chain(Layer::ALL.map(move |layer| DrawItem::Layer {
                shape,
                draw: self.layers[layer],
            }))
    }
}

/// A dual-layer icon with velocity-driven parallax.
#[derive(Debug)]
pub struct IconCompositor<S> {
    style: IconStyle,
    surfaces: S,
    corner_radius: f64,
    layers: LayerPair<LayerState>,
    velocity: Vec2,
    touch_scale: f64,
    view_scale: f64,
    size: Option<Size>,
    origin: Point,
    redraw: bool,
}

impl<S: LayerSurfaces> IconCompositor<S> {
    /// Creates an unbound compositor around `surfaces`.
    #[must_use]
    pub fn new(style: IconStyle, surfaces: S) -> Self {
        Self {
            style,
            surfaces,
            corner_radius: 0.0,
            layers: LayerPair::default(),
            velocity: Vec2::ZERO,
            touch_scale: 0.0,
            view_scale: 1.0,
            size: None,
            origin: Point::ORIGIN,
            redraw: false,
        }
    }

    // -- Accessors --

    /// The instance's shape configuration.
    #[inline]
    #[must_use]
    pub fn style(&self) -> &IconStyle {
        &self.style
    }

    /// Canvas and icon sizes.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> IconGeometry {
        self.style.geometry
    }

    /// The layer raster backend.
    #[inline]
    #[must_use]
    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    /// Whether a bind has succeeded at least once.
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.surfaces.is_populated()
    }

    /// Current corner radius in pixels.
    #[inline]
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Last clamped velocity on each axis.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Transform state of one layer.
    #[inline]
    #[must_use]
    pub fn layer(&self, layer: Layer) -> &LayerState {
        &self.layers[layer]
    }

    /// Last accepted touch scale in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn touch_scale(&self) -> f64 {
        self.touch_scale
    }

    /// Uniform scale applied to the whole instance about the view center.
    #[inline]
    #[must_use]
    pub fn view_scale(&self) -> f64 {
        self.view_scale
    }

    /// The view size, once the layout collaborator has reported it.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// The unscaled icon square in view space, once the size is known.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let icon = f64::from(self.style.geometry.icon_size());
        self.size
            .map(|_| Rect::from_origin_size(self.origin, Size::new(icon, icon)))
    }

    /// The sampling matrix of one layer.
    #[must_use]
    pub fn layer_matrix(&self, layer: Layer) -> Affine {
        matrix_for(&self.layers[layer], self.style.geometry)
    }

    // -- Redraw --

    /// Whether a setter has requested a redraw since the last
    /// [`take_redraw`](Self::take_redraw).
    #[inline]
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Returns and clears the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    // -- Setters --

    /// Rasterizes `icon` into this instance's layer surfaces.
    ///
    /// On failure the previous raster content is kept and no redraw is
    /// requested.
    pub fn set_icon(&mut self, icon: &S::Icon) -> Result<(), BindError> {
        self.surfaces
            .rasterize(icon, self.style.geometry.layer_size())?;
        if let Some(size) = self.size {
            self.origin = centered_origin(size, self.style.geometry);
        }
        self.redraw = true;
        Ok(())
    }

    /// Sets the corner radius shared by the shadow and both layers. Negative
    /// values are treated as zero.
    pub fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = if radius > 0.0 { radius } else { 0.0 };
        self.redraw = true;
    }

    /// Applies a horizontal velocity sample to both layers.
    pub fn set_velocity_x(&mut self, velocity: f64) {
        self.velocity.x = clamp_velocity(velocity);
        let d = self.shared_displacement(velocity);
        for layer in Layer::ALL {
            self.layers[layer].displace_x(d);
        }
        self.redraw = true;
    }

    /// Applies a vertical velocity sample to both layers.
    pub fn set_velocity_y(&mut self, velocity: f64) {
        self.velocity.y = clamp_velocity(velocity);
        let d = self.shared_displacement(velocity);
        for layer in Layer::ALL {
            self.layers[layer].displace_y(d);
        }
        self.redraw = true;
    }

    /// Sets a layer's translate factor. Takes effect on the next velocity
    /// update.
    pub fn set_translate_factor(&mut self, layer: Layer, factor: f64) {
        self.layers[layer].set_translate_factor(factor);
    }

    /// Sets a layer's scale factor and re-derives its scale from the current
    /// touch scale.
    pub fn set_scale_factor(&mut self, layer: Layer, factor: f64) {
        let state = &mut self.layers[layer];
        state.set_scale_factor(factor);
        state.apply_touch_scale(self.touch_scale);
        self.view_scale = self.layers.background.scale();
        self.redraw = true;
    }

    /// Sets the foreground translate factor.
    pub fn set_foreground_translate_factor(&mut self, factor: f64) {
        self.set_translate_factor(Layer::Foreground, factor);
    }

    /// Sets the background translate factor.
    pub fn set_background_translate_factor(&mut self, factor: f64) {
        self.set_translate_factor(Layer::Background, factor);
    }

    /// Sets the foreground scale factor.
    pub fn set_foreground_scale_factor(&mut self, factor: f64) {
        self.set_scale_factor(Layer::Foreground, factor);
    }

    /// Sets the background scale factor.
    pub fn set_background_scale_factor(&mut self, factor: f64) {
        self.set_scale_factor(Layer::Background, factor);
    }

    /// Applies a touch scale, clamped to `[0, 1]`.
    ///
    /// Ignored until the first successful bind. The background layer's
    /// derived scale also becomes the instance's own view scale.
    pub fn set_scale(&mut self, scale: f64) {
        if !self.surfaces.is_populated() {
            return;
        }
        let t = if scale.is_nan() { 0.0 } else { scale.clamp(0.0, 1.0) };
        self.touch_scale = t;
        for layer in Layer::ALL {
            self.layers[layer].apply_touch_scale(t);
        }
        self.view_scale = self.layers.background.scale();
        self.redraw = true;
    }

    /// Reports the view size; the icon square is centered in it.
    pub fn set_size(&mut self, width: f64, height: f64) {
        let size = Size::new(width, height);
        self.size = Some(size);
        self.origin = centered_origin(size, self.style.geometry);
        self.redraw = true;
    }

    // -- Drawing --

    /// Builds this frame's draw plan, or `None` while the size or content is
    /// still unknown.
    #[must_use]
    pub fn plan(&self) -> Option<CompositePlan> {
        let size = self.size?;
        if !self.surfaces.is_populated() {
            return None;
        }
        let geometry = self.style.geometry;
        let icon = f64::from(geometry.icon_size());
        let r = self.corner_radius;

        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let view_transform =
            Affine::scale_about(self.view_scale, center) * Affine::translate(self.origin.to_vec2());

        let shape = RoundedRect::new(0.0, 0.0, icon, icon, r);
        let shadow = self.style.shadow().map(|(color, dy)| ShadowDraw {
            shape: RoundedRect::new(0.0, dy, icon, icon + dy, r),
            color,
        });
        let layers = self.layers.map(|layer, state| LayerDraw {
            layer,
            matrix: matrix_for(&state, geometry),
        });

        Some(CompositePlan {
            view_transform,
            shape,
            shadow,
            layers,
        })
    }

    /// Paints the current plan with `painter`. Returns `false` when drawing
    /// is still deferred.
    pub fn draw<P: Painter<S> + ?Sized>(&self, painter: &mut P) -> bool {
        match self.plan() {
            Some(plan) => {
                painter.paint(&plan, &self.surfaces);
                true
            }
            None => false,
        }
    }

    fn shared_displacement(&self, velocity: f64) -> f64 {
        displacement(f64::from(self.style.geometry.icon_size()), velocity)
    }
}

impl<S: LayerSurfaces> VelocityTarget for IconCompositor<S> {
    fn set_velocity_x(&mut self, velocity: f64) {
        Self::set_velocity_x(self, velocity);
    }

    fn set_velocity_y(&mut self, velocity: f64) {
        Self::set_velocity_y(self, velocity);
    }
}

fn centered_origin(size: Size, geometry: IconGeometry) -> Point {
    let icon = f64::from(geometry.icon_size());
    Point::new((size.width - icon) / 2.0, (size.height - icon) / 2.0)
}
