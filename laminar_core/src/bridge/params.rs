// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parameter set shared by every icon in a collection.

use kurbo::Vec2;

use crate::animation::CORNER_PRESETS_DP;
use crate::backend::LayerSurfaces;
use crate::compositor::IconCompositor;
use crate::layer::{Layer, LayerPair, clamp_factor};
use crate::motion::clamp_velocity;

/// Default foreground translate factor.
pub const FOREGROUND_TRANSLATE_FACTOR: f64 = 0.1;
/// Default background translate factor.
pub const BACKGROUND_TRANSLATE_FACTOR: f64 = 0.08;
/// Default foreground scale factor.
pub const FOREGROUND_SCALE_FACTOR: f64 = 0.2;
/// Default background scale factor.
pub const BACKGROUND_SCALE_FACTOR: f64 = 0.3;

/// Corner radius, velocities and per-layer factors, as last written.
///
/// Values are stored already clamped, so replaying them is exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedMotionParameters {
    corner_radius: f64,
    velocity: Vec2,
    translate_factors: LayerPair<f64>,
    scale_factors: LayerPair<f64>,
}

impl SharedMotionParameters {
    /// Default parameters with the first corner preset scaled to `density`.
    #[must_use]
    pub fn for_density(density: f64) -> Self {
        Self {
            corner_radius: CORNER_PRESETS_DP[0] * density,
            velocity: Vec2::ZERO,
            translate_factors: LayerPair::new(
                BACKGROUND_TRANSLATE_FACTOR,
                FOREGROUND_TRANSLATE_FACTOR,
            ),
            scale_factors: LayerPair::new(BACKGROUND_SCALE_FACTOR, FOREGROUND_SCALE_FACTOR),
        }
    }

    /// Corner radius in pixels.
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

    /// A layer's translate factor.
    #[inline]
    #[must_use]
    pub fn translate_factor(&self, layer: Layer) -> f64 {
        self.translate_factors[layer]
    }

    /// A layer's scale factor.
    #[inline]
    #[must_use]
    pub fn scale_factor(&self, layer: Layer) -> f64 {
        self.scale_factors[layer]
    }

    pub(crate) fn set_corner_radius(&mut self, radius: f64) -> f64 {
        self.corner_radius = if radius > 0.0 { radius } else { 0.0 };
        self.corner_radius
    }

    pub(crate) fn set_velocity_x(&mut self, velocity: f64) -> f64 {
        self.velocity.x = clamp_velocity(velocity);
        self.velocity.x
    }

    pub(crate) fn set_velocity_y(&mut self, velocity: f64) -> f64 {
        self.velocity.y = clamp_velocity(velocity);
        self.velocity.y
    }

    pub(crate) fn set_translate_factor(&mut self, layer: Layer, factor: f64) -> f64 {
        self.translate_factors[layer] = clamp_factor(factor);
        self.translate_factors[layer]
    }

    pub(crate) fn set_scale_factor(&mut self, layer: Layer, factor: f64) -> f64 {
        self.scale_factors[layer] = clamp_factor(factor);
        self.scale_factors[layer]
    }

    /// Writes the whole set into `compositor`.
    ///
    /// Factors go in before velocities so the displacement is computed with
    /// the current factors.
    pub fn apply_to<S: LayerSurfaces>(&self, compositor: &mut IconCompositor<S>) {
        compositor.set_corner_radius(self.corner_radius);
        for layer in Layer::ALL {
            compositor.set_translate_factor(layer, self.translate_factors[layer]);
            compositor.set_scale_factor(layer, self.scale_factors[layer]);
        }
        compositor.set_velocity_x(self.velocity.x);
        compositor.set_velocity_y(self.velocity.y);
    }
}

impl Default for SharedMotionParameters {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}
