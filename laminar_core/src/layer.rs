// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer transform state.
//!
//! An icon has exactly two layers. Each carries two user-tunable factors and
//! two derived values:
//!
//! - `translate_factor`: fraction of the velocity-derived displacement this
//!   layer receives.
//! - `scale_factor`: fraction of the touch scale this layer receives.
//! - `offset`: `translate_factor × displacement(velocity)`, recomputed from
//!   scratch on every velocity update (never accumulated).
//! - `scale`: `1 + scale_factor × touch_scale`, always `≥ 1`.

use core::fmt;
use core::ops::{Index, IndexMut};

use kurbo::Vec2;

/// Which of the two icon layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// The layer drawn first, directly above the shadow.
    Background,
    /// The layer drawn last, over the background.
    Foreground,
}

impl Layer {
    /// Both layers in draw order.
    pub const ALL: [Self; 2] = [Self::Background, Self::Foreground];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
        })
    }
}

/// A value for each of the two layers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerPair<T> {
    /// Background value.
    pub background: T,
    /// Foreground value.
    pub foreground: T,
}

impl<T> LayerPair<T> {
    /// Creates a pair from its two halves.
    #[inline]
    #[must_use]
    pub const fn new(background: T, foreground: T) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Applies `f` to both values, in draw order.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(Layer, T) -> U) -> LayerPair<U> {
        LayerPair {
            background: f(Layer::Background, self.background),
            foreground: f(Layer::Foreground, self.foreground),
        }
    }
}

impl<T> Index<Layer> for LayerPair<T> {
    type Output = T;

    fn index(&self, layer: Layer) -> &T {
        match layer {
            Layer::Background => &self.background,
            Layer::Foreground => &self.foreground,
        }
    }
}

impl<T> IndexMut<Layer> for LayerPair<T> {
    fn index_mut(&mut self, layer: Layer) -> &mut T {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Foreground => &mut self.foreground,
        }
    }
}

/// Clamps a factor into `[0, 1]`; `NaN` becomes `0`.
#[inline]
#[must_use]
pub fn clamp_factor(f: f64) -> f64 {
    if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
}

/// Transform inputs and derived values for one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerState {
    translate_factor: f64,
    scale_factor: f64,
    offset: Vec2,
    scale: f64,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            translate_factor: 0.0,
            scale_factor: 0.0,
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl LayerState {
    /// Fraction of displacement this layer receives.
    #[inline]
    #[must_use]
    pub fn translate_factor(&self) -> f64 {
        self.translate_factor
    }

    /// Fraction of touch scale this layer receives.
    #[inline]
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Current pixel offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current multiplicative scale.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Stores a new translate factor, clamped to `[0, 1]`.
    ///
    /// The offset is not touched; it picks up the factor on the next
    /// displacement update.
    pub fn set_translate_factor(&mut self, f: f64) {
        self.translate_factor = clamp_factor(f);
    }

    /// Stores a new scale factor, clamped to `[0, 1]`.
    pub fn set_scale_factor(&mut self, f: f64) {
        self.scale_factor = clamp_factor(f);
    }

    /// Recomputes the horizontal offset from a shared displacement.
    pub fn displace_x(&mut self, displacement: f64) {
        self.offset.x = self.translate_factor * displacement;
    }

    /// Recomputes the vertical offset from a shared displacement.
    pub fn displace_y(&mut self, displacement: f64) {
        self.offset.y = self.translate_factor * displacement;
    }

    /// Recomputes the scale from a touch scale in `[0, 1]`.
    pub fn apply_touch_scale(&mut self, touch_scale: f64) {
        self.scale = 1.0 + self.scale_factor * touch_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_clamped() {
        let mut s = LayerState::default();
        s.set_translate_factor(1.5);
        assert_eq!(s.translate_factor(), 1.0);
        s.set_translate_factor(-0.2);
        assert_eq!(s.translate_factor(), 0.0);
        s.set_scale_factor(f64::NAN);
        assert_eq!(s.scale_factor(), 0.0);
    }

    #[test]
    fn zero_translate_factor_never_moves() {
        let mut s = LayerState::default();
        for d in [-72.0, -0.5, 0.0, 13.0, 72.0] {
            s.displace_x(d);
            s.displace_y(d);
            assert_eq!(s.offset(), Vec2::ZERO, "displacement {d}");
        }
    }

    #[test]
    fn translate_factor_applies_on_next_displacement() {
        let mut s = LayerState::default();
        s.set_translate_factor(0.5);
        s.displace_x(50.0);
        assert_eq!(s.offset().x, 25.0);
        s.set_translate_factor(1.0);
        assert_eq!(s.offset().x, 25.0, "factor alone does not move the layer");
        s.displace_x(50.0);
        assert_eq!(s.offset().x, 50.0);
    }

    #[test]
    fn scale_is_monotonic_and_at_least_one() {
        let mut s = LayerState::default();
        s.set_scale_factor(0.3);
        let mut prev = 0.0;
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            s.apply_touch_scale(t);
            assert!(s.scale() >= 1.0, "scale {} at t={t}", s.scale());
            assert!(s.scale() > prev, "not increasing at t={t}");
            prev = s.scale();
        }
    }

    #[test]
    fn scale_end_to_end() {
        let mut s = LayerState::default();
        s.set_scale_factor(0.2);
        s.apply_touch_scale(1.0);
        assert!((s.scale() - 1.2).abs() < 1e-12, "got {}", s.scale());
    }

    #[test]
    fn pair_indexing() {
        let mut p = LayerPair::new(1, 2);
        assert_eq!(p[Layer::Background], 1);
        p[Layer::Foreground] = 5;
        assert_eq!(p.foreground, 5);
        let names = p.map(|layer, _| layer);
        assert_eq!(names, LayerPair::new(Layer::Background, Layer::Foreground));
    }
}
