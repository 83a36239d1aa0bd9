// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased scalar tweens and the property seam used to drive them.
//!
//! A [`Tween`] interpolates between two values over a fixed duration, sampled
//! at [`FrameTime`]s. The first sample pins the start time, so a tween created
//! between frames begins on the next tick.
//!
//! [`ScalarProperty`] names one `f64` on some target (a compositor, the whole
//! broadcast bridge) so a driver can animate it without knowing the target's
//! type. [`CornerMorph`] combines the two to cycle the corner radius through
//! a fixed list of presets.

use core::time::Duration;

use crate::time::FrameTime;

/// Corner radius presets, in density-independent units.
pub const CORNER_PRESETS_DP: [f64; 4] = [36.0, 30.0, 16.0, 4.0];

/// Length of one corner radius transition.
pub const CORNER_MORPH_DURATION: Duration = Duration::from_millis(200);

/// A named scalar on a target of type `T`.
pub trait ScalarProperty<T: ?Sized> {
    /// Reads the current value.
    fn get(&self, target: &T) -> f64;

    /// Writes a new value.
    fn set(&self, target: &mut T, value: f64);
}

/// Progress curve for a [`Tween`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quick start, long gentle finish: cubic Bézier `(0.4, 0, 0.2, 1)`.
    #[default]
    FastOutSlowIn,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluates the unit cubic Bézier `(0,0) (x1,y1) (x2,y2) (1,1)` at `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    // Polynomial coefficients for one coordinate: ((a·s + b)·s + c)·s.
    let coeffs = |p1: f64, p2: f64| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    };
    let (ax, bx, cx) = coeffs(x1, x2);
    let (ay, by, cy) = coeffs(y1, y2);
    let sample_x = |s: f64| ((ax * s + bx) * s + cx) * s;
    let slope_x = |s: f64| (3.0 * ax * s + 2.0 * bx) * s + cx;

    const EPS: f64 = 1e-7;

    // Newton first; it converges in a few steps away from flat spots.
    let mut s = x;
    for _ in 0..8 {
        let err = sample_x(s) - x;
        if libm::fabs(err) < EPS {
            return ((ay * s + by) * s + cy) * s;
        }
        let d = slope_x(s);
        if libm::fabs(d) < 1e-6 {
            break;
        }
        s -= err / d;
    }

    // Bisection fallback.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = sample_x(s);
        if libm::fabs(v - x) < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    ((ay * s + by) * s + cy) * s
}

/// One tween sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    /// The interpolated value.
    pub value: f64,
    /// Whether the tween has reached its end value.
    pub finished: bool,
}

/// Interpolates a scalar from `from` to `to` over `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    start: Option<FrameTime>,
}

impl Tween {
    /// Creates a tween that starts on its first sample.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            start: None,
        }
    }

    /// Start value.
    #[inline]
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.from
    }

    /// End value.
    #[inline]
    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.to
    }

    /// The value at linear progress `t` in `[0, 1]`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Samples the tween at `now`, pinning the start time on first use.
    pub fn sample(&mut self, now: FrameTime) -> TweenSample {
        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return TweenSample {
                value: self.to,
                finished: true,
            };
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        TweenSample {
            value: self.value_at(t),
            finished: false,
        }
    }
}

/// Cycles a corner radius through [`CORNER_PRESETS_DP`] with eased
/// transitions.
#[derive(Clone, Debug)]
pub struct CornerMorph {
    presets: [f64; 4],
    index: usize,
    tween: Option<Tween>,
}

impl CornerMorph {
    /// Creates a morph whose presets are scaled to `density`, resting on the
    /// first preset.
    #[must_use]
    pub fn new(density: f64) -> Self {
        Self {
            presets: CORNER_PRESETS_DP.map(|dp| dp * density),
            index: 0,
            tween: None,
        }
    }

    /// The preset the morph rests on (or is heading to).
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.presets[self.index]
    }

    /// Whether a transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts a transition from the property's current value to the next
    /// preset, replacing any transition in flight. Returns the new target.
    pub fn advance<T: ?Sized, P: ScalarProperty<T>>(&mut self, target: &T, property: &P) -> f64 {
        self.index = (self.index + 1) % self.presets.len();
        let to = self.presets[self.index];
        self.tween = Some(Tween::new(
            property.get(target),
            to,
            CORNER_MORPH_DURATION,
            Easing::FastOutSlowIn,
        ));
        to
    }

    /// Writes this frame's radius through `property`. Returns whether the
    /// transition is still running afterwards.
    pub fn on_frame<T: ?Sized, P: ScalarProperty<T>>(
        &mut self,
        now: FrameTime,
        target: &mut T,
        property: &P,
    ) -> bool {
        let Some(tween) = &mut self.tween else {
            return false;
        };
        let sample = tween.sample(now);
        property.set(target, sample.value);
        if sample.finished {
            self.tween = None;
        }
        !sample.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Radius;

    impl ScalarProperty<f64> for Radius {
        fn get(&self, target: &f64) -> f64 {
            *target
        }
        fn set(&self, target: &mut f64, value: f64) {
            *target = value;
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::FastOutSlowIn] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
            assert_eq!(easing.apply(-1.0), easing.apply(0.0));
        }
    }

    #[test]
    fn fast_out_slow_in_is_monotonic_and_front_loaded() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let t = f64::from(i) / 100.0;
            let v = Easing::FastOutSlowIn.apply(t);
            assert!(v >= prev - 1e-9, "not monotonic at {t}: {v} < {prev}");
            prev = v;
        }
        assert!(Easing::FastOutSlowIn.apply(0.5) > 0.5);
    }

    #[test]
    fn tween_starts_on_first_sample() {
        let mut tween = Tween::new(10.0, 20.0, Duration::from_millis(100), Easing::Linear);
        let s = tween.sample(FrameTime::from_millis(500));
        assert_eq!(s.value, 10.0);
        assert!(!s.finished);
        let s = tween.sample(FrameTime::from_millis(550));
        assert!((s.value - 15.0).abs() < 1e-9, "got {}", s.value);
        let s = tween.sample(FrameTime::from_millis(600));
        assert_eq!(s, TweenSample { value: 20.0, finished: true });
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tween = Tween::new(1.0, 2.0, Duration::ZERO, Easing::FastOutSlowIn);
        assert_eq!(tween.sample(FrameTime::ZERO), TweenSample { value: 2.0, finished: true });
    }

    #[test]
    fn corner_morph_cycles_presets() {
        let mut morph = CornerMorph::new(2.0);
        let mut radius = morph.target();
        assert_eq!(radius, 72.0);

        let mut targets = alloc::vec::Vec::new();
        for _ in 0..4 {
            targets.push(morph.advance(&radius, &Radius));
            let mut t = 0;
            while morph.on_frame(FrameTime::from_millis(t), &mut radius, &Radius) {
                t += 16;
            }
            assert_eq!(radius, morph.target());
        }
        assert_eq!(targets, [60.0, 32.0, 8.0, 72.0]);
    }

    #[test]
    fn corner_morph_moves_toward_target() {
        let mut morph = CornerMorph::new(1.0);
        let mut radius = 36.0;
        morph.advance(&radius, &Radius);
        assert!(morph.is_running());
        morph.on_frame(FrameTime::from_millis(0), &mut radius, &Radius);
        assert_eq!(radius, 36.0);
        morph.on_frame(FrameTime::from_millis(100), &mut radius, &Radius);
        assert!(radius < 36.0 && radius > 30.0, "got {radius}");
        assert!(!morph.on_frame(FrameTime::from_millis(200), &mut radius, &Radius));
        assert_eq!(radius, 30.0);
        assert!(!morph.on_frame(FrameTime::from_millis(216), &mut radius, &Radius));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut morph = CornerMorph::new(1.0);
        let mut radius = 36.0;
        morph.advance(&radius, &Radius);
        morph.on_frame(FrameTime::from_millis(0), &mut radius, &Radius);
        morph.on_frame(FrameTime::from_millis(50), &mut radius, &Radius);
        let mid = radius;
        morph.advance(&radius, &Radius);
        morph.on_frame(FrameTime::from_millis(60), &mut radius, &Radius);
        assert_eq!(radius, mid, "new transition starts where the old one stopped");
    }
}
