// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped spring stepping.
//!
//! A [`Spring`] pulls a scalar value toward zero using the closed-form
//! solution of the unit-mass damped harmonic oscillator, so each step is
//! exact for its `dt` regardless of frame rate. The three regimes
//! (under-damped, critically damped, over-damped) are selected by the damping
//! ratio.
//!
//! The spring is a plain value: [`Spring::step`] takes the elapsed time and
//! returns the new `(value, rate, settled)` triple. Nothing is retained
//! between frames except the spring itself, so cancelling is dropping it.

use core::time::Duration;

/// Lowest accepted stiffness; smaller requests are raised to this.
pub const STIFFNESS_FLOOR: f64 = 50.0;

/// Lowest accepted damping ratio; smaller requests are raised to this.
pub const DAMPING_RATIO_FLOOR: f64 = 0.05;

/// The value is at rest once within this distance of the target.
pub const VALUE_THRESHOLD: f64 = 0.75;

/// The rate is at rest once below this magnitude.
pub const RATE_THRESHOLD: f64 = VALUE_THRESHOLD * 62.5;

/// Stiffness and damping ratio for a settle spring.
///
/// Both parameters have floors and no ceilings. Values below the floor and
/// non-finite values are replaced by the floor without error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    stiffness: f64,
    damping_ratio: f64,
}

impl SpringConfig {
    /// Creates a config, clamping each parameter to its floor.
    #[must_use]
    pub fn new(stiffness: f64, damping_ratio: f64) -> Self {
        Self {
            stiffness: floor(stiffness, STIFFNESS_FLOOR),
            damping_ratio: floor(damping_ratio, DAMPING_RATIO_FLOOR),
        }
    }

    /// Creates a config from slider positions: stiffness as-is, damping as a
    /// percentage.
    #[must_use]
    pub fn from_progress(stiffness: u32, damping_percent: u32) -> Self {
        Self::new(f64::from(stiffness), f64::from(damping_percent) / 100.0)
    }

    /// Spring stiffness (force per unit displacement, unit mass).
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping ratio; `1.0` is critically damped.
    #[inline]
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Advances `(value, rate)` by `dt` seconds toward a target of zero.
    #[must_use]
    pub fn evaluate(&self, value: f64, rate: f64, dt: f64) -> (f64, f64) {
        let omega = libm::sqrt(self.stiffness);
        let zeta = self.damping_ratio;

        if zeta > 1.0 {
            let root = omega * libm::sqrt(zeta * zeta - 1.0);
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let b = (gamma_minus * value - rate) / (gamma_minus - gamma_plus);
            let a = value - b;
            let e_minus = libm::exp(gamma_minus * dt);
            let e_plus = libm::exp(gamma_plus * dt);
            (
                a * e_minus + b * e_plus,
                a * gamma_minus * e_minus + b * gamma_plus * e_plus,
            )
        } else if zeta == 1.0 {
            let a = value;
            let b = rate + omega * value;
            let decay = libm::exp(-omega * dt);
            let envelope = (a + b * dt) * decay;
            (envelope, envelope * -omega + b * decay)
        } else {
            let damped = omega * libm::sqrt(1.0 - zeta * zeta);
            let cos_coeff = value;
            let sin_coeff = (zeta * omega * value + rate) / damped;
            let decay = libm::exp(-zeta * omega * dt);
            let (sin, cos) = (libm::sin(damped * dt), libm::cos(damped * dt));
            let next = decay * (cos_coeff * cos + sin_coeff * sin);
            let next_rate = next * -omega * zeta
                + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos);
            (next, next_rate)
        }
    }
}

fn floor(value: f64, floor: f64) -> f64 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(500.0, 0.3)
    }
}

/// Output of a single [`Spring::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringStep {
    /// Value after the step; exactly `0.0` once settled.
    pub value: f64,
    /// Rate of change after the step; exactly `0.0` once settled.
    pub rate: f64,
    /// Whether the spring has come to rest.
    pub settled: bool,
}

/// A spring pulling a scalar toward zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    rate: f64,
}

impl Spring {
    /// Creates a spring at `value` moving at `rate`.
    #[must_use]
    pub fn new(config: SpringConfig, value: f64, rate: f64) -> Self {
        Self {
            config,
            value,
            rate,
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current rate of change.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The spring's parameters.
    #[inline]
    #[must_use]
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Whether the spring is within the rest thresholds.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        libm::fabs(self.value) < VALUE_THRESHOLD && libm::fabs(self.rate) < RATE_THRESHOLD
    }

    /// Advances the spring by `dt`.
    ///
    /// Once at rest, the value and rate snap to exactly zero and stay there.
    /// A step that overflows to a non-finite state also counts as rest.
    pub fn step(&mut self, dt: Duration) -> SpringStep {
        let (value, rate) = self
            .config
            .evaluate(self.value, self.rate, dt.as_secs_f64());
        self.value = value;
        self.rate = rate;
        let settled = !value.is_finite() || !rate.is_finite() || self.is_at_rest();
        if settled {
            self.value = 0.0;
            self.rate = 0.0;
        }
        SpringStep {
            value: self.value,
            rate: self.rate,
            settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_nanos(16_666_667);

    fn run_to_rest(mut spring: Spring, max_frames: usize) -> Option<usize> {
        for i in 0..max_frames {
            if spring.step(FRAME).settled {
                return Some(i + 1);
            }
        }
        None
    }

    #[test]
    fn floors_are_applied() {
        let c = SpringConfig::new(10.0, 0.0);
        assert_eq!(c.stiffness(), STIFFNESS_FLOOR);
        assert_eq!(c.damping_ratio(), DAMPING_RATIO_FLOOR);
        let c = SpringConfig::new(f64::NAN, f64::NAN);
        assert_eq!(c.stiffness(), STIFFNESS_FLOOR);
        assert_eq!(c.damping_ratio(), DAMPING_RATIO_FLOOR);
    }

    #[test]
    fn non_finite_parameters_fall_back_to_floor() {
        let c = SpringConfig::new(f64::INFINITY, f64::INFINITY);
        assert_eq!(c, SpringConfig::new(STIFFNESS_FLOOR, DAMPING_RATIO_FLOOR));
        let c = SpringConfig::new(500.0, f64::NEG_INFINITY);
        assert_eq!(c.damping_ratio(), DAMPING_RATIO_FLOOR);
        let spring = Spring::new(SpringConfig::new(500.0, f64::INFINITY), 800.0, 0.0);
        assert!(run_to_rest(spring, 60 * 60).is_some(), "spring never settled");
    }

    #[test]
    fn non_finite_state_snaps_to_rest() {
        let mut spring = Spring::new(SpringConfig::default(), f64::INFINITY, 0.0);
        let s = spring.step(FRAME);
        assert!(s.settled, "non-finite step must settle");
        assert_eq!((s.value, s.rate), (0.0, 0.0));
    }

    #[test]
    fn no_ceiling() {
        let c = SpringConfig::new(100_000.0, 5.0);
        assert_eq!(c.stiffness(), 100_000.0);
        assert_eq!(c.damping_ratio(), 5.0);
    }

    #[test]
    fn from_progress_scales_damping() {
        let c = SpringConfig::from_progress(500, 30);
        assert_eq!(c.stiffness(), 500.0);
        assert!((c.damping_ratio() - 0.3).abs() < 1e-12, "got {}", c.damping_ratio());
        let c = SpringConfig::from_progress(0, 0);
        assert_eq!(c, SpringConfig::new(STIFFNESS_FLOOR, DAMPING_RATIO_FLOOR));
    }

    #[test]
    fn zero_dt_is_identity() {
        for zeta in [0.3, 1.0, 2.0] {
            let c = SpringConfig::new(500.0, zeta);
            let (v, r) = c.evaluate(800.0, -40.0, 0.0);
            assert!((v - 800.0).abs() < 1e-9, "zeta {zeta}: value {v}");
            assert!((r + 40.0).abs() < 1e-9, "zeta {zeta}: rate {r}");
        }
    }

    #[test]
    fn settles_in_every_regime() {
        for zeta in [0.05, 0.3, 1.0, 1.5, 4.0] {
            let spring = Spring::new(SpringConfig::new(500.0, zeta), 1000.0, 0.0);
            let frames = run_to_rest(spring, 60 * 60);
            assert!(frames.is_some(), "zeta {zeta} never settled");
        }
    }

    #[test]
    fn settled_value_is_exactly_zero() {
        let mut spring = Spring::new(SpringConfig::default(), -700.0, 0.0);
        let mut last = spring.step(FRAME);
        while !last.settled {
            last = spring.step(FRAME);
        }
        assert_eq!(last.value, 0.0);
        assert_eq!(last.rate, 0.0);
        // Stepping a settled spring keeps it at rest.
        assert_eq!(spring.step(FRAME), last);
    }

    #[test]
    fn under_damped_overshoots() {
        let mut spring = Spring::new(SpringConfig::new(500.0, 0.2), 1000.0, 0.0);
        let mut min = f64::MAX;
        for _ in 0..120 {
            min = min.min(spring.step(FRAME).value);
        }
        assert!(min < 0.0, "expected overshoot below zero, min was {min}");
    }

    #[test]
    fn critically_damped_does_not_overshoot() {
        let mut spring = Spring::new(SpringConfig::new(500.0, 1.0), 1000.0, 0.0);
        for _ in 0..240 {
            let s = spring.step(FRAME);
            assert!(s.value >= 0.0, "overshoot to {}", s.value);
            if s.settled {
                break;
            }
        }
    }

    #[test]
    fn stiffer_spring_settles_sooner() {
        let soft = run_to_rest(Spring::new(SpringConfig::new(50.0, 1.0), 1000.0, 0.0), 10_000);
        let stiff = run_to_rest(Spring::new(SpringConfig::new(1500.0, 1.0), 1000.0, 0.0), 10_000);
        assert!(stiff.unwrap() < soft.unwrap(), "stiff {stiff:?} soft {soft:?}");
    }

    #[test]
    fn step_is_frame_rate_independent() {
        let config = SpringConfig::new(300.0, 0.5);
        let mut coarse = Spring::new(config, 500.0, 0.0);
        let mut fine = Spring::new(config, 500.0, 0.0);
        coarse.step(Duration::from_millis(32));
        fine.step(Duration::from_millis(16));
        fine.step(Duration::from_millis(16));
        assert!(
            (coarse.value() - fine.value()).abs() < 1e-6,
            "{} vs {}",
            coarse.value(),
            fine.value()
        );
    }
}
