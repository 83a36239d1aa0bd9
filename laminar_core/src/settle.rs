// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and spring-settle state machine.
//!
//! [`MotionController`] sits between the gesture collaborator and the
//! broadcast bridge. It never touches compositors itself: every input or
//! frame tick yields a [`VelocityUpdate`] which the caller writes through a
//! [`VelocityTarget`], so settle frames travel the same path as live drag
//! samples.
//!
//! ```text
//!            sample                 release (non-zero)          rest
//!   Idle ───────────► Dragging ───────────────────► Settling ─────────► Idle
//!    ▲                  ▲  │ release (zero)            │
//!    │                  │  └───────────────────────────┼──────────► Idle
//!    │                  └──────── sample (cancels) ────┘
//! ```
//!
//! Every settle is stamped with an epoch. A new drag sample bumps the epoch
//! and drops the springs in the same call, so a [`SettleTicket`] from the
//! superseded settle can never produce another write.

use crate::motion::{Orientation, clamp_velocity};
use crate::spring::{Spring, SpringConfig};
use crate::time::FrameTime;

/// Anything that accepts velocity writes: a single compositor or the whole
/// broadcast bridge.
pub trait VelocityTarget {
    /// Applies a horizontal velocity sample.
    fn set_velocity_x(&mut self, velocity: f64);

    /// Applies a vertical velocity sample.
    fn set_velocity_y(&mut self, velocity: f64);
}

/// Velocities to write for one input event or frame. `None` axes are left
/// alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityUpdate {
    /// New horizontal velocity, if it changed.
    pub x: Option<f64>,
    /// New vertical velocity, if it changed.
    pub y: Option<f64>,
}

impl VelocityUpdate {
    /// Whether the update writes nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Writes the present axes into `target`.
    pub fn apply_to<T: VelocityTarget + ?Sized>(self, target: &mut T) {
        if let Some(x) = self.x {
            target.set_velocity_x(x);
        }
        if let Some(y) = self.y {
            target.set_velocity_y(y);
        }
    }
}

/// Where the controller is in a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    /// No gesture and no settle in flight.
    #[default]
    Idle,
    /// Velocity comes straight from gesture samples.
    Dragging,
    /// Velocity comes only from the settle springs.
    Settling,
}

/// Identifies one settle. Stepping with a ticket from a superseded settle is
/// a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SettleTicket {
    epoch: u64,
}

impl SettleTicket {
    /// The settle's epoch (diagnostics only).
    #[inline]
    #[must_use]
    pub const fn epoch(self) -> u64 {
        self.epoch
    }
}

/// Result of one drag sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSample {
    /// Velocities to write for this sample.
    pub update: VelocityUpdate,
    /// The settle this sample interrupted, if one was in flight.
    pub cancelled: Option<SettleTicket>,
}

/// Result of one settle frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettleFrame {
    /// Velocities to write this frame.
    pub update: VelocityUpdate,
    /// Whether both springs are at rest; the controller is `Idle` again.
    pub finished: bool,
}

/// Converts gesture samples and frame ticks into velocity writes.
#[derive(Clone, Debug, Default)]
pub struct MotionController {
    orientation: Orientation,
    spring: SpringConfig,
    phase: MotionPhase,
    epoch: u64,
    settle_x: Option<Spring>,
    settle_y: Option<Spring>,
    last_frame: Option<FrameTime>,
}

impl MotionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(orientation: Orientation, spring: SpringConfig) -> Self {
        Self {
            orientation,
            spring,
            ..Self::default()
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Which axes live samples are forwarded on.
    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Changes which axes live samples are forwarded on.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Parameters used for the next settle.
    #[inline]
    #[must_use]
    pub fn spring_config(&self) -> SpringConfig {
        self.spring
    }

    /// Changes the parameters used for the next settle. A settle already in
    /// flight keeps its parameters.
    pub fn set_spring_config(&mut self, spring: SpringConfig) {
        self.spring = spring;
    }

    /// The ticket of the settle in flight, if any.
    #[must_use]
    pub fn active_settle(&self) -> Option<SettleTicket> {
        (self.phase == MotionPhase::Settling).then_some(SettleTicket { epoch: self.epoch })
    }

    /// Handles a down/move sample with instantaneous velocity `(vx, vy)`.
    ///
    /// Cancels any settle in flight before returning the live velocity; the
    /// superseded settle's ticket is reported in [`DragSample::cancelled`].
    pub fn on_velocity_sample(&mut self, vx: f64, vy: f64) -> DragSample {
        let mut cancelled = None;
        if self.phase != MotionPhase::Dragging {
            cancelled = self.active_settle();
            self.cancel_settle();
            self.phase = MotionPhase::Dragging;
        }
        DragSample {
            update: VelocityUpdate {
                x: self.orientation.tracks_x().then_some(vx),
                y: self.orientation.tracks_y().then_some(vy),
            },
            cancelled,
        }
    }

    /// Handles an up/cancel event with final velocity `(vx, vy)`.
    ///
    /// Starts one spring per axis whose seed velocity is non-zero; each
    /// spring starts at its seed and settles to zero. Orientation does not
    /// apply here: a release seeds both axes. Returns the new settle's
    /// ticket, or `None` when both axes were skipped.
    pub fn on_release(&mut self, vx: f64, vy: f64) -> Option<SettleTicket> {
        self.cancel_settle();
        let (seed_x, seed_y) = (clamp_velocity(vx), clamp_velocity(vy));
        self.settle_x = (seed_x != 0.0).then(|| Spring::new(self.spring, seed_x, 0.0));
        self.settle_y = (seed_y != 0.0).then(|| Spring::new(self.spring, seed_y, 0.0));

        if self.settle_x.is_none() && self.settle_y.is_none() {
            self.phase = MotionPhase::Idle;
            return None;
        }
        self.phase = MotionPhase::Settling;
        Some(SettleTicket { epoch: self.epoch })
    }

    /// Advances the settle identified by `ticket` to `now`.
    ///
    /// Returns `None` if the ticket is stale or nothing is settling. The first
    /// frame of a settle only establishes the time base and writes the seed
    /// velocities.
    pub fn step(&mut self, ticket: SettleTicket, now: FrameTime) -> Option<SettleFrame> {
        if self.phase != MotionPhase::Settling || ticket.epoch != self.epoch {
            return None;
        }
        let dt = match self.last_frame.replace(now) {
            Some(prev) => now.saturating_duration_since(prev),
            None => core::time::Duration::ZERO,
        };

        let mut update = VelocityUpdate::default();
        let mut finished = true;
        for (spring, out) in [
            (&mut self.settle_x, &mut update.x),
            (&mut self.settle_y, &mut update.y),
        ] {
            if let Some(s) = spring {
                let step = s.step(dt);
                *out = Some(step.value);
                if step.settled {
                    *spring = None;
                } else {
                    finished = false;
                }
            }
        }

        if finished {
            self.phase = MotionPhase::Idle;
            self.last_frame = None;
            self.epoch += 1;
        }
        Some(SettleFrame { update, finished })
    }

    /// Advances whatever settle is in flight. Convenience for frame loops
    /// that do not hold on to tickets.
    pub fn on_frame(&mut self, now: FrameTime) -> Option<SettleFrame> {
        let ticket = self.active_settle()?;
        self.step(ticket, now)
    }

    /// Stops any settle in flight without writing anything. Returns whether a
    /// settle was cancelled.
    pub fn cancel_settle(&mut self) -> bool {
        let was_settling = self.phase == MotionPhase::Settling;
        self.epoch += 1;
        self.settle_x = None;
        self.settle_y = None;
        self.last_frame = None;
        if was_settling {
            self.phase = MotionPhase::Idle;
        }
        was_settling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_NS: u64 = 16_666_667;

    #[derive(Default)]
    struct Recorder {
        x: Option<f64>,
        y: Option<f64>,
        writes: usize,
    }

    impl VelocityTarget for Recorder {
        fn set_velocity_x(&mut self, v: f64) {
            self.x = Some(v);
            self.writes += 1;
        }
        fn set_velocity_y(&mut self, v: f64) {
            self.y = Some(v);
            self.writes += 1;
        }
    }

    fn frame(i: u64) -> FrameTime {
        FrameTime(1_000_000_000 + i * FRAME_NS)
    }

    #[test]
    fn sample_enters_dragging() {
        let mut c = MotionController::default();
        assert_eq!(c.phase(), MotionPhase::Idle);
        let u = c.on_velocity_sample(300.0, -20.0).update;
        assert_eq!(c.phase(), MotionPhase::Dragging);
        assert_eq!(u, VelocityUpdate { x: Some(300.0), y: Some(-20.0) });
    }

    #[test]
    fn orientation_filters_live_samples() {
        let mut c = MotionController::new(Orientation::Horizontal, SpringConfig::default());
        let u = c.on_velocity_sample(300.0, -20.0).update;
        assert_eq!(u, VelocityUpdate { x: Some(300.0), y: None });
        c.set_orientation(Orientation::Vertical);
        let u = c.on_velocity_sample(300.0, -20.0).update;
        assert_eq!(u, VelocityUpdate { x: None, y: Some(-20.0) });
    }

    #[test]
    fn release_seeds_both_axes_regardless_of_orientation() {
        let mut c = MotionController::new(Orientation::Horizontal, SpringConfig::default());
        c.on_velocity_sample(300.0, -20.0);
        let ticket = c.on_release(300.0, -2000.0).unwrap();
        let f = c.step(ticket, frame(0)).unwrap();
        assert_eq!(f.update, VelocityUpdate { x: Some(300.0), y: Some(-1000.0) });
    }

    #[test]
    fn drag_reports_cancelled_settle_once() {
        let mut c = MotionController::default();
        assert_eq!(c.on_velocity_sample(10.0, 0.0).cancelled, None);
        let ticket = c.on_release(800.0, 0.0).unwrap();
        let sample = c.on_velocity_sample(10.0, 0.0);
        assert_eq!(sample.cancelled, Some(ticket));
        assert_eq!(sample.update, VelocityUpdate { x: Some(10.0), y: Some(0.0) });
        assert_eq!(c.on_velocity_sample(12.0, 0.0).cancelled, None, "already dragging");
        assert!(!c.cancel_settle());
    }

    #[test]
    fn infinite_damping_still_finishes() {
        let spring = SpringConfig::new(500.0, f64::INFINITY);
        let mut c = MotionController::new(Orientation::Both, spring);
        let ticket = c.on_release(800.0, 0.0).unwrap();
        let mut i = 0;
        loop {
            let f = c.step(ticket, frame(i)).expect("settle in flight");
            assert!(f.update.x.is_some_and(f64::is_finite), "frame {i}: {f:?}");
            if f.finished {
                break;
            }
            i += 1;
            assert!(i < 600, "settle did not converge");
        }
        assert_eq!(c.phase(), MotionPhase::Idle);
    }

    #[test]
    fn release_with_zero_velocity_is_idle() {
        let mut c = MotionController::default();
        c.on_velocity_sample(10.0, 0.0);
        assert!(c.on_release(0.0, 0.0).is_none());
        assert_eq!(c.phase(), MotionPhase::Idle);
        assert!(c.on_frame(frame(0)).is_none());
    }

    #[test]
    fn zero_axis_is_skipped() {
        let mut c = MotionController::default();
        let ticket = c.on_release(800.0, 0.0).unwrap();
        let f = c.step(ticket, frame(0)).unwrap();
        assert_eq!(f.update.x, Some(800.0), "first frame writes the seed");
        assert_eq!(f.update.y, None, "zero seed never writes");
    }

    #[test]
    fn settle_runs_to_zero_and_goes_idle() {
        let mut c = MotionController::default();
        c.on_velocity_sample(900.0, 400.0);
        let ticket = c.on_release(900.0, 400.0).unwrap();
        assert_eq!(c.phase(), MotionPhase::Settling);

        let mut target = Recorder::default();
        let mut i = 0;
        loop {
            let f = c.step(ticket, frame(i)).expect("settle in flight");
            f.update.apply_to(&mut target);
            if f.finished {
                break;
            }
            i += 1;
            assert!(i < 600, "settle did not converge");
        }
        assert_eq!(c.phase(), MotionPhase::Idle);
        assert_eq!(target.x, Some(0.0));
        assert_eq!(target.y, Some(0.0));
        assert!(c.step(ticket, frame(i + 1)).is_none(), "finished ticket is dead");
    }

    #[test]
    fn new_drag_cancels_settle_and_stale_ticks_do_not_write() {
        let mut c = MotionController::default();
        c.on_velocity_sample(700.0, 0.0);
        let ticket = c.on_release(700.0, 0.0).unwrap();

        let mut target = Recorder::default();
        c.step(ticket, frame(0)).unwrap().update.apply_to(&mut target);
        c.step(ticket, frame(1)).unwrap().update.apply_to(&mut target);
        assert_eq!(target.writes, 2);

        // Fresh drag supersedes the settle.
        let sample = c.on_velocity_sample(-50.0, 0.0);
        assert_eq!(sample.cancelled, Some(ticket), "drag reports the interrupted settle");
        sample.update.apply_to(&mut target);
        assert_eq!(c.phase(), MotionPhase::Dragging);
        assert_eq!(target.x, Some(-50.0));
        let writes = target.writes;

        // Injected tick from the superseded spring.
        assert!(c.step(ticket, frame(2)).is_none());
        assert!(c.on_frame(frame(3)).is_none());
        assert_eq!(target.writes, writes, "stale spring must not write");
        assert_eq!(target.x, Some(-50.0));
    }

    #[test]
    fn second_release_supersedes_first_settle() {
        let mut c = MotionController::default();
        let first = c.on_release(500.0, 0.0).unwrap();
        let second = c.on_release(-500.0, 0.0).unwrap();
        assert_ne!(first, second);
        assert!(c.step(first, frame(0)).is_none());
        let f = c.step(second, frame(0)).unwrap();
        assert_eq!(f.update.x, Some(-500.0));
    }

    #[test]
    fn cancel_settle_reports_state() {
        let mut c = MotionController::default();
        assert!(!c.cancel_settle());
        c.on_release(100.0, 100.0).unwrap();
        assert!(c.cancel_settle());
        assert_eq!(c.phase(), MotionPhase::Idle);
        assert!(c.active_settle().is_none());
    }

    #[test]
    fn in_flight_settle_keeps_its_spring() {
        let mut c = MotionController::new(Orientation::Both, SpringConfig::new(50.0, 1.0));
        let ticket = c.on_release(1000.0, 0.0).unwrap();
        c.step(ticket, frame(0)).unwrap();
        c.set_spring_config(SpringConfig::new(5000.0, 1.0));
        let soft = c.step(ticket, frame(1)).unwrap().update.x.unwrap();
        // A stiff spring would have pulled far below this in one frame.
        assert!(soft > 900.0, "got {soft}");
    }
}
