// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the motion and compositing loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! frame loop calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! The core types do not emit events themselves; the caller that drives them
//! (typically a frame loop holding a [`MotionController`] and a
//! [`BroadcastBridge`]) reports what happened. [`FrameSummaryBuilder`] collects
//! phase timestamps during a frame and produces a [`FrameSummary`] at the end.
//!
//! [`MotionController`]: crate::settle::MotionController
//! [`BroadcastBridge`]: crate::bridge::BroadcastBridge

use core::time::Duration;

use crate::backend::BindError;
use crate::bridge::SlotId;
use crate::settle::{SettleTicket, VelocityUpdate};
use crate::time::FrameTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which stage of a frame is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Consuming gesture samples.
    Input,
    /// Stepping the settle springs.
    Settle,
    /// Writing shared parameters into every live compositor.
    Broadcast,
    /// Painting the live compositors.
    Composite,
}

impl PhaseKind {
    /// All phases, in frame order.
    pub const ALL: [Self; 4] = [Self::Input, Self::Settle, Self::Broadcast, Self::Composite];

    const fn index(self) -> usize {
        match self {
            Self::Input => 0,
            Self::Settle => 1,
            Self::Broadcast => 2,
            Self::Composite => 3,
        }
    }
}

/// Where a broadcast velocity came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VelocitySource {
    /// A live gesture sample.
    Drag,
    /// A settle spring frame.
    Settle,
}

/// What happened to a settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettleKind {
    /// Springs were seeded on release.
    Started,
    /// A frame advanced the springs.
    Stepped,
    /// Both springs came to rest.
    Finished,
    /// A new drag superseded the settle.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a velocity is fanned out to the collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// When the write happened.
    pub time: FrameTime,
    /// The axes that were written.
    pub update: VelocityUpdate,
    /// Gesture sample or settle frame.
    pub source: VelocitySource,
    /// Number of live compositors that received it.
    pub slots: u32,
}

/// Emitted when a settle starts, advances, finishes or is cancelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// When it happened.
    pub time: FrameTime,
    /// The settle's ticket.
    pub ticket: SettleTicket,
    /// What happened.
    pub kind: SettleKind,
    /// Spring velocities after the event, for axes that are still moving.
    pub update: VelocityUpdate,
}

/// Emitted after a slot is bound to a catalog position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// When the bind happened.
    pub time: FrameTime,
    /// The slot that was bound.
    pub slot: SlotId,
    /// Catalog position.
    pub position: usize,
    /// The bind outcome.
    pub result: Result<(), BindError>,
}

/// Marks the beginning of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Time at the start of the phase.
    pub timestamp: FrameTime,
}

/// Marks the end of a frame phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Time at the end of the phase.
    pub timestamp: FrameTime,
}

/// Per-frame summary produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Frame time.
    pub now: FrameTime,
    /// Duration of each phase in [`PhaseKind::ALL`] order (zero if not
    /// measured).
    pub phases: [Duration; 4],
    /// Number of compositors that painted this frame.
    pub composited: u32,
    /// Whether a settle was in flight at the end of the frame.
    pub settling: bool,
}

impl FrameSummary {
    /// Duration of a single phase.
    #[inline]
    #[must_use]
    pub fn phase(&self, phase: PhaseKind) -> Duration {
        self.phases[phase.index()]
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a velocity is broadcast.
    fn on_velocity(&mut self, e: &VelocityEvent) {
        _ = e;
    }

    /// Called when a settle changes state.
    fn on_settle(&mut self, e: &SettleEvent) {
        _ = e;
    }

    /// Called after a slot bind, successful or not.
    fn on_bind(&mut self, e: &BindEvent) {
        _ = e;
    }

    /// Called at the beginning of a frame phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a frame phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called with a per-frame summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Forwards one event to the sink when tracing is compiled in.
macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`VelocityEvent`].
    #[inline]
    pub fn velocity(&mut self, e: &VelocityEvent) {
        dispatch!(self, on_velocity, e);
    }

    /// Emits a [`SettleEvent`].
    #[inline]
    pub fn settle(&mut self, e: &SettleEvent) {
        dispatch!(self, on_settle, e);
    }

    /// Emits a [`BindEvent`].
    #[inline]
    pub fn bind(&mut self, e: &BindEvent) {
        dispatch!(self, on_bind, e);
    }

    /// Emits a [`PhaseBeginEvent`].
    #[inline]
    pub fn phase_begin(&mut self, e: &PhaseBeginEvent) {
        dispatch!(self, on_phase_begin, e);
    }

    /// Emits a [`PhaseEndEvent`].
    #[inline]
    pub fn phase_end(&mut self, e: &PhaseEndEvent) {
        dispatch!(self, on_phase_end, e);
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        dispatch!(self, on_frame_summary, s);
    }
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects phase timestamps during a frame and produces a [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    frame_index: u64,
    now: FrameTime,
    phase_starts: [Option<FrameTime>; 4],
    phase_ends: [Option<FrameTime>; 4],
    composited: u32,
    settling: bool,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for frame `frame_index` at `now`.
    #[must_use]
    pub fn new(frame_index: u64, now: FrameTime) -> Self {
        Self {
            frame_index,
            now,
            phase_starts: [None; 4],
            phase_ends: [None; 4],
            composited: 0,
            settling: false,
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, t: FrameTime) {
        self.phase_starts[phase.index()] = Some(t);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, t: FrameTime) {
        self.phase_ends[phase.index()] = Some(t);
    }

    /// Sets how many compositors painted.
    pub fn set_composited(&mut self, count: u32) {
        self.composited = count;
    }

    /// Sets whether a settle is still in flight.
    pub fn set_settling(&mut self, settling: bool) {
        self.settling = settling;
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        let mut phases = [Duration::ZERO; 4];
        for phase in PhaseKind::ALL {
            let idx = phase.index();
            if let (Some(start), Some(end)) = (self.phase_starts[idx], self.phase_ends[idx]) {
                phases[idx] = end.saturating_duration_since(start);
            }
        }
        FrameSummary {
            frame_index: self.frame_index,
            now: self.now,
            phases,
            composited: self.composited,
            settling: self.settling,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
