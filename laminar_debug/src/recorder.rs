// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in order, as a [`RecordedEvent`].

use laminar_core::trace::{
    BindEvent, FrameSummary, PhaseBeginEvent, PhaseEndEvent, SettleEvent, TraceSink,
    VelocityEvent,
};

/// A recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`VelocityEvent`].
    Velocity(VelocityEvent),
    /// A [`SettleEvent`].
    Settle(SettleEvent),
    /// A [`BindEvent`].
    Bind(BindEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Number of bind failures recorded.
    #[must_use]
    pub fn bind_failures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Bind(b) if b.result.is_err()))
            .count()
    }

    /// Consumes the recorder and returns the events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_velocity(&mut self, e: &VelocityEvent) {
        self.events.push(RecordedEvent::Velocity(*e));
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        self.events.push(RecordedEvent::Settle(*e));
    }

    fn on_bind(&mut self, e: &BindEvent) {
        self.events.push(RecordedEvent::Bind(*e));
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.events.push(RecordedEvent::PhaseBegin(*e));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.events.push(RecordedEvent::PhaseEnd(*e));
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.events.push(RecordedEvent::FrameSummary(*s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laminar_core::backend::BindError;
    use laminar_core::bridge::SlotId;
    use laminar_core::layer::Layer;
    use laminar_core::settle::VelocityUpdate;
    use laminar_core::time::FrameTime;
    use laminar_core::trace::{PhaseKind, Tracer, VelocitySource};

    fn bind(ok: bool) -> BindEvent {
        BindEvent {
            frame_index: 0,
            time: FrameTime::ZERO,
            slot: SlotId::from_raw(2, 1),
            position: 11,
            result: if ok {
                Ok(())
            } else {
                Err(BindError::MissingLayer(Layer::Foreground))
            },
        }
    }

    #[test]
    fn records_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 1,
            phase: PhaseKind::Input,
            timestamp: FrameTime(10),
        });
        rec.on_velocity(&VelocityEvent {
            frame_index: 1,
            time: FrameTime(12),
            update: VelocityUpdate {
                x: Some(1.0),
                y: None,
            },
            source: VelocitySource::Drag,
            slots: 4,
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 1,
            phase: PhaseKind::Input,
            timestamp: FrameTime(20),
        });
        let kinds: Vec<_> = rec
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::PhaseBegin(_) => "begin",
                RecordedEvent::Velocity(_) => "velocity",
                RecordedEvent::PhaseEnd(_) => "end",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["begin", "velocity", "end"]);
    }

    #[test]
    fn counts_bind_failures() {
        let mut rec = RecorderSink::new();
        rec.on_bind(&bind(true));
        rec.on_bind(&bind(false));
        rec.on_bind(&bind(false));
        assert_eq!(rec.bind_failures(), 2);
    }

    #[test]
    fn receives_through_tracer() {
        let mut rec = RecorderSink::new();
        let mut tracer = Tracer::new(&mut rec);
        tracer.bind(&bind(true));
        drop(tracer);
        assert_eq!(rec.into_events(), [RecordedEvent::Bind(bind(true))]);
    }
}
