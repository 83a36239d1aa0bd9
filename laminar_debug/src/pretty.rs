// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds on the frame clock.

use std::io::Write;
use std::time::Duration;

use laminar_core::settle::VelocityUpdate;
use laminar_core::time::FrameTime;
use laminar_core::trace::{
    BindEvent, FrameSummary, PhaseBeginEvent, PhaseEndEvent, PhaseKind, SettleEvent, SettleKind,
    TraceSink, VelocityEvent, VelocitySource,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    settle_steps: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("settle_steps", &self.settle_steps)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-frame settle steps are skipped; see
    /// [`with_settle_steps`](Self::with_settle_steps).
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            settle_steps: false,
        }
    }

    /// Also prints every settle frame, not just start, finish and cancel.
    #[must_use]
    pub fn with_settle_steps(mut self, enabled: bool) -> Self {
        self.settle_steps = enabled;
        self
    }
}

fn ms(t: FrameTime) -> f64 {
    Duration::from_nanos(t.nanos()).as_secs_f64() * 1000.0
}

fn us(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Input => "input",
        PhaseKind::Settle => "settle",
        PhaseKind::Broadcast => "broadcast",
        PhaseKind::Composite => "composite",
    }
}

struct Axes(VelocityUpdate);

impl std::fmt::Display for Axes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.0.x, self.0.y) {
            (Some(x), Some(y)) => write!(f, "x={x:.1} y={y:.1}"),
            (Some(x), None) => write!(f, "x={x:.1}"),
            (None, Some(y)) => write!(f, "y={y:.1}"),
            (None, None) => f.write_str("-"),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_velocity(&mut self, e: &VelocityEvent) {
        let source = match e.source {
            VelocitySource::Drag => "drag",
            VelocitySource::Settle => "settle",
        };
        let _ = writeln!(
            self.writer,
            "[velocity] frame={} at {:.1}ms {source} {} slots={}",
            e.frame_index,
            ms(e.time),
            Axes(e.update),
            e.slots,
        );
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        let kind = match e.kind {
            SettleKind::Started => "started",
            SettleKind::Stepped if !self.settle_steps => return,
            SettleKind::Stepped => "step",
            SettleKind::Finished => "finished",
            SettleKind::Cancelled => "cancelled",
        };
        let _ = writeln!(
            self.writer,
            "[settle:{kind}] frame={} epoch={} at {:.1}ms {}",
            e.frame_index,
            e.ticket.epoch(),
            ms(e.time),
            Axes(e.update),
        );
    }

    fn on_bind(&mut self, e: &BindEvent) {
        let outcome = match &e.result {
            Ok(()) => "ok".to_owned(),
            Err(err) => format!("FAILED ({err})"),
        };
        let _ = writeln!(
            self.writer,
            "[bind] frame={} {:?} position={} {outcome}",
            e.frame_index, e.slot, e.position,
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.1}ms",
            e.frame_index,
            phase_name(e.phase),
            ms(e.timestamp),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.1}ms",
            e.frame_index,
            phase_name(e.phase),
            ms(e.timestamp),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let settling = if s.settling { " settling" } else { "" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} input={:.1}µs settle={:.1}µs broadcast={:.1}µs \
             composite={:.1}µs drawn={}{settling}",
            s.frame_index,
            us(s.phase(PhaseKind::Input)),
            us(s.phase(PhaseKind::Settle)),
            us(s.phase(PhaseKind::Broadcast)),
            us(s.phase(PhaseKind::Composite)),
            s.composited,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laminar_core::backend::BindError;
    use laminar_core::bridge::SlotId;
    use laminar_core::settle::MotionController;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.writer).unwrap()
    }

    #[test]
    fn pretty_print_velocity() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_velocity(&VelocityEvent {
            frame_index: 1,
            time: FrameTime::from_millis(16),
            update: VelocityUpdate {
                x: Some(-320.0),
                y: None,
            },
            source: VelocitySource::Drag,
            slots: 9,
        });
        let output = output(sink);
        assert!(output.contains("[velocity]"), "got: {output}");
        assert!(output.contains("x=-320.0"), "got: {output}");
        assert!(output.contains("slots=9"), "got: {output}");
    }

    #[test]
    fn settle_steps_are_opt_in() {
        let mut controller = MotionController::default();
        let ticket = controller.on_release(100.0, 0.0).unwrap();
        let event = SettleEvent {
            frame_index: 2,
            time: FrameTime::ZERO,
            ticket,
            kind: SettleKind::Stepped,
            update: VelocityUpdate::default(),
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_settle(&event);
        assert!(output(quiet).is_empty());

        let mut verbose = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_settle_steps(true);
        verbose.on_settle(&event);
        assert!(output(verbose).starts_with("[settle:step]"));
    }

    #[test]
    fn bind_failure_is_spelled_out() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_bind(&BindEvent {
            frame_index: 0,
            time: FrameTime::ZERO,
            slot: SlotId::from_raw(3, 0),
            position: 17,
            result: Err(BindError::NoIcon { position: 17 }),
        });
        let output = output(sink);
        assert!(output.contains("SlotId(3@gen0)"), "got: {output}");
        assert!(output.contains("FAILED (no icon for position 17)"), "got: {output}");
    }
}
