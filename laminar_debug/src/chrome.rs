// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events kept by a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use laminar_core::settle::VelocityUpdate;
use laminar_core::time::FrameTime;
use laminar_core::trace::PhaseKind;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Frame phases become duration (`B`/`E`) pairs on thread 0. Velocity, settle
/// and bind events are instants on thread 1. Spring velocities are also
/// emitted as a counter track so settles show up as a curve.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();

    for recorded in events {
        match recorded {
            RecordedEvent::Velocity(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Velocity",
                    "cat": "Motion",
                    "ts": to_us(e.time),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "source": format!("{:?}", e.source),
                        "x": e.update.x,
                        "y": e.update.y,
                        "slots": e.slots,
                    }
                }));
            }
            RecordedEvent::Settle(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": format!("Settle{:?}", e.kind),
                    "cat": "Motion",
                    "ts": to_us(e.time),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "epoch": e.ticket.epoch(),
                    }
                }));
                out.push(counter(e.time, e.update));
            }
            RecordedEvent::Bind(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": if e.result.is_ok() { "Bind" } else { "BindFailed" },
                    "cat": "Bridge",
                    "ts": to_us(e.time),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "slot": e.slot.index(),
                        "generation": e.slot.generation(),
                        "position": e.position,
                        "error": e.result.err().map(|err| err.to_string()),
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                out.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": to_us(e.timestamp),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                out.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": to_us(e.timestamp),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                out.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": to_us(s.now),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "input_us": s.phase(PhaseKind::Input).as_secs_f64() * 1e6,
                        "settle_us": s.phase(PhaseKind::Settle).as_secs_f64() * 1e6,
                        "broadcast_us": s.phase(PhaseKind::Broadcast).as_secs_f64() * 1e6,
                        "composite_us": s.phase(PhaseKind::Composite).as_secs_f64() * 1e6,
                        "composited": s.composited,
                        "settling": s.settling,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn counter(time: FrameTime, update: VelocityUpdate) -> Value {
    json!({
        "ph": "C",
        "name": "SpringVelocity",
        "cat": "Motion",
        "ts": to_us(time),
        "pid": 0,
        "tid": 1,
        "args": {
            "x": update.x.unwrap_or(0.0),
            "y": update.y.unwrap_or(0.0),
        }
    })
}

fn to_us(t: FrameTime) -> f64 {
    t.nanos() as f64 / 1000.0
}
