// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated drag and spring settle over a recycled icon pool.
//!
//! A 3×3 grid of compositors is attached to one
//! [`BroadcastBridge`](laminar_core::bridge::BroadcastBridge). Two synthetic
//! horizontal flings scroll the grid through a larger icon catalog, so slots
//! are rebound as they scroll out of view. On each release the velocity
//! settles back to zero on a spring while the corner radius morphs to the
//! next preset; the second fling grabs the grid mid-settle and cancels it.
//! The middle cell animates its press scale while a finger is down. Selected
//! frames are saved as PNGs, and every trace event is printed and exported
//! as a Chrome trace.
//!
//! Set `RUST_LOG=debug` to see raster allocations.

use std::f64::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use kurbo::{BezPath, Circle, Point, Shape};

use laminar_core::animation::{CornerMorph, Easing, ScalarProperty, Tween};
use laminar_core::bridge::{
    BroadcastBridge, CornerRadius, IconCatalog, SharedMotionParameters, SlotId, TouchScale,
};
use laminar_core::color::Color;
use laminar_core::compositor::{IconCompositor, IconStyle};
use laminar_core::geometry::IconGeometry;
use laminar_core::settle::{MotionController, MotionPhase, VelocityUpdate};
use laminar_core::time::FrameTime;
use laminar_core::trace::{
    BindEvent, FrameSummary, FrameSummaryBuilder, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    SettleEvent, SettleKind, TraceSink, Tracer, VelocityEvent, VelocitySource,
};
use laminar_raster::{Fill, Icon, PixmapPainter, RasterLayerPair, VectorLayer};

use laminar_debug::pretty::PrettyPrintSink;
use laminar_debug::recorder::RecorderSink;

const DENSITY: f64 = 2.0;
const COLUMNS: u32 = 3;
const ROWS: u32 = 3;
const CELL: u32 = 200;
/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
/// `(first drag frame, release frame)` of each fling.
const FLINGS: [(u64, u64); 2] = [(0, 24), (40, 52)];
const PRESS_DURATION: Duration = Duration::from_millis(100);
const MAX_FRAMES: u64 = 240;
/// Horizontal scroll distance, in pixels, that shifts the grid by one column.
const COLUMN_PITCH: f64 = CELL as f64;

/// Sends every event to both sinks.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Fanout<'_> {
    fn on_velocity(&mut self, e: &VelocityEvent) {
        self.pretty.on_velocity(e);
        self.recorder.on_velocity(e);
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        self.pretty.on_settle(e);
        self.recorder.on_settle(e);
    }

    fn on_bind(&mut self, e: &BindEvent) {
        self.pretty.on_bind(e);
        self.recorder.on_bind(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.pretty.on_phase_begin(e);
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.pretty.on_phase_end(e);
        self.recorder.on_phase_end(e);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.pretty.on_frame_summary(s);
        self.recorder.on_frame_summary(s);
    }
}

/// Frame clock: simulated frame start plus real time spent in the frame.
struct Clock {
    frame_start: Instant,
    now: FrameTime,
}

impl Clock {
    fn stamp(&self) -> FrameTime {
        let spent = u64::try_from(self.frame_start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        FrameTime::from_nanos(self.now.nanos().saturating_add(spent))
    }
}

/// One on-screen cell.
struct Cell {
    slot: SlotId,
    origin: Point,
    column: u32,
    row: u32,
}

fn star(points: u32, outer: f64, inner: f64) -> BezPath {
    let center = Point::new(54.0, 54.0);
    let mut path = BezPath::new();
    for i in 0..points * 2 {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = TAU * f64::from(i) / f64::from(points * 2) - TAU / 4.0;
        let p = center + kurbo::Vec2::new(angle.cos() * r, angle.sin() * r);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn catalog() -> IconCatalog<Icon> {
    const BACKGROUNDS: [u32; 6] = [
        0xff_1e88e5, 0xff_43a047, 0xff_fb8c00, 0xff_8e24aa, 0xff_e53935, 0xff_00897b,
    ];
    BACKGROUNDS
        .iter()
        .enumerate()
        .map(|(i, &argb)| {
            let glyph = if i % 2 == 0 {
                Circle::new((54.0, 54.0), 22.0).to_path(0.1)
            } else {
                star(5, 26.0, 11.0)
            };
            Icon::new(
                Fill(Color::from_argb(argb)),
                VectorLayer::new(glyph, Color::WHITE),
            )
        })
        .collect()
}

/// Catalog position shown by a cell after scrolling `scroll_x` pixels.
///
/// The catalog wraps after 64 columns.
fn position_for(cell: &Cell, scroll_x: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scroll distance stays within a few thousand columns"
    )]
    let shift = (scroll_x / COLUMN_PITCH).floor() as i64;
    let column = (i64::from(cell.column) + shift).rem_euclid(64);
    usize::try_from(column * i64::from(ROWS) + i64::from(cell.row)).unwrap_or(0)
}

/// What the finger does on a given frame.
#[derive(Clone, Copy, Debug)]
enum Gesture {
    None,
    Drag(f64),
    Release(f64),
}

fn gesture(frame: u64) -> Gesture {
    for (start, release) in FLINGS {
        if (start..=release).contains(&frame) {
            // Accelerate to the left, peaking shortly before release.
            let t = (frame - start) as f64 / (release - start) as f64;
            let vx = -900.0 * (t * 1.2).min(1.0);
            return if frame == release {
                Gesture::Release(vx)
            } else {
                Gesture::Drag(vx)
            };
        }
    }
    Gesture::None
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut sink = Fanout {
        pretty: &mut pretty,
        recorder: &mut recorder,
    };
    let mut tracer = Tracer::new(&mut sink);

    // -- pool --------------------------------------------------------------
    let catalog = catalog();
    let style = IconStyle::new(IconGeometry::from_density(DENSITY))
        .with_shadow(Color::from_argb(0x40_000000), 2.0 * DENSITY);
    let mut bridge: BroadcastBridge<RasterLayerPair> =
        BroadcastBridge::new(SharedMotionParameters::for_density(DENSITY));

    let mut cells = Vec::new();
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            let mut compositor = IconCompositor::new(style, RasterLayerPair::new());
            compositor.set_size(f64::from(CELL), f64::from(CELL));
            let slot = bridge.attach(compositor);
            let origin = Point::new(f64::from(column * CELL), f64::from(row * CELL));
            cells.push(Cell {
                slot,
                origin,
                column,
                row,
            });
        }
    }

    let mut painter = PixmapPainter::new(COLUMNS * CELL, ROWS * CELL)
        .expect("failed to allocate the frame pixmap");

    // -- motion ------------------------------------------------------------
    let mut controller = MotionController::default();
    let mut morph = CornerMorph::new(DENSITY);
    let mut scroll_x = 0.0;
    let pressed = TouchScale(cells[4].slot);
    let mut press: Option<Tween> = None;
    let last_release = FLINGS[FLINGS.len() - 1].1;
    let mut saved = Vec::new();

    for frame_index in 0..MAX_FRAMES {
        let clock = Clock {
            frame_start: Instant::now(),
            now: FrameTime::from_nanos(frame_index * REFRESH_INTERVAL_NS),
        };
        let mut summary = FrameSummaryBuilder::new(frame_index, clock.now);

        // 1. Input
        let t = begin(&mut tracer, &mut summary, frame_index, PhaseKind::Input, &clock);
        let mut update = VelocityUpdate::default();
        let mut source = VelocitySource::Drag;
        match gesture(frame_index) {
            Gesture::Drag(vx) => {
                let first = controller.phase() != MotionPhase::Dragging;
                let sample = controller.on_velocity_sample(vx, 0.0);
                if let Some(ticket) = sample.cancelled {
                    tracer.settle(&SettleEvent {
                        frame_index,
                        time: t,
                        ticket,
                        kind: SettleKind::Cancelled,
                        update: VelocityUpdate::default(),
                    });
                }
                update = sample.update;
                if first {
                    press = Some(press_tween(&bridge, &pressed, 1.0));
                }
            }
            Gesture::Release(vx) => {
                if let Some(ticket) = controller.on_release(vx, 0.0) {
                    tracer.settle(&SettleEvent {
                        frame_index,
                        time: t,
                        ticket,
                        kind: SettleKind::Started,
                        update: VelocityUpdate { x: Some(vx), y: None },
                    });
                }
                press = Some(press_tween(&bridge, &pressed, 0.0));
                morph.advance(&bridge, &CornerRadius);
            }
            Gesture::None => {}
        }
        if let Some(tween) = &mut press {
            let sample = tween.sample(clock.now);
            pressed.set(&mut bridge, sample.value);
            if sample.finished {
                press = None;
            }
        }
        end(&mut tracer, &mut summary, frame_index, PhaseKind::Input, &clock);

        // 2. Settle
        let t = begin(&mut tracer, &mut summary, frame_index, PhaseKind::Settle, &clock);
        if let Some(ticket) = controller.active_settle() {
            if let Some(step) = controller.step(ticket, t) {
                update = step.update;
                source = VelocitySource::Settle;
                tracer.settle(&SettleEvent {
                    frame_index,
                    time: t,
                    ticket,
                    kind: if step.finished {
                        SettleKind::Finished
                    } else {
                        SettleKind::Stepped
                    },
                    update: step.update,
                });
            }
        }
        let morphing = morph.on_frame(clock.now, &mut bridge, &CornerRadius);
        end(&mut tracer, &mut summary, frame_index, PhaseKind::Settle, &clock);

        // 3. Broadcast
        let t = begin(&mut tracer, &mut summary, frame_index, PhaseKind::Broadcast, &clock);
        if !update.is_empty() {
            update.apply_to(&mut bridge);
            tracer.velocity(&VelocityEvent {
                frame_index,
                time: t,
                update,
                source,
                slots: u32::try_from(bridge.len()).unwrap_or(u32::MAX),
            });
        }
        scroll_x -= bridge.params().velocity().x * REFRESH_INTERVAL_NS as f64 / 1e9;
        for cell in &cells {
            let position = position_for(cell, scroll_x);
            if bridge.position(cell.slot) == Some(position) {
                continue;
            }
            let result = bridge.bind(cell.slot, position, &catalog);
            tracer.bind(&BindEvent {
                frame_index,
                time: clock.stamp(),
                slot: cell.slot,
                position,
                result,
            });
        }
        end(&mut tracer, &mut summary, frame_index, PhaseKind::Broadcast, &clock);

        // 4. Composite
        begin(&mut tracer, &mut summary, frame_index, PhaseKind::Composite, &clock);
        let mut dirty = false;
        for (_, compositor) in bridge.iter_mut() {
            dirty |= compositor.take_redraw();
        }
        let mut composited = 0;
        if dirty {
            painter.clear(Color::from_argb(0xff_fafafa));
            for cell in &cells {
                painter.set_origin(cell.origin);
                if bridge.compositor(cell.slot).draw(&mut painter) {
                    composited += 1;
                }
            }
        }
        end(&mut tracer, &mut summary, frame_index, PhaseKind::Composite, &clock);

        // 5. Summary
        let settling = controller.active_settle().is_some();
        summary.set_composited(composited);
        summary.set_settling(settling);
        tracer.frame_summary(&summary.finish());

        if matches!(frame_index, 0 | 12 | 30 | 46) {
            saved.push(save(&painter, frame_index));
        }
        if frame_index > last_release && !settling && !morphing && press.is_none() {
            saved.push(save(&painter, frame_index));
            log::info!("settled after {frame_index} frames");
            break;
        }
    }

    drop(tracer);
    drop(sink);

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    laminar_debug::chrome::export(recorder.events(), &mut writer)
        .expect("failed to write Chrome trace");

    log::info!(
        "wrote {path} ({} events, {} bind failures) and {} frames",
        recorder.events().len(),
        recorder.bind_failures(),
        saved.iter().flatten().count(),
    );
}

fn begin(
    tracer: &mut Tracer<'_>,
    summary: &mut FrameSummaryBuilder,
    frame_index: u64,
    phase: PhaseKind,
    clock: &Clock,
) -> FrameTime {
    let timestamp = clock.stamp();
    tracer.phase_begin(&PhaseBeginEvent {
        frame_index,
        phase,
        timestamp,
    });
    summary.phase_begin(phase, timestamp);
    timestamp
}

fn end(
    tracer: &mut Tracer<'_>,
    summary: &mut FrameSummaryBuilder,
    frame_index: u64,
    phase: PhaseKind,
    clock: &Clock,
) {
    let timestamp = clock.stamp();
    tracer.phase_end(&PhaseEndEvent {
        frame_index,
        phase,
        timestamp,
    });
    summary.phase_end(phase, timestamp);
}

/// Animates the pressed cell's touch scale from its current value.
fn press_tween(
    bridge: &BroadcastBridge<RasterLayerPair>,
    pressed: &TouchScale,
    to: f64,
) -> Tween {
    Tween::new(pressed.get(bridge), to, PRESS_DURATION, Easing::FastOutSlowIn)
}

fn save(painter: &PixmapPainter, frame_index: u64) -> Option<String> {
    let pixmap: &tiny_skia::Pixmap = painter.pixmap();
    let path = format!("frame-{frame_index:03}.png");
    match pixmap.save_png(&path) {
        Ok(()) => {
            log::info!("saved {path}");
            Some(path)
        }
        Err(err) => {
            log::warn!("could not save {path}: {err}");
            None
        }
    }
}
