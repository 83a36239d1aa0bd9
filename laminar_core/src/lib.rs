// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dual-layer icon compositing with velocity-driven parallax.
//!
//! `laminar_core` models an icon as two independently rasterized layers
//! (background and foreground) that share a rounded-rect mask and an optional
//! drop shadow. Each layer is sampled through its own affine matrix, so drag
//! velocity can push the layers by different amounts and touch input can
//! scale them independently. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   gesture samples ──► MotionController ──► VelocityUpdate
//!                             │ (release)          │
//!                             ▼                    ▼
//!                       spring settle ──►  BroadcastBridge ──► IconCompositor (× N slots)
//!                                                                   │
//!                                                                   ▼
//!                                             CompositePlan ──► Painter::paint()
//! ```
//!
//! **[`geometry`]**: Canvas and icon sizes, viewport offset.
//!
//! **[`color`]** and **[`time`]**: Small value types (RGBA color, frame
//! timestamps).
//!
//! **[`transform`]**: The per-layer sampling matrix.
//!
//! **[`layer`]**: Per-layer transform state and the background/foreground
//! pair.
//!
//! **[`motion`]**: Velocity clamping and the velocity → displacement map.
//!
//! **[`spring`]**: Closed-form damped spring stepping.
//!
//! **[`settle`]**: The drag/settle state machine that turns gesture samples
//! and frame ticks into velocity writes.
//!
//! **[`animation`]**: Eased tweens and the [`ScalarProperty`](animation::ScalarProperty)
//! seam used by external animation drivers.
//!
//! **[`compositor`]**: A single icon instance: setters, bounds, and the draw
//! plan.
//!
//! **[`backend`]**: The [`LayerSurfaces`](backend::LayerSurfaces) and
//! [`Painter`](backend::Painter) traits that raster backends implement.
//!
//! **[`bridge`]**: The recycled slot pool that fans shared parameters out to
//! every live compositor and replays them on rebind.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod backend;
pub mod bridge;
pub mod color;
pub mod compositor;
pub mod geometry;
pub mod layer;
pub mod motion;
pub mod settle;
pub mod spring;
pub mod time;
pub mod trace;
pub mod transform;
