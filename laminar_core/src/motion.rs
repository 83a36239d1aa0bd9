// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity → displacement mapping.
//!
//! Drag velocity is clamped to `[-MAX_VELOCITY, MAX_VELOCITY]` and mapped
//! linearly, and inversely, onto a displacement of up to one icon size:
//!
//! ```text
//!   displacement(v) = icon_size × clamp(v) / -MAX_VELOCITY
//! ```
//!
//! Fast motion to the right pushes layer content to the left, so layers
//! appear to lag behind the gesture. Each layer then scales the shared
//! displacement by its own translate factor.

/// Velocity magnitude (units per second) that maps to a full icon-size
/// displacement.
pub const MAX_VELOCITY: f64 = 1000.0;

/// Clamps a raw velocity sample; `NaN` is treated as no motion.
#[inline]
#[must_use]
pub fn clamp_velocity(velocity: f64) -> f64 {
    if velocity.is_nan() {
        0.0
    } else {
        velocity.clamp(-MAX_VELOCITY, MAX_VELOCITY)
    }
}

/// Maps a velocity sample to the shared displacement for an icon of
/// `icon_size` pixels.
#[inline]
#[must_use]
pub fn displacement(icon_size: f64, velocity: f64) -> f64 {
    icon_size * clamp_velocity(velocity) / -MAX_VELOCITY
}

/// Which gesture axes feed live velocity into the collection.
///
/// A horizontally scrolling grid only forwards horizontal velocity while the
/// finger is down; a vertical grid only vertical velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Forward both axes.
    #[default]
    Both,
    /// Forward only the horizontal axis.
    Horizontal,
    /// Forward only the vertical axis.
    Vertical,
}

impl Orientation {
    /// Whether horizontal velocity is forwarded.
    #[inline]
    #[must_use]
    pub const fn tracks_x(self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }

    /// Whether vertical velocity is forwarded.
    #[inline]
    #[must_use]
    pub const fn tracks_y(self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }

    /// Switches between horizontal and vertical; `Both` is unchanged.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Both => Self::Both,
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
