// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animatable bridge properties.
//!
//! Writing through the shared properties goes through the bridge's broadcast
//! setters, so an animation reaches every live compositor. [`TouchScale`] is
//! the exception: it addresses a single slot.

use crate::animation::ScalarProperty;
use crate::backend::LayerSurfaces;

use super::{BroadcastBridge, SlotId};

/// The shared corner radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerRadius;

/// The shared horizontal velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityX;

/// The shared vertical velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityY;

impl<S: LayerSurfaces> ScalarProperty<BroadcastBridge<S>> for CornerRadius {
    fn get(&self, bridge: &BroadcastBridge<S>) -> f64 {
        bridge.params().corner_radius()
    }

    fn set(&self, bridge: &mut BroadcastBridge<S>, value: f64) {
        bridge.set_corner_radius(value);
    }
}

impl<S: LayerSurfaces> ScalarProperty<BroadcastBridge<S>> for VelocityX {
    fn get(&self, bridge: &BroadcastBridge<S>) -> f64 {
        bridge.params().velocity().x
    }

    fn set(&self, bridge: &mut BroadcastBridge<S>, value: f64) {
        bridge.set_velocity_x(value);
    }
}

impl<S: LayerSurfaces> ScalarProperty<BroadcastBridge<S>> for VelocityY {
    fn get(&self, bridge: &BroadcastBridge<S>) -> f64 {
        bridge.params().velocity().y
    }

    fn set(&self, bridge: &mut BroadcastBridge<S>, value: f64) {
        bridge.set_velocity_y(value);
    }
}

/// One slot's touch scale, for press and release animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchScale(pub SlotId);

impl<S: LayerSurfaces> ScalarProperty<BroadcastBridge<S>> for TouchScale {
    fn get(&self, bridge: &BroadcastBridge<S>) -> f64 {
        bridge.compositor(self.0).touch_scale()
    }

    fn set(&self, bridge: &mut BroadcastBridge<S>, value: f64) {
        bridge.set_touch_scale(self.0, value);
    }
}
