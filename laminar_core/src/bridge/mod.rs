// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out of shared motion parameters to a recycled pool of compositors.
//!
//! A [`BroadcastBridge`] owns one [`SharedMotionParameters`] and every
//! compositor currently on screen. Compositors live in slots addressed by
//! generational [`SlotId`] handles:
//!
//! - [`attach`](BroadcastBridge::attach) registers a compositor and brings it
//!   up to date with the shared parameters.
//! - [`bind`](BroadcastBridge::bind) is the recycle event: the slot shows a
//!   new list position, gets that position's icon, and has the whole
//!   parameter set replayed onto it. Binding is idempotent.
//! - [`detach`](BroadcastBridge::detach) unregisters a compositor and hands
//!   it back. Its handle becomes stale; using it panics with
//!   `"stale SlotId"`.
//!
//! Every broadcast setter stores the new value and immediately pushes it into
//! every live compositor, so a freshly rebound instance and one that has been
//! on screen all along end up in the same state.

mod catalog;
mod id;
mod params;
mod property;

use alloc::vec::Vec;

use crate::backend::{BindError, LayerSurfaces};
use crate::compositor::IconCompositor;
use crate::layer::Layer;
use crate::settle::VelocityTarget;

pub use catalog::{IconCatalog, MIN_ITEM_COUNT};
pub use id::SlotId;
pub use params::{
    BACKGROUND_SCALE_FACTOR, BACKGROUND_TRANSLATE_FACTOR, FOREGROUND_SCALE_FACTOR,
    FOREGROUND_TRANSLATE_FACTOR, SharedMotionParameters,
};
pub use property::{CornerRadius, TouchScale, VelocityX, VelocityY};

/// Shared parameters plus the pool of live compositors.
#[derive(Debug)]
pub struct BroadcastBridge<S> {
    params: SharedMotionParameters,

    // -- Slots --
    compositors: Vec<Option<IconCompositor<S>>>,
    position: Vec<Option<usize>>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
}

impl<S: LayerSurfaces> Default for BroadcastBridge<S> {
    fn default() -> Self {
        Self::new(SharedMotionParameters::default())
    }
}

impl<S: LayerSurfaces> BroadcastBridge<S> {
    /// Creates an empty pool with the given starting parameters.
    #[must_use]
    pub fn new(params: SharedMotionParameters) -> Self {
        Self {
            params,
            compositors: Vec::new(),
            position: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// The shared parameters as last written.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &SharedMotionParameters {
        &self.params
    }

    // -- Allocation API --

    /// Registers `compositor` and applies the shared parameters to it.
    ///
    /// The compositor shows nothing until its first [`bind`](Self::bind).
    pub fn attach(&mut self, mut compositor: IconCompositor<S>) -> SlotId {
        self.params.apply_to(&mut compositor);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on detach.
            self.compositors[idx as usize] = Some(compositor);
            self.position[idx as usize] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.compositors.push(Some(compositor));
            self.position.push(None);
            self.generation.push(0);
            idx
        };
        SlotId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Unregisters a compositor and returns it. The handle becomes stale.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn detach(&mut self, id: SlotId) -> IconCompositor<S> {
        self.validate(id);
        let idx = id.idx as usize;
        self.generation[idx] = self.generation[idx].wrapping_add(1);
        self.position[idx] = None;
        self.free_list.push(id.idx);
        match self.compositors[idx].take() {
            Some(compositor) => compositor,
            None => unreachable!("validated slot is occupied"),
        }
    }

    /// Returns whether the given handle refers to a live slot.
    #[must_use]
    pub fn is_alive(&self, id: SlotId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.compositors[id.idx as usize].is_some()
    }

    /// Number of live slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compositors.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no compositor is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles of all live slots, in slot order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// All live compositors with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &IconCompositor<S>)> + '_ {
        self.compositors
            .iter()
            .zip(&self.generation)
            .enumerate()
            .filter_map(|(idx, (c, &generation))| {
                c.as_ref().map(|c| (slot_id(idx, generation), c))
            })
    }

    /// All live compositors with their handles, mutably, in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut IconCompositor<S>)> + '_ {
        self.compositors
            .iter_mut()
            .zip(&self.generation)
            .enumerate()
            .filter_map(|(idx, (c, &generation))| {
                c.as_mut().map(|c| (slot_id(idx, generation), c))
            })
    }

    // -- Slot access --

    /// The compositor in a slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn compositor(&self, id: SlotId) -> &IconCompositor<S> {
        self.validate(id);
        match &self.compositors[id.idx as usize] {
            Some(c) => c,
            None => unreachable!("validated slot is occupied"),
        }
    }

    /// The compositor in a slot, mutably. Use this for per-instance input
    /// such as size and touch scale.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn compositor_mut(&mut self, id: SlotId) -> &mut IconCompositor<S> {
        self.validate(id);
        match &mut self.compositors[id.idx as usize] {
            Some(c) => c,
            None => unreachable!("validated slot is occupied"),
        }
    }

    /// The list position a slot was last successfully bound to.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.validate(id);
        self.position[id.idx as usize]
    }

    // -- Binding --

    /// Shows list position `position` in slot `id`: binds that position's
    /// icon and replays the shared parameters.
    ///
    /// A failure affects only this slot, which keeps its previous content
    /// and position.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn bind<I>(
        &mut self,
        id: SlotId,
        position: usize,
        catalog: &IconCatalog<I>,
    ) -> Result<(), BindError>
    where
        S: LayerSurfaces<Icon = I>,
    {
        self.validate(id);
        let icon = catalog
            .icon_at(position)
            .ok_or(BindError::NoIcon { position })?;
        self.bind_icon(id, icon)?;
        self.position[id.idx as usize] = Some(position);
        Ok(())
    }

    /// Binds an explicit icon to slot `id` and replays the shared parameters.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn bind_icon(&mut self, id: SlotId, icon: &S::Icon) -> Result<(), BindError> {
        let params = self.params;
        let compositor = self.compositor_mut(id);
        compositor.set_icon(icon)?;
        params.apply_to(compositor);
        Ok(())
    }

    /// Applies a touch scale to one slot.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_touch_scale(&mut self, id: SlotId, scale: f64) {
        self.compositor_mut(id).set_scale(scale);
    }

    // -- Broadcast setters --

    /// Sets the shared corner radius.
    pub fn set_corner_radius(&mut self, radius: f64) {
        let r = self.params.set_corner_radius(radius);
        self.for_each_live(|c| c.set_corner_radius(r));
    }

    /// Sets the shared horizontal velocity.
    pub fn set_velocity_x(&mut self, velocity: f64) {
        let v = self.params.set_velocity_x(velocity);
        self.for_each_live(|c| c.set_velocity_x(v));
    }

    /// Sets the shared vertical velocity.
    pub fn set_velocity_y(&mut self, velocity: f64) {
        let v = self.params.set_velocity_y(velocity);
        self.for_each_live(|c| c.set_velocity_y(v));
    }

    /// Sets a layer's translate factor everywhere.
    pub fn set_translate_factor(&mut self, layer: Layer, factor: f64) {
        let f = self.params.set_translate_factor(layer, factor);
        self.for_each_live(|c| c.set_translate_factor(layer, f));
    }

    /// Sets a layer's scale factor everywhere.
    pub fn set_scale_factor(&mut self, layer: Layer, factor: f64) {
        let f = self.params.set_scale_factor(layer, factor);
        self.for_each_live(|c| c.set_scale_factor(layer, f));
    }

    /// Sets the foreground translate factor everywhere.
    pub fn set_foreground_translate_factor(&mut self, factor: f64) {
        self.set_translate_factor(Layer::Foreground, factor);
    }

    /// Sets the background translate factor everywhere.
    pub fn set_background_translate_factor(&mut self, factor: f64) {
        self.set_translate_factor(Layer::Background, factor);
    }

    /// Sets the foreground scale factor everywhere.
    pub fn set_foreground_scale_factor(&mut self, factor: f64) {
        self.set_scale_factor(Layer::Foreground, factor);
    }

    /// Sets the background scale factor everywhere.
    pub fn set_background_scale_factor(&mut self, factor: f64) {
        self.set_scale_factor(Layer::Background, factor);
    }

    // -- Internal --

    fn for_each_live(&mut self, mut f: impl FnMut(&mut IconCompositor<S>)) {
        for c in self.compositors.iter_mut().flatten() {
            f(c);
        }
    }

    fn validate(&self, id: SlotId) {
        assert!(
            self.is_alive(id),
            "stale SlotId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

impl<S: LayerSurfaces> VelocityTarget for BroadcastBridge<S> {
    fn set_velocity_x(&mut self, velocity: f64) {
        Self::set_velocity_x(self, velocity);
    }

    fn set_velocity_y(&mut self, velocity: f64) {
        Self::set_velocity_y(self, velocity);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slot indices originate from a u32 counter"
)]
fn slot_id(idx: usize, generation: u32) -> SlotId {
    SlotId {
        idx: idx as u32,
        generation,
    }
}
