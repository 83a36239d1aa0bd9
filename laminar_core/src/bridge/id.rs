// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot identity.

use core::fmt;

/// A handle to a compositor slot in a [`BroadcastBridge`](super::BroadcastBridge).
///
/// Contains both a slot index and a generation counter so that a handle kept
/// past [`detach`](super::BroadcastBridge::detach) is detected even after the
/// slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    /// Slot index into the bridge's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the bridge's generation for this slot.
    pub(crate) generation: u32,
}

impl SlotId {
    /// Reassembles a handle from its parts, as when decoding a recording.
    ///
    /// The result is only meaningful to the bridge that issued the original.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({}@gen{})", self.idx, self.generation)
    }
}
