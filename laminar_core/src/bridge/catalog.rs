// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position → icon mapping for a recycling list.

use alloc::vec::Vec;

/// The smallest item count a non-empty catalog reports.
///
/// Short icon lists are repeated so the collection always has enough items to
/// scroll through.
pub const MIN_ITEM_COUNT: usize = 40;

/// An immutable list of icons addressed by list position.
#[derive(Clone, Debug)]
pub struct IconCatalog<I> {
    icons: Vec<I>,
}

impl<I> IconCatalog<I> {
    /// Wraps a list of icons.
    #[must_use]
    pub fn new(icons: Vec<I>) -> Self {
        Self { icons }
    }

    /// Number of distinct icons.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the catalog has no icons.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Number of list positions: `max(len, MIN_ITEM_COUNT)`, or zero when
    /// empty.
    #[must_use]
    pub fn item_count(&self) -> usize {
        if self.icons.is_empty() {
            0
        } else {
            self.icons.len().max(MIN_ITEM_COUNT)
        }
    }

    /// The icon shown at `position`, wrapping around the list.
    #[must_use]
    pub fn icon_at(&self, position: usize) -> Option<&I> {
        if self.icons.is_empty() {
            return None;
        }
        self.icons.get(position % self.icons.len())
    }

    /// All distinct icons.
    #[inline]
    #[must_use]
    pub fn icons(&self) -> &[I] {
        &self.icons
    }
}

impl<I> FromIterator<I> for IconCatalog<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
