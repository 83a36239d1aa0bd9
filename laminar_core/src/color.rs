// Copyright 2026 the Laminar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-alpha RGBA color used by compositor configuration.

use core::fmt;

/// An 8-bit-per-channel, non-premultiplied RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; `0` is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 0xff);

    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba8(0xff, 0xff, 0xff, 0xff);

    /// Creates a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Returns whether this color contributes nothing when drawn.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color(#{:02x}{:02x}{:02x}{:02x})",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let c = Color::from_argb(0x4c00_0000);
        assert_eq!(c, Color::from_rgba8(0, 0, 0, 0x4c));
        let c = Color::from_argb(0xff12_3456);
        assert_eq!((c.r, c.g, c.b, c.a), (0x12, 0x34, 0x56, 0xff));
    }

    #[test]
    fn transparency() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(Color::from_rgba8(255, 255, 255, 0).is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
