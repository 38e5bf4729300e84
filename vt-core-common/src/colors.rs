// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The 32-bit colour-key model and the 256-entry palette it indexes into.
//!
//! A `ColorKey` is either an index into `Palette` (base 16, extended cube,
//! or a special slot) or a direct RGB value with bit 28 set. Keeping this
//! as a plain `u32` rather than an enum matches the wire encoding SGR
//! extended-colour sequences already use and avoids an allocation or a
//! branch on the hot cell-write path.

use serde::{Deserialize, Serialize};

/// Bit 28 set marks a `ColorKey` as a direct RGB value (`0xFF_RR_GG_BB`).
const DIRECT_BIT: u32 = 1 << 28;

/// Special, non-palette colour slots, indices 256..259.
pub const SPECIAL_CURSOR: u32 = 256;
pub const SPECIAL_REVERSE_CURSOR: u32 = 257;
pub const SPECIAL_DEFAULT_FG: u32 = 258;
pub const SPECIAL_DEFAULT_BG: u32 = 259;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ColorKey(pub u32);

impl ColorKey {
    #[must_use]
    pub const fn index(idx: u32) -> Self {
        Self(idx)
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(DIRECT_BIT | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[must_use]
    pub const fn is_direct(self) -> bool {
        self.0 & DIRECT_BIT != 0
    }

    /// Decompose a direct-RGB key into its components; `None` for an
    /// indexed key.
    #[must_use]
    pub const fn as_rgb(self) -> Option<(u8, u8, u8)> {
        if !self.is_direct() {
            return None;
        }
        let r = ((self.0 >> 16) & 0xFF) as u8;
        let g = ((self.0 >> 8) & 0xFF) as u8;
        let b = (self.0 & 0xFF) as u8;
        Some((r, g, b))
    }

    #[must_use]
    pub const fn default_fg() -> Self {
        Self(SPECIAL_DEFAULT_FG)
    }

    #[must_use]
    pub const fn default_bg() -> Self {
        Self(SPECIAL_DEFAULT_BG)
    }

    #[must_use]
    pub const fn cursor() -> Self {
        Self(SPECIAL_CURSOR)
    }

    #[must_use]
    pub const fn reverse_cursor() -> Self {
        Self(SPECIAL_REVERSE_CURSOR)
    }

    /// Resolve this key to concrete RGB given a palette, falling back to
    /// the palette's configured default fg/bg for the special slots.
    #[must_use]
    pub fn resolve(self, palette: &Palette) -> (u8, u8, u8) {
        if let Some(rgb) = self.as_rgb() {
            return rgb;
        }

        match self.0 {
            SPECIAL_DEFAULT_FG => palette.default_fg,
            SPECIAL_DEFAULT_BG => palette.default_bg,
            SPECIAL_CURSOR => palette.cursor_color,
            SPECIAL_REVERSE_CURSOR => palette.default_bg,
            idx => palette.entries[(idx as usize).min(255)],
        }
    }
}

/// 256-entry RGB palette, plus the default fg/bg/cursor colours used by
/// the special `ColorKey` slots.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [(u8, u8, u8); 256],
    pub default_fg: (u8, u8, u8),
    pub default_bg: (u8, u8, u8),
    pub cursor_color: (u8, u8, u8),
}

impl Palette {
    /// Build a palette from 16 configured base colours, filling 16..231
    /// with the standard 6x6x6 colour cube and 232..255 with 24 greys.
    #[must_use]
    pub fn from_base16(base16: [(u8, u8, u8); 16], default_fg: (u8, u8, u8), default_bg: (u8, u8, u8), cursor_color: (u8, u8, u8)) -> Self {
        let mut entries = [(0u8, 0u8, 0u8); 256];
        entries[..16].copy_from_slice(&base16);

        for idx in 16..232u32 {
            entries[idx as usize] = cube_color(idx);
        }

        for idx in 232..256u32 {
            let level = (8 + 10 * (idx - 232)) as u8;
            entries[idx as usize] = (level, level, level);
        }

        Self {
            entries,
            default_fg,
            default_bg,
            cursor_color,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> (u8, u8, u8) {
        self.entries[index.min(255)]
    }

    /// OSC 4: override a single palette index.
    pub fn set(&mut self, index: usize, rgb: (u8, u8, u8)) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = rgb;
        }
    }

    /// OSC 104: reset `index` (or, if `None`, the whole table) to the
    /// standard derivation from the base 16.
    pub fn reset(&mut self, index: Option<usize>, base16: [(u8, u8, u8); 16]) {
        match index {
            Some(idx) if idx < 16 => self.entries[idx] = base16[idx],
            Some(idx) if idx < 232 => self.entries[idx] = cube_color(idx as u32),
            Some(idx) if idx < 256 => {
                let level = (8 + 10 * (idx as u32 - 232)) as u8;
                self.entries[idx] = (level, level, level);
            }
            Some(_) => {}
            None => *self = Self::from_base16(base16, self.default_fg, self.default_bg, self.cursor_color),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_base16(DEFAULT_BASE16, (229, 229, 229), (0, 0, 0), (229, 229, 229))
    }
}

#[must_use]
const fn cube_color(index: u32) -> (u8, u8, u8) {
    let i = index - 16;
    let r = i / 36;
    let g = (i / 6) % 6;
    let b = i % 6;
    (cube_step(r), cube_step(g), cube_step(b))
}

#[must_use]
const fn cube_step(level: u32) -> u8 {
    if level == 0 { 0 } else { (55 + level * 40) as u8 }
}

/// The classic xterm default 16-colour table, used unless a `Config`
/// supplies its own.
pub const DEFAULT_BASE16: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// SGR base foreground codes start at 30, background at 40.
pub const BASE_FG_START: usize = 30;
/// SGR bright foreground codes start at 90.
pub const BASE_BRIGHT_FG_START: usize = 90;

/// Map an SGR base colour offset (0..=7) to its palette index.
#[must_use]
pub const fn fg_index(offset: usize) -> u32 {
    offset as u32
}

/// Map an SGR bright colour offset (0..=7) to its palette index (8..=15).
#[must_use]
pub const fn bright_fg_index(offset: usize) -> u32 {
    offset as u32 + 8
}

/// Serializable RGB triple for `Config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.0, c.1, c.2)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(c: (u8, u8, u8)) -> Self {
        Self(c.0, c.1, c.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_rgb_round_trips() {
        let key = ColorKey::rgb(0xFF, 0x00, 0x80);
        assert!(key.is_direct());
        assert_eq!(key.as_rgb(), Some((0xFF, 0x00, 0x80)));
    }

    #[test]
    fn indexed_key_is_not_direct() {
        let key = ColorKey::index(3);
        assert!(!key.is_direct());
        assert_eq!(key.as_rgb(), None);
    }

    #[test]
    fn palette_builds_cube_and_greys() {
        let palette = Palette::default();
        assert_eq!(palette.get(0), DEFAULT_BASE16[0]);
        assert_eq!(palette.get(15), DEFAULT_BASE16[15]);
        assert_eq!(palette.get(16), (0, 0, 0));
        assert_eq!(palette.get(231), (255, 255, 255));
        let (r, g, b) = palette.get(232);
        assert_eq!((r, g, b), (8, 8, 8));
    }

    #[test]
    fn osc4_overrides_and_osc104_resets() {
        let mut palette = Palette::default();
        palette.set(1, (1, 2, 3));
        assert_eq!(palette.get(1), (1, 2, 3));
        palette.reset(Some(1), DEFAULT_BASE16);
        assert_eq!(palette.get(1), DEFAULT_BASE16[1]);
    }

    #[test]
    fn resolve_special_slots() {
        let palette = Palette::default();
        assert_eq!(ColorKey::default_fg().resolve(&palette), palette.default_fg);
        assert_eq!(ColorKey::default_bg().resolve(&palette), palette.default_bg);
        assert_eq!(ColorKey::rgb(1, 2, 3).resolve(&palette), (1, 2, 3));
    }
}
