// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `Cell`: the (code point, attributes, colours) tuple a `Row` is built
//! from, plus the template a `Cursor` carries forward to newly written
//! cells.

use vt_core_common::colors::ColorKey;
use vt_core_common::sgr::{AttrFlags, UnderlineStyle};

/// The default, blank glyph: a space with no attributes and the default
/// fg/bg colour keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub codepoint: char,
    pub flags: AttrFlags,
    pub fg: ColorKey,
    pub bg: ColorKey,
    pub underline_style: UnderlineStyle,
    pub underline_color: ColorKey,
}

impl Cell {
    #[must_use]
    pub fn blank(template: &CellAttrs) -> Self {
        Self {
            codepoint: ' ',
            flags: AttrFlags::empty(),
            fg: template.fg,
            bg: template.bg,
            underline_style: UnderlineStyle::None,
            underline_color: ColorKey::default_fg(),
        }
    }

    /// A cell with `template`'s full attribute set and the given glyph.
    #[must_use]
    pub fn with_template(codepoint: char, template: &CellAttrs) -> Self {
        Self {
            codepoint,
            flags: template.flags,
            fg: template.fg,
            bg: template.bg,
            underline_style: template.underline_style,
            underline_color: template.underline_color,
        }
    }

    /// The trailing half of a double-width cell: holds no code point.
    #[must_use]
    pub fn wide_dummy(template: &CellAttrs) -> Self {
        let mut cell = Self::blank(template);
        cell.codepoint = '\0';
        cell.flags.insert(AttrFlags::WIDE_DUMMY);
        cell
    }

    #[must_use]
    pub const fn is_wide(&self) -> bool {
        self.flags.contains(AttrFlags::WIDE)
    }

    #[must_use]
    pub const fn is_wide_dummy(&self) -> bool {
        self.flags.contains(AttrFlags::WIDE_DUMMY)
    }

    /// A space with no rendition. `WRAP_MARKER` is metadata recording
    /// that auto-wrap vacated this cell, not a visible attribute, so it
    /// doesn't disqualify the cell from being blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.codepoint == ' ' && (self.flags - AttrFlags::WRAP_MARKER).is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(&CellAttrs::default())
    }
}

/// The cursor's current attribute template: what the next `writeChar`
/// stamps onto a newly written cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttrs {
    pub flags: AttrFlags,
    pub fg: ColorKey,
    pub bg: ColorKey,
    pub underline_style: UnderlineStyle,
    pub underline_color: ColorKey,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            flags: AttrFlags::empty(),
            fg: ColorKey::default_fg(),
            bg: ColorKey::default_bg(),
            underline_style: UnderlineStyle::None,
            underline_color: ColorKey::default_fg(),
        }
    }
}

impl CellAttrs {
    /// `CSI 0 m` — reset to the blank default template.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cell_is_a_space_with_no_flags() {
        let cell = Cell::default();
        assert_eq!(cell.codepoint, ' ');
        assert!(cell.flags.is_empty());
        assert!(cell.is_blank());
    }

    #[test]
    fn wide_dummy_holds_no_codepoint() {
        let cell = Cell::wide_dummy(&CellAttrs::default());
        assert_eq!(cell.codepoint, '\0');
        assert!(cell.is_wide_dummy());
        assert!(!cell.is_wide());
    }

    #[test]
    fn with_template_carries_attrs_onto_new_glyph() {
        let mut template = CellAttrs::default();
        template.flags.insert(AttrFlags::BOLD);
        let cell = Cell::with_template('A', &template);
        assert_eq!(cell.codepoint, 'A');
        assert!(cell.flags.contains(AttrFlags::BOLD));
    }
}
