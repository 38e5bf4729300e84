// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Select Graphic Rendition vocabulary: the attribute bitflags a cell
//! carries, and the `SgrAttribute` values a single SGR parameter maps to.

use crate::colors::ColorKey;
use bitflags::bitflags;

bitflags! {
    /// Boolean rendition flags carried by a cell, independent of colour.
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
    pub struct AttrFlags: u16 {
        const BOLD            = 1 << 0;
        const FAINT           = 1 << 1;
        const ITALIC          = 1 << 2;
        const UNDERLINE        = 1 << 3;
        const BLINK            = 1 << 4;
        const REVERSE          = 1 << 5;
        const HIDDEN           = 1 << 6;
        const STRUCK           = 1 << 7;
        const WRAP_MARKER      = 1 << 8;
        const WIDE             = 1 << 9;
        const WIDE_DUMMY       = 1 << 10;
        const BOX_DRAW         = 1 << 11;
        const URL_HINT         = 1 << 12;
        const DIRTY_UNDERLINE  = 1 << 13;
    }
}

/// Underline style, set by the colon sub-parameters of SGR 4.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

impl UnderlineStyle {
    #[must_use]
    pub const fn from_subparam(value: usize) -> Self {
        match value {
            1 => Self::Single,
            2 => Self::Double,
            3 => Self::Curly,
            4 => Self::Dotted,
            5 => Self::Dashed,
            _ => Self::None,
        }
    }
}

/// A single normalized effect of one SGR parameter (after extended-colour
/// sub-parameters have already been consumed by the caller).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SgrAttribute {
    Reset,
    Bold,
    Faint,
    Italic,
    Underline(UnderlineStyle),
    Blink,
    Reverse,
    Hidden,
    Struck,
    ClearBoldFaint,
    ClearItalic,
    ClearUnderline,
    ClearBlink,
    ClearReverse,
    ClearHidden,
    ClearStruck,
    Foreground(ColorKey),
    Background(ColorKey),
    UnderlineColor(ColorKey),
    DefaultUnderlineColor,
    Unknown(usize),
}

/// Map a bare numeric SGR parameter (0..=9, 2x..=4x, 9x, 10x) to its
/// `SgrAttribute`. Parameters 38/48/58 are handled by the caller because
/// they consume following parameters; they map to `Unknown` here.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn base_attribute_from_param(param: usize) -> SgrAttribute {
    use SgrAttribute::{
        Background, Bold, ClearBlink, ClearBoldFaint, ClearHidden, ClearItalic, ClearReverse,
        ClearStruck, ClearUnderline, DefaultUnderlineColor, Faint, Foreground, Hidden, Italic,
        Reset, Reverse, Struck, Underline, Unknown,
    };
    use crate::colors::{BASE_BRIGHT_FG_START, BASE_FG_START, bright_fg_index, fg_index};

    match param {
        0 => Reset,
        1 => Bold,
        2 => Faint,
        3 => Italic,
        4 => Underline(UnderlineStyle::Single),
        5 | 6 => SgrAttribute::Blink,
        7 => Reverse,
        8 => Hidden,
        9 => Struck,
        22 => ClearBoldFaint,
        23 => ClearItalic,
        24 => ClearUnderline,
        25 => ClearBlink,
        27 => ClearReverse,
        28 => ClearHidden,
        29 => ClearStruck,
        30..=37 => Foreground(ColorKey::index(fg_index(param - BASE_FG_START))),
        39 => Foreground(ColorKey::default_fg()),
        40..=47 => Background(ColorKey::index(fg_index(param - 40))),
        49 => Background(ColorKey::default_bg()),
        59 => DefaultUnderlineColor,
        90..=97 => Foreground(ColorKey::index(bright_fg_index(param - BASE_BRIGHT_FG_START))),
        100..=107 => Background(ColorKey::index(bright_fg_index(param - 100))),
        other => Unknown(other),
    }
}
