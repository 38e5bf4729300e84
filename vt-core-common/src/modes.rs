// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terminal mode flags toggled by `CSI Ps h` / `CSI Ps l`, with and
//! without the `?` private marker.
//!
//! Each mode is a tiny, independently named type (mirroring the reference
//! crate's one-type-per-mode vocabulary) rather than a single opaque
//! bitset, so a caller can match on `Mode` without memorizing numeric
//! codes.

use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum SetMode {
    Set,
    Reset,
    Query,
}

/// `CSI ? 1 h/l` — arrow keys emit `ESC O` vs `ESC [` sequences.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum Decckm {
    #[default]
    Normal,
    Application,
}

/// `CSI ? 6 h/l` — cursor addressing relative to the scroll region.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum Decom {
    #[default]
    Absolute,
    Origin,
}

/// `CSI ? 7 h/l` — auto-wrap at the right margin.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Decawm {
    Disabled,
    Enabled,
}

impl Default for Decawm {
    fn default() -> Self {
        Self::Enabled
    }
}

/// `CSI ? 25 h/l` — cursor visibility.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Dectcem {
    Hidden,
    Visible,
}

impl Default for Dectcem {
    fn default() -> Self {
        Self::Visible
    }
}

/// `CSI ? 5 h/l` — reverse video (swap default fg/bg for the whole screen).
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum Decscnm {
    #[default]
    Normal,
    Reversed,
}

/// `CSI 2 0 h/l` — automatic CR on LF/VT/FF (line feed/new line mode).
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum Lnm {
    #[default]
    LineFeedOnly,
    AutoCarriageReturn,
}

/// Mouse reporting protocol, `CSI ? 1000/1002/1003 h/l` plus encoding
/// selector `CSI ? 1006 h/l`.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum MouseTrack {
    #[default]
    Off,
    Normal,
    ButtonEvent,
    AnyEvent,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum MouseEncoding {
    #[default]
    X10,
    Sgr,
}

/// `CSI ? 1004 h/l` — report focus in/out events.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum FocusReporting {
    #[default]
    Off,
    On,
}

/// `CSI ? 2004 h/l` — wrap pasted text in bracketed-paste markers.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum BracketedPaste {
    #[default]
    Off,
    On,
}

/// `CSI ? 2026 h/l` — synchronized-output coalescing hint for the renderer.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum SynchronizedUpdates {
    #[default]
    Off,
    On,
}

/// `CSI 4 h/l` (no private marker) — insert vs replace mode.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum InsertMode {
    #[default]
    Replace,
    Insert,
}

/// All mode flags the emulator tracks, grouped into one struct so the
/// parser's `h`/`l` dispatcher has a single mutation target.
#[derive(Debug, Clone, Default)]
pub struct TerminalModes {
    pub cursor_key: Decckm,
    pub origin: Decom,
    pub auto_wrap: Decawm,
    pub cursor_visible: Dectcem,
    pub reverse_video: Decscnm,
    pub line_feed_mode: Lnm,
    pub mouse_track: MouseTrack,
    pub mouse_encoding: MouseEncoding,
    pub focus_reporting: FocusReporting,
    pub bracketed_paste: BracketedPaste,
    pub synchronized_updates: SynchronizedUpdates,
    pub insert: InsertMode,
    pub application_keypad: bool,
    pub keyboard_locked: bool,
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Reset => write!(f, "reset"),
            Self::Query => write!(f, "query"),
        }
    }
}
