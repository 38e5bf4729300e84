// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cursor visual style, shared between `DECSCUSR` parsing and `Config`.

use serde::{Deserialize, Serialize};

/// Cursor shape/blink selected by `CSI Ps SP q` (DECSCUSR), values 0..=8.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorVisualStyle {
    #[default]
    BlinkingBlockDefault,
    BlinkingBlock,
    SteadyBlock,
    BlinkingUnderline,
    SteadyUnderline,
    BlinkingBar,
    SteadyBar,
}

impl CursorVisualStyle {
    #[must_use]
    pub const fn from_param(value: usize) -> Self {
        match value {
            1 => Self::BlinkingBlock,
            2 => Self::SteadyBlock,
            3 => Self::BlinkingUnderline,
            4 => Self::SteadyUnderline,
            5 => Self::BlinkingBar,
            6 => Self::SteadyBar,
            _ => Self::BlinkingBlockDefault,
        }
    }

    #[must_use]
    pub const fn is_blinking(self) -> bool {
        matches!(
            self,
            Self::BlinkingBlockDefault | Self::BlinkingBlock | Self::BlinkingUnderline | Self::BlinkingBar
        )
    }
}
