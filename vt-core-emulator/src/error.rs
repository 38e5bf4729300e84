// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use vt_core_common::codec::DecodeError;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParserFailures {
    #[error("CSI buffer overflowed before a final byte was seen")]
    CsiBufferOverflow,
    #[error("string sequence buffer overflowed: {0}")]
    StrBufferOverflow(String),
    #[error("invalid CSI parameter: {0}")]
    InvalidCsiParam(String),
    #[error("unrecognized charset designator byte: {0:#04x}")]
    UnknownCharsetDesignator(u8),
    #[error("malformed OSC payload: {0}")]
    MalformedOsc(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EmulatorError {
    #[error("cannot resize below the minimum of 1x1 (requested {rows}x{cols})")]
    ResizeBelowMinimum { rows: usize, cols: usize },
}
