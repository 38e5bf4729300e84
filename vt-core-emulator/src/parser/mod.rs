// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The byte-driven escape-sequence state machine. Each incoming byte is
//! classified and dispatched per the ground/escape/CSI/string-sequence
//! states; a complete sequence yields zero or more [`Action`]s for the
//! emulator to apply to the grid and cursor.

pub mod csi;
pub mod osc;
pub mod strseq;

use crate::error::ParserFailures;
use csi::CsiAction;
use osc::OscAction;
use strseq::{StrBuffer, StrKind};
use vt_core_common::charset::CharsetSlot;
use vt_core_common::codec::{REPLACEMENT_CHARACTER, decode_utf8};
use vt_core_common::cursor::CursorVisualStyle;

const MAX_CSI_BUFFER: usize = 511;

/// A normalized effect produced by feeding bytes to the [`Parser`]. The
/// emulator interprets these against the grid, cursor, and modes; the
/// parser itself holds no terminal state beyond the sequence in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Print(char),
    CursorLeft,
    Tab,
    Newline { carriage_return: bool },
    CarriageReturn,
    ShiftOut,
    ShiftIn,
    Bell,
    Index,
    NextLine,
    SetTabStop,
    ReverseIndex,
    SingleShift(CharsetSlot),
    Csi(CsiAction),
    Osc(OscAction),
    DeviceControlString(Vec<u8>),
    ApplicationProgramCommand(Vec<u8>),
    PrivacyMessage(Vec<u8>),
    SaveCursor,
    RestoreCursor,
    ScreenAlignmentTest,
    DesignateCharset { slot: CharsetSlot, byte: u8 },
    PrimaryDeviceAttributes,
    NumericKeypad,
    ApplicationKeypad,
    FullReset,
    CursorVisualStyle(CursorVisualStyle),
    Invalid(ParserFailures),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    Ground,
    Escape,
    Csi { raw: Vec<u8> },
    CharsetDesignator { target: CharsetSlot },
    Utf8Designator,
    Test,
    Str(StrBuffer),
}

/// The escape-sequence state machine. Holds only in-flight sequence
/// bytes; all terminal state (grid, cursor, modes) lives in the
/// emulator that drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
    state: ParserState,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ParserState::Ground,
        }
    }

    /// Feed one UTF-8-decoded code point through the state machine,
    /// returning any actions it produced.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance_char(&mut self, c: char) -> Vec<Action> {
        let mut out = Vec::new();
        self.step(c, &mut out);
        out
    }

    /// Decode and advance a raw byte slice, recovering from invalid
    /// UTF-8 by emitting the replacement character and resuming at the
    /// next byte, per the core's error-handling contract.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn advance(&mut self, bytes: &[u8]) -> Vec<Action> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            match decode_utf8(&bytes[i..]) {
                Ok(decoded) => {
                    self.step(decoded.codepoint, &mut out);
                    i += decoded.consumed;
                }
                Err(_) => {
                    self.step(REPLACEMENT_CHARACTER, &mut out);
                    i += 1;
                }
            }
        }
        out
    }

    fn step(&mut self, c: char, out: &mut Vec<Action>) {
        if let ParserState::Str(_) = &self.state {
            self.step_str(c, out);
            return;
        }

        let v = c as u32;
        if v < 0x80 && vt_core_common::codec::is_c0(v) || (0x80..=0x9F).contains(&v) {
            #[allow(clippy::cast_possible_truncation)]
            self.step_control(v as u8, out);
            return;
        }

        match std::mem::replace(&mut self.state, ParserState::Ground) {
            ParserState::Csi { mut raw } => self.step_csi(c, &mut raw, out),
            ParserState::Escape => self.step_escape(c, out),
            ParserState::CharsetDesignator { target } => {
                #[allow(clippy::cast_possible_truncation)]
                let byte = if v < 0x100 { v as u8 } else { 0 };
                out.push(Action::DesignateCharset { slot: target, byte });
            }
            ParserState::Utf8Designator => {
                // '@'/'G' select legacy/UTF-8 GL mapping; not separately
                // modeled, just swallowed.
                self.state = ParserState::Ground;
            }
            ParserState::Test => {
                self.state = ParserState::Ground;
                if c == '8' {
                    out.push(Action::ScreenAlignmentTest);
                }
            }
            ParserState::Ground | ParserState::Str(_) => {
                out.push(Action::Print(c));
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn step_control(&mut self, b: u8, out: &mut Vec<Action>) {
        match b {
            0x08 => out.push(Action::CursorLeft),
            0x09 => out.push(Action::Tab),
            0x0A | 0x0B | 0x0C => out.push(Action::Newline {
                carriage_return: false,
            }),
            0x0D => out.push(Action::CarriageReturn),
            0x0E => out.push(Action::ShiftOut),
            0x0F => out.push(Action::ShiftIn),
            0x07 => out.push(Action::Bell),
            0x1B => {
                self.state = ParserState::Escape;
            }
            0x84 => out.push(Action::Index),
            0x85 => out.push(Action::NextLine),
            0x88 => out.push(Action::SetTabStop),
            0x8D => out.push(Action::ReverseIndex),
            0x8E => out.push(Action::SingleShift(CharsetSlot::G2)),
            0x8F => out.push(Action::SingleShift(CharsetSlot::G3)),
            0x90 => self.state = ParserState::Str(StrBuffer::new(StrKind::Dcs)),
            0x9D => self.state = ParserState::Str(StrBuffer::new(StrKind::Osc)),
            0x9E => self.state = ParserState::Str(StrBuffer::new(StrKind::Pm)),
            0x9F => self.state = ParserState::Str(StrBuffer::new(StrKind::Apc)),
            0x9B => self.state = ParserState::Csi { raw: Vec::new() },
            _ => {}
        }
    }

    fn step_escape(&mut self, c: char, out: &mut Vec<Action>) {
        match c {
            '[' => self.state = ParserState::Csi { raw: Vec::new() },
            ']' => self.state = ParserState::Str(StrBuffer::new(StrKind::Osc)),
            'P' => self.state = ParserState::Str(StrBuffer::new(StrKind::Dcs)),
            '_' => self.state = ParserState::Str(StrBuffer::new(StrKind::Apc)),
            '^' => self.state = ParserState::Str(StrBuffer::new(StrKind::Pm)),
            'k' => self.state = ParserState::Str(StrBuffer::new(StrKind::Pm)),
            '(' => self.state = ParserState::CharsetDesignator { target: CharsetSlot::G0 },
            ')' => self.state = ParserState::CharsetDesignator { target: CharsetSlot::G1 },
            '*' => self.state = ParserState::CharsetDesignator { target: CharsetSlot::G2 },
            '+' => self.state = ParserState::CharsetDesignator { target: CharsetSlot::G3 },
            '#' => self.state = ParserState::Test,
            '%' => self.state = ParserState::Utf8Designator,
            '7' => out.push(Action::SaveCursor),
            '8' => out.push(Action::RestoreCursor),
            'n' => out.push(Action::SingleShift(CharsetSlot::G2)),
            'o' => out.push(Action::SingleShift(CharsetSlot::G3)),
            'D' => out.push(Action::Index),
            'E' => out.push(Action::NextLine),
            'H' => out.push(Action::SetTabStop),
            'M' => out.push(Action::ReverseIndex),
            'Z' => out.push(Action::PrimaryDeviceAttributes),
            'c' => out.push(Action::FullReset),
            '>' => out.push(Action::NumericKeypad),
            '=' => out.push(Action::ApplicationKeypad),
            '\\' => {}
            _ => {}
        }
    }

    fn step_csi(&mut self, c: char, raw: &mut Vec<u8>, out: &mut Vec<Action>) {
        let v = c as u32;
        if (0x40..=0x7E).contains(&v) {
            #[allow(clippy::cast_possible_truncation)]
            let final_byte = v as u8;
            match csi::parse(raw, final_byte) {
                Ok(action) => out.push(Action::Csi(action)),
                Err(e) => out.push(Action::Invalid(e)),
            }
            return;
        }

        if raw.len() >= MAX_CSI_BUFFER {
            out.push(Action::Invalid(ParserFailures::CsiBufferOverflow));
            self.state = ParserState::Ground;
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        raw.push(v as u8);
        self.state = ParserState::Csi { raw: std::mem::take(raw) };
    }

    fn step_str(&mut self, c: char, out: &mut Vec<Action>) {
        let v = c as u32;
        let terminates = v == 0x07 || v == 0x9C || v == 0x1B || (0x80..=0x9F).contains(&v);

        if terminates {
            let ParserState::Str(buf) = std::mem::replace(&mut self.state, ParserState::Ground)
            else {
                return;
            };
            match buf.kind() {
                StrKind::Dcs => out.push(Action::DeviceControlString(buf.into_bytes())),
                StrKind::Apc => out.push(Action::ApplicationProgramCommand(buf.into_bytes())),
                StrKind::Pm => out.push(Action::PrivacyMessage(buf.into_bytes())),
                StrKind::Osc => match osc::parse(&buf.into_bytes()) {
                    Ok(action) => out.push(Action::Osc(action)),
                    Err(e) => out.push(Action::Invalid(e)),
                },
            }
            if v == 0x1B {
                self.state = ParserState::Escape;
            }
            return;
        }

        if let ParserState::Str(buf) = &mut self.state {
            if buf.push_char(c).is_err() {
                let kind = buf.kind();
                self.state = ParserState::Ground;
                out.push(Action::Invalid(ParserFailures::StrBufferOverflow(format!(
                    "{kind:?}"
                ))));
            }
        }
    }
}
