// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Keyboard and mouse input encoding: maps logical key/mouse events to
//! the byte sequences this core's DEC/xterm-compatible wire contract
//! expects, honoring cursor-key mode, application keypad mode, and the
//! negotiated mouse reporting protocol.

use vt_core_common::modes::{Decckm, MouseEncoding, MouseTrack, TerminalModes};

const fn ctrl_code(c: u8) -> u8 {
    c & 0b0001_1111
}

/// A set of held modifier keys, encoded per xterm's `1 + shift*1 + alt*2 +
/// ctrl*4` CSI parameter formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifier {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifier {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        alt: false,
        ctrl: false,
    };
    pub const ALT: Self = Self {
        shift: false,
        alt: true,
        ctrl: false,
    };
    pub const CTRL: Self = Self {
        shift: false,
        alt: false,
        ctrl: true,
    };

    const fn is_none(self) -> bool {
        !self.shift && !self.alt && !self.ctrl
    }

    /// The xterm CSI modifier parameter, or `None` when no modifier is held
    /// (in which case the unmodified form of the sequence applies).
    const fn param(self) -> Option<u8> {
        if self.is_none() {
            return None;
        }
        Some(1 + self.shift as u8 + 2 * self.alt as u8 + 4 * self.ctrl as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Asterisk,
    Plus,
    Comma,
    Minus,
    Period,
    Slash,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    BackTab,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowRight,
    ArrowLeft,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    Function(u8),
    Keypad(KeypadKey),
}

/// Encode a logical key event into the bytes to write to the host,
/// honoring `DECCKM` (cursor key mode), held modifiers, and application
/// keypad state.
#[must_use]
pub fn encode_key(key: Key, modifier: Modifier, modes: &TerminalModes) -> Vec<u8> {
    let application = matches!(modes.cursor_key, Decckm::Application);
    let csi_prefix: &[u8] = if application { b"\x1bO" } else { b"\x1b[" };

    match key {
        Key::Char(c) if modifier.ctrl && c.is_ascii() && (c.is_ascii_graphic() || c == ' ') => {
            vec![ctrl_code(c.to_ascii_uppercase() as u8)]
        }
        Key::Char(c) if modifier.alt => {
            let mut buf = vec![0x1b];
            let mut enc = [0u8; 4];
            buf.extend_from_slice(c.encode_utf8(&mut enc).as_bytes());
            buf
        }
        Key::Char(c) => {
            let mut enc = [0u8; 4];
            c.encode_utf8(&mut enc).as_bytes().to_vec()
        }
        Key::Enter if modifier.alt => b"\x1bO\r".to_vec(),
        Key::Enter => vec![b'\r'],
        Key::Backspace if modifier.ctrl => vec![0x08],
        Key::Backspace => vec![0x7F],
        Key::Tab => vec![b'\t'],
        Key::BackTab => b"\x1b[Z".to_vec(),
        Key::Escape => vec![0x1b],
        Key::ArrowUp => cursor_sequence(b'A', modifier, csi_prefix),
        Key::ArrowDown => cursor_sequence(b'B', modifier, csi_prefix),
        Key::ArrowRight => cursor_sequence(b'C', modifier, csi_prefix),
        Key::ArrowLeft => cursor_sequence(b'D', modifier, csi_prefix),
        Key::Home => cursor_sequence(b'H', modifier, csi_prefix),
        Key::End => cursor_sequence(b'F', modifier, csi_prefix),
        Key::PageUp => tilde_sequence(5, modifier),
        Key::PageDown => tilde_sequence(6, modifier),
        Key::Delete => tilde_sequence(3, modifier),
        Key::Insert => tilde_sequence(2, modifier),
        Key::Function(n) => encode_function_key(n, modifier),
        Key::Keypad(k) => encode_keypad(k, modes),
    }
}

/// Arrow keys and Home/End: unmodified they follow `DECCKM` (SS3 in
/// application mode, CSI otherwise); any modifier switches to the CSI
/// parameter form regardless of `DECCKM`.
fn cursor_sequence(letter: u8, modifier: Modifier, csi_prefix: &[u8]) -> Vec<u8> {
    match modifier.param() {
        None => [csi_prefix, &[letter]].concat(),
        Some(m) => format!("\x1b[1;{m}{}", letter as char).into_bytes(),
    }
}

/// PageUp/PageDown/Delete/Insert: `CSI n ~`, with a modifier parameter
/// inserted before the `~` when a modifier is held.
fn tilde_sequence(code: u8, modifier: Modifier) -> Vec<u8> {
    match modifier.param() {
        None => format!("\x1b[{code}~").into_bytes(),
        Some(m) => format!("\x1b[{code};{m}~").into_bytes(),
    }
}

fn encode_function_key(n: u8, modifier: Modifier) -> Vec<u8> {
    match n {
        1..=4 => {
            let letter = b"PQRS"[(n - 1) as usize] as char;
            match modifier.param() {
                None => format!("\x1bO{letter}").into_bytes(),
                Some(m) => format!("\x1b[1;{m}{letter}").into_bytes(),
            }
        }
        5..=12 => {
            let code: u8 = match n {
                5 => 15,
                6 => 17,
                7 => 18,
                8 => 19,
                9 => 20,
                10 => 21,
                11 => 23,
                12 => 24,
                _ => unreachable!(),
            };
            match modifier.param() {
                None => format!("\x1b[{code}~").into_bytes(),
                Some(m) => format!("\x1b[{code};{m}~").into_bytes(),
            }
        }
        other => {
            debug!("no encoding for function key F{other}");
            Vec::new()
        }
    }
}

/// Numeric keypad: application keypad mode routes digits and punctuation
/// through DEC's `SS3` encoding (`\x1bOp`..`\x1bOy` for 0-9, `\x1bOj`..`\x1bOo`
/// for `* + , - . /`, `\x1bOM` for Enter); numeric mode sends the literal
/// ASCII character instead.
fn encode_keypad(key: KeypadKey, modes: &TerminalModes) -> Vec<u8> {
    if modes.application_keypad {
        let letter = match key {
            KeypadKey::Digit(d) => (b'p' + d) as char,
            KeypadKey::Asterisk => 'j',
            KeypadKey::Plus => 'k',
            KeypadKey::Comma => 'l',
            KeypadKey::Minus => 'm',
            KeypadKey::Period => 'n',
            KeypadKey::Slash => 'o',
            KeypadKey::Enter => 'M',
        };
        format!("\x1bO{letter}").into_bytes()
    } else {
        match key {
            KeypadKey::Digit(d) => vec![b'0' + d],
            KeypadKey::Asterisk => vec![b'*'],
            KeypadKey::Plus => vec![b'+'],
            KeypadKey::Comma => vec![b','],
            KeypadKey::Minus => vec![b'-'],
            KeypadKey::Period => vec![b'.'],
            KeypadKey::Slash => vec![b'/'],
            KeypadKey::Enter => vec![b'\r'],
        }
    }
}

const BRACKETED_PASTE_START: &[u8] = b"\x1b[200~";
const BRACKETED_PASTE_END: &[u8] = b"\x1b[201~";

/// Wrap pasted `text` in bracketed-paste markers if the mode is enabled,
/// otherwise pass it through unchanged.
#[must_use]
pub fn encode_paste(text: &[u8], modes: &TerminalModes) -> Vec<u8> {
    if matches!(modes.bracketed_paste, vt_core_common::modes::BracketedPaste::On) {
        let mut out = Vec::with_capacity(text.len() + BRACKETED_PASTE_START.len() + BRACKETED_PASTE_END.len());
        out.extend_from_slice(BRACKETED_PASTE_START);
        out.extend_from_slice(text);
        out.extend_from_slice(BRACKETED_PASTE_END);
        out
    } else {
        text.to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Release,
    WheelUp,
    WheelDown,
}

/// Encode a mouse event per the negotiated tracking mode; `None` if
/// tracking is off, or if X10 encoding can't represent the coordinate
/// (1-based column/row past 222).
#[must_use]
pub fn encode_mouse(button: MouseButton, col: usize, row: usize, modifier: Modifier, modes: &TerminalModes) -> Option<Vec<u8>> {
    if matches!(modes.mouse_track, MouseTrack::Off) {
        return None;
    }

    let code = button_code(button) | modifier_bits(modifier);
    match modes.mouse_encoding {
        MouseEncoding::X10 => {
            let (x, y) = (col + 1, row + 1);
            if x > 222 || y > 222 {
                return None;
            }
            let cb = (code + 32) as u8;
            let cx = (x + 32) as u8;
            let cy = (y + 32) as u8;
            Some(vec![0x1b, b'[', b'M', cb, cx, cy])
        }
        MouseEncoding::Sgr => {
            let suffix = if matches!(button, MouseButton::Release) { 'm' } else { 'M' };
            Some(format!("\x1b[<{};{};{}{}", code, col + 1, row + 1, suffix).into_bytes())
        }
    }
}

const fn button_code(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Release => 3,
        MouseButton::WheelUp => 64,
        MouseButton::WheelDown => 65,
    }
}

fn modifier_bits(modifier: Modifier) -> u32 {
    let mut bits = 0;
    if modifier.shift {
        bits |= 4;
    }
    if modifier.alt {
        bits |= 8;
    }
    if modifier.ctrl {
        bits |= 16;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_switch_on_cursor_key_mode() {
        let mut modes = TerminalModes::default();
        assert_eq!(encode_key(Key::ArrowUp, Modifier::NONE, &modes), b"\x1b[A");
        modes.cursor_key = Decckm::Application;
        assert_eq!(encode_key(Key::ArrowUp, Modifier::NONE, &modes), b"\x1bOA");
    }

    #[test]
    fn modified_arrow_uses_csi_parameter_form_even_in_application_mode() {
        let mut modes = TerminalModes::default();
        modes.cursor_key = Decckm::Application;
        assert_eq!(encode_key(Key::ArrowUp, Modifier::SHIFT, &modes), b"\x1b[1;2A");
        assert_eq!(encode_key(Key::ArrowLeft, Modifier::CTRL, &modes), b"\x1b[1;5D");
    }

    #[test]
    fn modified_home_and_end_use_csi_parameter_form() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::Home, Modifier::SHIFT, &modes), b"\x1b[1;2H");
        assert_eq!(encode_key(Key::End, Modifier::ALT, &modes), b"\x1b[1;3F");
    }

    #[test]
    fn page_and_delete_keys_carry_a_modifier_parameter() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::PageUp, Modifier::NONE, &modes), b"\x1b[5~");
        assert_eq!(encode_key(Key::PageUp, Modifier::CTRL, &modes), b"\x1b[5;5~");
        assert_eq!(encode_key(Key::Delete, Modifier::SHIFT, &modes), b"\x1b[3;2~");
    }

    #[test]
    fn ctrl_letter_maps_to_control_code() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::Char('c'), Modifier::CTRL, &modes), vec![0x03]);
    }

    #[test]
    fn ctrl_non_alphabetic_printable_also_maps_to_control_code() {
        let modes = TerminalModes::default();
        // Ctrl+[ is ESC (0x1B), a common alternate escape binding.
        assert_eq!(encode_key(Key::Char('['), Modifier::CTRL, &modes), vec![0x1b]);
    }

    #[test]
    fn alt_letter_prefixes_escape() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::Char('x'), Modifier::ALT, &modes), vec![0x1b, b'x']);
    }

    #[test]
    fn alt_enter_and_ctrl_backspace_have_distinct_encodings() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::Enter, Modifier::NONE, &modes), vec![b'\r']);
        assert_eq!(encode_key(Key::Enter, Modifier::ALT, &modes), b"\x1bO\r".to_vec());
        assert_eq!(encode_key(Key::Backspace, Modifier::NONE, &modes), vec![0x7F]);
        assert_eq!(encode_key(Key::Backspace, Modifier::CTRL, &modes), vec![0x08]);
    }

    #[test]
    fn function_keys_match_the_wire_table() {
        assert_eq!(encode_function_key(1, Modifier::NONE), b"\x1bOP");
        assert_eq!(encode_function_key(5, Modifier::NONE), b"\x1b[15~");
        assert_eq!(encode_function_key(12, Modifier::NONE), b"\x1b[24~");
    }

    #[test]
    fn modified_function_keys_carry_a_modifier_parameter() {
        assert_eq!(encode_function_key(1, Modifier::SHIFT), b"\x1b[1;2P");
        assert_eq!(encode_function_key(5, Modifier::CTRL), b"\x1b[15;5~");
        assert_eq!(encode_function_key(12, Modifier::ALT), b"\x1b[24;3~");
    }

    #[test]
    fn numeric_keypad_sends_literal_ascii_outside_application_mode() {
        let modes = TerminalModes::default();
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Digit(7)), Modifier::NONE, &modes), vec![b'7']);
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Plus), Modifier::NONE, &modes), vec![b'+']);
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Enter), Modifier::NONE, &modes), vec![b'\r']);
    }

    #[test]
    fn application_keypad_routes_digits_and_punctuation_through_ss3() {
        let mut modes = TerminalModes::default();
        modes.application_keypad = true;
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Digit(0)), Modifier::NONE, &modes), b"\x1bOp");
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Digit(9)), Modifier::NONE, &modes), b"\x1bOy");
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Asterisk), Modifier::NONE, &modes), b"\x1bOj");
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Slash), Modifier::NONE, &modes), b"\x1bOo");
        assert_eq!(encode_key(Key::Keypad(KeypadKey::Enter), Modifier::NONE, &modes), b"\x1bOM");
    }

    #[test]
    fn bracketed_paste_wraps_only_when_enabled() {
        let mut modes = TerminalModes::default();
        assert_eq!(encode_paste(b"hi", &modes), b"hi");
        modes.bracketed_paste = vt_core_common::modes::BracketedPaste::On;
        assert_eq!(encode_paste(b"hi", &modes), b"\x1b[200~hi\x1b[201~");
    }

    #[test]
    fn sgr_mouse_encoding_includes_modifiers_and_one_based_coords() {
        let mut modes = TerminalModes::default();
        modes.mouse_track = MouseTrack::Normal;
        modes.mouse_encoding = MouseEncoding::Sgr;
        let bytes = encode_mouse(MouseButton::Left, 4, 9, Modifier::SHIFT, &modes).unwrap();
        assert_eq!(bytes, b"\x1b[<4;5;10M".to_vec());
    }

    #[test]
    fn mouse_reporting_off_yields_none() {
        let modes = TerminalModes::default();
        assert_eq!(encode_mouse(MouseButton::Left, 0, 0, Modifier::NONE, &modes), None);
    }

    #[test]
    fn x10_mouse_encoding_suppresses_coordinates_past_222() {
        let mut modes = TerminalModes::default();
        modes.mouse_track = MouseTrack::Normal;
        modes.mouse_encoding = MouseEncoding::X10;
        assert!(encode_mouse(MouseButton::Left, 221, 0, Modifier::NONE, &modes).is_some());
        assert_eq!(encode_mouse(MouseButton::Left, 222, 0, Modifier::NONE, &modes), None);
        assert_eq!(encode_mouse(MouseButton::Left, 0, 222, Modifier::NONE, &modes), None);
    }
}
