// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `Emulator`: drives the [`crate::parser::Parser`] against a
//! [`vt_core_buffer::grid::Grid`] and cursor/mode/charset state,
//! producing host-bound response bytes through a caller-supplied sink.

use crate::error::EmulatorError;
use crate::parser::csi::{CsiAction, EraseMode};
use crate::parser::osc::{OscAction, OscTarget};
use crate::parser::{Action, Parser};
use crate::response;
use vt_core_buffer::cell::CellAttrs;
use vt_core_buffer::grid::Grid;
use vt_core_common::charset::{Charset, CharsetSlot, CharsetState, translate_graphic0};
use vt_core_common::codec::width;
use vt_core_common::colors::{ColorKey, Palette};
use vt_core_common::config::Config;
use vt_core_common::cursor::CursorVisualStyle;
use vt_core_common::modes::{
    BracketedPaste, Decawm, Decckm, Decom, Decscnm, Dectcem, FocusReporting, InsertMode, Lnm,
    MouseEncoding, MouseTrack, SetMode, SynchronizedUpdates, TerminalModes,
};
use vt_core_common::sgr::{AttrFlags, SgrAttribute, UnderlineStyle};

/// Cursor position plus the rendition template stamped onto new cells.
#[derive(Debug, Clone)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub attrs: CellAttrs,
    pub visible: bool,
    pub style: CursorVisualStyle,
    /// DEC "pending wrap" flag: set when a printable char lands exactly
    /// on the right margin with auto-wrap on; the wrap itself is
    /// deferred until the *next* printable char arrives.
    pub pending_wrap: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            attrs: CellAttrs::default(),
            visible: true,
            style: CursorVisualStyle::default(),
            pending_wrap: false,
        }
    }
}

#[derive(Debug, Clone)]
struct SavedCursor {
    x: usize,
    y: usize,
    attrs: CellAttrs,
    charset: CharsetState,
}

/// A complete VT100/VT220-compatible emulator core: byte-driven state
/// machine, screen model, and response encoding. Holds no I/O handle;
/// `feed` returns whatever bytes should be written back to the host.
pub struct Emulator {
    grid: Grid,
    parser: Parser,
    cursor: Cursor,
    saved: [Option<SavedCursor>; 2],
    modes: TerminalModes,
    charset: CharsetState,
    palette: Palette,
    base_palette: [(u8, u8, u8); 16],
    title: String,
    bell_pending: bool,
    config: Config,
}

impl Emulator {
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(rows = config.rows, cols = config.cols))]
    pub fn new(config: Config) -> Self {
        let base_palette: [(u8, u8, u8); 16] = config.base_palette.map(Into::into);
        let palette = Palette::from_base16(
            base_palette,
            config.default_fg.into(),
            config.default_bg.into(),
            config.default_cursor_color.into(),
        );
        let mut cursor = Cursor::default();
        cursor.style = config.default_cursor_style;

        Self {
            grid: Grid::new(config.rows, config.cols, config.scrollback_depth),
            parser: Parser::new(),
            cursor,
            saved: [None, None],
            modes: TerminalModes::default(),
            charset: CharsetState::default(),
            palette,
            base_palette,
            title: String::new(),
            bell_pending: false,
            config,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn modes(&self) -> &TerminalModes {
        &self.modes
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Take and clear the pending-bell flag raised by `BEL` since the
    /// last call.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Feed raw bytes through the parser and apply every resulting
    /// action, returning any host-bound response bytes in order.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<u8> {
        let actions = self.parser.advance(bytes);
        let mut responses = Vec::new();
        for action in actions {
            self.apply(action, &mut responses);
        }
        responses
    }

    /// `resize(R', C')`. Errs if either dimension would be driven to
    /// zero; otherwise shifts the cursor per `Grid::resize`'s contract.
    ///
    /// # Errors
    /// Returns `EmulatorError::ResizeBelowMinimum` if `rows` or `cols`
    /// is zero.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), EmulatorError> {
        if rows == 0 || cols == 0 {
            return Err(EmulatorError::ResizeBelowMinimum { rows, cols });
        }
        let shift = self.grid.resize(rows, cols, self.cursor.y, &self.cursor.attrs);
        self.cursor.y = self.cursor.y.saturating_sub(shift.max(0) as usize);
        self.cursor.x = self.cursor.x.min(cols.saturating_sub(1));
        self.cursor.pending_wrap = false;
        Ok(())
    }

    /// `kscrollUp(n)`: scroll the viewport `n` rows back into
    /// scrollback history, clamped to the available depth.
    pub fn scroll_history_up(&mut self, n: usize) {
        self.grid.kscroll_up(n);
    }

    /// `kscrollDown(n)`: scroll the viewport back toward the live
    /// screen, clamped at the live screen.
    pub fn scroll_history_down(&mut self, n: usize) {
        self.grid.kscroll_down(n);
    }

    /// How many rows the viewport is currently scrolled back into
    /// history (`0` when showing the live screen).
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.grid.scroll_offset()
    }

    /// `getVisibleLine(term, y)`: the row actually displayed at viewport
    /// row `y` under the current history scroll offset.
    #[must_use]
    pub fn visible_row(&self, y: usize) -> Option<&vt_core_buffer::row::Row> {
        self.grid.visible_row(y)
    }

    fn apply(&mut self, action: Action, responses: &mut Vec<u8>) {
        match action {
            Action::Print(c) => self.write_char(c),
            Action::CursorLeft => self.cursor_back(1),
            Action::Tab => self.move_to_column(self.grid.next_tab_stop(self.cursor.x)),
            Action::Newline { carriage_return } => self.newline(carriage_return),
            Action::CarriageReturn => self.carriage_return(),
            Action::ShiftOut => self.charset.select(CharsetSlot::G1),
            Action::ShiftIn => self.charset.select(CharsetSlot::G0),
            Action::Bell => self.bell_pending = true,
            Action::Index => self.index(),
            Action::NextLine => self.newline(true),
            Action::SetTabStop => self.grid.set_tab_stop(self.cursor.x),
            Action::ReverseIndex => self.reverse_index(),
            Action::SingleShift(_slot) => {}
            Action::Csi(csi) => self.apply_csi(csi, responses),
            Action::Osc(osc) => self.apply_osc(osc),
            Action::DeviceControlString(_) | Action::ApplicationProgramCommand(_) | Action::PrivacyMessage(_) => {}
            Action::SaveCursor => self.save_cursor(),
            Action::RestoreCursor => self.restore_cursor(),
            Action::ScreenAlignmentTest => self.screen_alignment_test(),
            Action::DesignateCharset { slot, byte } => {
                self.charset.designate(slot, Charset::from_designator_byte(byte));
            }
            Action::PrimaryDeviceAttributes => responses.extend_from_slice(response::PRIMARY_DEVICE_ATTRIBUTES),
            Action::NumericKeypad => self.modes.application_keypad = false,
            Action::ApplicationKeypad => self.modes.application_keypad = true,
            Action::FullReset => self.full_reset(),
            Action::CursorVisualStyle(style) => self.cursor.style = style,
            Action::Invalid(_err) => {
                debug!("discarding invalid escape sequence: {_err}");
            }
        }
    }

    /// `writeChar`: translate, measure, wrap, clear any conflicting wide
    /// pair, stamp the cell(s), and advance the cursor.
    #[tracing::instrument(level = "trace", skip(self))]
    fn write_char(&mut self, c: char) {
        let c = if self.charset.active_charset() == Charset::Graphic0 {
            translate_graphic0(c)
        } else {
            c
        };

        let w = width(c);
        if w == 0 {
            return;
        }

        if self.cursor.pending_wrap {
            self.wrap_to_next_line();
        }

        let cols = self.grid.cols();
        if self.cursor.x + w > cols {
            if matches!(self.modes.auto_wrap, Decawm::Enabled) {
                self.wrap_to_next_line();
            } else {
                self.cursor.x = cols.saturating_sub(w);
            }
        }

        let (x, y) = (self.cursor.x, self.cursor.y);
        self.grid.clear_wide(x, y, &self.cursor.attrs);
        if let Some(row) = self.grid.row_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                *cell = vt_core_buffer::cell::Cell::with_template(c, &self.cursor.attrs);
                if w == 2 {
                    cell.flags.insert(AttrFlags::WIDE);
                }
            }
            if w == 2 {
                self.grid.clear_wide(x + 1, y, &self.cursor.attrs);
                if let Some(dummy) = self.grid.row_mut(y).and_then(|r| r.get_mut(x + 1)) {
                    *dummy = vt_core_buffer::cell::Cell::wide_dummy(&self.cursor.attrs);
                }
            }
        }
        self.grid.set_dirty(y, y);

        if x + w >= cols {
            self.cursor.x = cols.saturating_sub(1);
            self.cursor.pending_wrap = matches!(self.modes.auto_wrap, Decawm::Enabled);
        } else {
            self.cursor.x = x + w;
        }
    }

    fn wrap_to_next_line(&mut self) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        if let Some(row) = self.grid.row_mut(y) {
            if let Some(cell) = row.get_mut(x.min(row.width().saturating_sub(1))) {
                cell.flags.insert(AttrFlags::WRAP_MARKER);
            }
        }
        self.cursor.x = 0;
        self.cursor.pending_wrap = false;
        self.index();
    }

    fn carriage_return(&mut self) {
        self.cursor.x = 0;
        self.cursor.pending_wrap = false;
    }

    /// `newline`: `LF`/`VT`/`FF` semantics, carriage-returning first when
    /// either the caller demands it (`NEL`) or LNM is set.
    fn newline(&mut self, carriage_return: bool) {
        if carriage_return || matches!(self.modes.line_feed_mode, Lnm::AutoCarriageReturn) {
            self.carriage_return();
        }
        self.index();
    }

    /// `IND`: move down one row, scrolling the region when already at
    /// its bottom edge.
    fn index(&mut self) {
        let (_, bottom) = self.grid.scroll_region();
        if self.cursor.y == bottom {
            let (top, _) = self.grid.scroll_region();
            self.grid.scroll_up(top, 1, &self.cursor.attrs);
        } else if self.cursor.y + 1 < self.grid.rows() {
            self.cursor.y += 1;
        }
        self.cursor.pending_wrap = false;
    }

    /// `RI`: move up one row, scrolling the region when already at its
    /// top edge.
    fn reverse_index(&mut self) {
        let (top, _) = self.grid.scroll_region();
        if self.cursor.y == top {
            self.grid.scroll_down(top, 1);
        } else if self.cursor.y > 0 {
            self.cursor.y -= 1;
        }
        self.cursor.pending_wrap = false;
    }

    fn move_to_column(&mut self, x: usize) {
        self.cursor.x = x.min(self.grid.cols().saturating_sub(1));
        self.cursor.pending_wrap = false;
    }

    fn cursor_back(&mut self, n: usize) {
        self.cursor.x = self.cursor.x.saturating_sub(n);
        self.cursor.pending_wrap = false;
    }

    /// Lower/upper bound of cursor row movement; `DECOM` restricts it to
    /// the active scroll region.
    fn cursor_row_bounds(&self) -> (usize, usize) {
        if matches!(self.modes.origin, Decom::Origin) {
            self.grid.scroll_region()
        } else {
            (0, self.grid.rows().saturating_sub(1))
        }
    }

    fn move_cursor_to(&mut self, row: usize, col: usize) {
        let (top, bottom) = self.cursor_row_bounds();
        let base = if matches!(self.modes.origin, Decom::Origin) { top } else { 0 };
        self.cursor.y = (base + row).clamp(top, bottom);
        self.cursor.x = col.min(self.grid.cols().saturating_sub(1));
        self.cursor.pending_wrap = false;
    }

    fn save_cursor(&mut self) {
        let slot = usize::from(self.grid.is_alt_screen());
        self.saved[slot] = Some(SavedCursor {
            x: self.cursor.x,
            y: self.cursor.y,
            attrs: self.cursor.attrs,
            charset: self.charset,
        });
    }

    fn restore_cursor(&mut self) {
        let slot = usize::from(self.grid.is_alt_screen());
        if let Some(saved) = self.saved[slot].clone() {
            self.cursor.x = saved.x;
            self.cursor.y = saved.y;
            self.cursor.attrs = saved.attrs;
            self.charset = saved.charset;
            self.cursor.pending_wrap = false;
        }
    }

    fn screen_alignment_test(&mut self) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let fill = CellAttrs::default();
        for y in 0..rows {
            if let Some(row) = self.grid.row_mut(y) {
                row.clear(&fill);
                for x in 0..cols {
                    if let Some(cell) = row.get_mut(x) {
                        cell.codepoint = 'E';
                    }
                }
            }
        }
        self.grid.set_full_dirty();
        self.cursor.x = 0;
        self.cursor.y = 0;
        self.grid.reset_scroll_region();
    }

    /// `ESC c` (`RIS`): full terminal reset, homing the cursor and
    /// clearing every piece of state this emulator tracks.
    fn full_reset(&mut self) {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        self.grid = Grid::new(rows, cols, self.config.scrollback_depth);
        self.cursor = Cursor::default();
        self.cursor.style = self.config.default_cursor_style;
        self.saved = [None, None];
        self.modes = TerminalModes::default();
        self.charset = CharsetState::default();
        self.title.clear();
    }

    fn apply_csi(&mut self, action: CsiAction, responses: &mut Vec<u8>) {
        let attrs = self.cursor.attrs;
        match action {
            CsiAction::InsertBlanks(n) => {
                let (x, y) = (self.cursor.x, self.cursor.y);
                if let Some(row) = self.grid.row_mut(y) {
                    row.insert_blanks(x, n, &attrs);
                }
                self.grid.set_dirty(y, y);
            }
            CsiAction::CursorUp(n) => {
                let (top, _) = self.cursor_row_bounds();
                self.cursor.y = self.cursor.y.saturating_sub(n).max(top);
                self.cursor.pending_wrap = false;
            }
            CsiAction::CursorDown(n) => {
                let (_, bottom) = self.cursor_row_bounds();
                self.cursor.y = (self.cursor.y + n).min(bottom);
                self.cursor.pending_wrap = false;
            }
            CsiAction::CursorForward(n) => {
                self.cursor.x = (self.cursor.x + n).min(self.grid.cols().saturating_sub(1));
                self.cursor.pending_wrap = false;
            }
            CsiAction::CursorBack(n) => self.cursor_back(n),
            CsiAction::CursorNextLine(n) => {
                let (_, bottom) = self.cursor_row_bounds();
                self.cursor.y = (self.cursor.y + n).min(bottom);
                self.carriage_return();
            }
            CsiAction::CursorPrevLine(n) => {
                let (top, _) = self.cursor_row_bounds();
                self.cursor.y = self.cursor.y.saturating_sub(n).max(top);
                self.carriage_return();
            }
            CsiAction::CursorToColumn(x) => self.move_to_column(x),
            CsiAction::CursorPosition { row, col } => self.move_cursor_to(row, col),
            CsiAction::TabForward(n) => {
                for _ in 0..n {
                    self.cursor.x = self.grid.next_tab_stop(self.cursor.x);
                }
            }
            CsiAction::TabBack(n) => {
                for _ in 0..n {
                    self.cursor.x = self.grid.prev_tab_stop(self.cursor.x);
                }
            }
            CsiAction::EraseDisplay(mode) => self.erase_display(mode),
            CsiAction::EraseLine(mode) => self.erase_line(mode),
            CsiAction::InsertLines(n) => {
                let (top, bottom) = self.grid.scroll_region();
                if self.cursor.y >= top && self.cursor.y <= bottom {
                    self.grid.scroll_down(self.cursor.y, n);
                }
            }
            CsiAction::DeleteLines(n) => {
                let (top, bottom) = self.grid.scroll_region();
                if self.cursor.y >= top && self.cursor.y <= bottom {
                    self.grid.set_scroll_region(self.cursor.y, bottom);
                    self.grid.scroll_up(self.cursor.y, n, &attrs);
                    self.grid.set_scroll_region(top, bottom);
                }
            }
            CsiAction::DeleteChars(n) => {
                let (x, y) = (self.cursor.x, self.cursor.y);
                if let Some(row) = self.grid.row_mut(y) {
                    row.delete_cells(x, n, &attrs);
                }
                self.grid.set_dirty(y, y);
            }
            CsiAction::ScrollUp(n) => {
                let (top, _) = self.grid.scroll_region();
                self.grid.scroll_up(top, n, &attrs);
            }
            CsiAction::ScrollDown(n) => {
                let (top, _) = self.grid.scroll_region();
                self.grid.scroll_down(top, n);
            }
            CsiAction::EraseChars(n) => {
                let (x, y) = (self.cursor.x, self.cursor.y);
                let to = (x + n.max(1)).saturating_sub(1);
                self.grid.clear_region(x, y, to, y, &attrs);
            }
            CsiAction::RepeatLastPrintable(n) => {
                if let Some(c) = self.grid.row(self.cursor.y).and_then(|r| r.get(self.cursor.x.saturating_sub(1))).map(|c| c.codepoint) {
                    for _ in 0..n {
                        self.write_char(c);
                    }
                }
            }
            CsiAction::PrimaryDeviceAttributes => responses.extend_from_slice(response::PRIMARY_DEVICE_ATTRIBUTES),
            CsiAction::SecondaryDeviceAttributes => responses.extend_from_slice(response::SECONDARY_DEVICE_ATTRIBUTES),
            CsiAction::VerticalPositionAbsolute(row) => {
                let (top, bottom) = self.cursor_row_bounds();
                self.cursor.y = row.clamp(top, bottom);
            }
            CsiAction::SetMode { private, mode, action } => self.set_mode(private, mode, action),
            CsiAction::MediaCopy(_) => {}
            CsiAction::Sgr(attrs) => self.apply_sgr(&attrs),
            CsiAction::DeviceStatusReport(n) => self.device_status_report(n, responses),
            CsiAction::CursorVisualStyle(n) => self.cursor.style = CursorVisualStyle::from_param(n),
            CsiAction::ScrollRegion { top, bottom } => {
                let bottom = if bottom == 0 { self.grid.rows() } else { bottom };
                self.grid.set_scroll_region(top.saturating_sub(1), bottom.saturating_sub(1));
                self.cursor.x = 0;
                self.cursor.y = if matches!(self.modes.origin, Decom::Origin) {
                    self.grid.scroll_region().0
                } else {
                    0
                };
            }
            CsiAction::SaveCursor => self.save_cursor(),
            CsiAction::RestoreCursor => self.restore_cursor(),
        }
    }

    fn erase_display(&mut self, mode: EraseMode) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let attrs = self.cursor.attrs;
        let (x, y) = (self.cursor.x, self.cursor.y);
        match mode {
            EraseMode::ToEnd => {
                self.grid.clear_region(x, y, cols.saturating_sub(1), y, &attrs);
                if y + 1 < rows {
                    self.grid.clear_region(0, y + 1, cols.saturating_sub(1), rows.saturating_sub(1), &attrs);
                }
            }
            EraseMode::ToStart => {
                if y > 0 {
                    self.grid.clear_region(0, 0, cols.saturating_sub(1), y - 1, &attrs);
                }
                self.grid.clear_region(0, y, x, y, &attrs);
            }
            EraseMode::All => {
                self.grid.clear_region(0, 0, cols.saturating_sub(1), rows.saturating_sub(1), &attrs);
            }
            EraseMode::AllAndScrollback => {
                self.grid.clear_region(0, 0, cols.saturating_sub(1), rows.saturating_sub(1), &attrs);
                self.grid.clear_scrollback();
            }
        }
    }

    fn erase_line(&mut self, mode: EraseMode) {
        let cols = self.grid.cols();
        let attrs = self.cursor.attrs;
        let (x, y) = (self.cursor.x, self.cursor.y);
        match mode {
            EraseMode::ToEnd => self.grid.clear_region(x, y, cols.saturating_sub(1), y, &attrs),
            EraseMode::ToStart => self.grid.clear_region(0, y, x, y, &attrs),
            EraseMode::All | EraseMode::AllAndScrollback => {
                self.grid.clear_region(0, y, cols.saturating_sub(1), y, &attrs);
            }
        }
    }

    fn device_status_report(&self, n: usize, responses: &mut Vec<u8>) {
        match n {
            5 => responses.extend_from_slice(response::DEVICE_STATUS_OK),
            6 => responses.extend_from_slice(&response::cursor_position_report(self.cursor.y, self.cursor.x)),
            _ => {}
        }
    }

    #[allow(clippy::too_many_lines)]
    fn set_mode(&mut self, private: bool, mode: usize, action: SetMode) {
        let on = matches!(action, SetMode::Set);
        if private {
            match mode {
                1 => self.modes.cursor_key = if on { Decckm::Application } else { Decckm::Normal },
                5 => self.modes.reverse_video = if on { Decscnm::Reversed } else { Decscnm::Normal },
                6 => {
                    self.modes.origin = if on { Decom::Origin } else { Decom::Absolute };
                    self.cursor.x = 0;
                    self.cursor.y = if on { self.grid.scroll_region().0 } else { 0 };
                }
                7 => self.modes.auto_wrap = if on { Decawm::Enabled } else { Decawm::Disabled },
                25 => self.modes.cursor_visible = if on { Dectcem::Visible } else { Dectcem::Hidden },
                1000 => self.modes.mouse_track = if on { MouseTrack::Normal } else { MouseTrack::Off },
                1002 => self.modes.mouse_track = if on { MouseTrack::ButtonEvent } else { MouseTrack::Off },
                1003 => self.modes.mouse_track = if on { MouseTrack::AnyEvent } else { MouseTrack::Off },
                1004 => self.modes.focus_reporting = if on { FocusReporting::On } else { FocusReporting::Off },
                1006 => self.modes.mouse_encoding = if on { MouseEncoding::Sgr } else { MouseEncoding::X10 },
                1049 | 1047 | 47 => self.toggle_alt_screen(on),
                2004 => self.modes.bracketed_paste = if on { BracketedPaste::On } else { BracketedPaste::Off },
                2026 => self.modes.synchronized_updates = if on { SynchronizedUpdates::On } else { SynchronizedUpdates::Off },
                _ => debug!("ignoring unsupported private mode {mode}"),
            }
        } else {
            match mode {
                4 => self.modes.insert = if on { InsertMode::Insert } else { InsertMode::Replace },
                20 => self.modes.line_feed_mode = if on { Lnm::AutoCarriageReturn } else { Lnm::LineFeedOnly },
                _ => debug!("ignoring unsupported mode {mode}"),
            }
        }
    }

    fn toggle_alt_screen(&mut self, on: bool) {
        if on == self.grid.is_alt_screen() {
            return;
        }
        if on {
            self.save_cursor();
        }
        self.grid.swap_screens();
        if on {
            let (rows, cols) = (self.grid.rows(), self.grid.cols());
            self.grid.clear_region(0, 0, cols.saturating_sub(1), rows.saturating_sub(1), &self.cursor.attrs);
        } else {
            self.restore_cursor();
        }
    }

    fn apply_sgr(&mut self, attrs: &[SgrAttribute]) {
        for attr in attrs {
            match *attr {
                SgrAttribute::Reset => self.cursor.attrs.reset(),
                SgrAttribute::Bold => self.cursor.attrs.flags.insert(AttrFlags::BOLD),
                SgrAttribute::Faint => self.cursor.attrs.flags.insert(AttrFlags::FAINT),
                SgrAttribute::Italic => self.cursor.attrs.flags.insert(AttrFlags::ITALIC),
                SgrAttribute::Underline(style) => {
                    self.cursor.attrs.flags.insert(AttrFlags::UNDERLINE);
                    self.cursor.attrs.underline_style = style;
                }
                SgrAttribute::Blink => self.cursor.attrs.flags.insert(AttrFlags::BLINK),
                SgrAttribute::Reverse => self.cursor.attrs.flags.insert(AttrFlags::REVERSE),
                SgrAttribute::Hidden => self.cursor.attrs.flags.insert(AttrFlags::HIDDEN),
                SgrAttribute::Struck => self.cursor.attrs.flags.insert(AttrFlags::STRUCK),
                SgrAttribute::ClearBoldFaint => self.cursor.attrs.flags.remove(AttrFlags::BOLD | AttrFlags::FAINT),
                SgrAttribute::ClearItalic => self.cursor.attrs.flags.remove(AttrFlags::ITALIC),
                SgrAttribute::ClearUnderline => {
                    self.cursor.attrs.flags.remove(AttrFlags::UNDERLINE);
                    self.cursor.attrs.underline_style = UnderlineStyle::None;
                }
                SgrAttribute::ClearBlink => self.cursor.attrs.flags.remove(AttrFlags::BLINK),
                SgrAttribute::ClearReverse => self.cursor.attrs.flags.remove(AttrFlags::REVERSE),
                SgrAttribute::ClearHidden => self.cursor.attrs.flags.remove(AttrFlags::HIDDEN),
                SgrAttribute::ClearStruck => self.cursor.attrs.flags.remove(AttrFlags::STRUCK),
                SgrAttribute::Foreground(key) => self.cursor.attrs.fg = key,
                SgrAttribute::Background(key) => self.cursor.attrs.bg = key,
                SgrAttribute::UnderlineColor(key) => self.cursor.attrs.underline_color = key,
                SgrAttribute::DefaultUnderlineColor => self.cursor.attrs.underline_color = ColorKey::default_fg(),
                SgrAttribute::Unknown(p) => debug!("ignoring unsupported SGR parameter {p}"),
            }
        }
    }

    fn apply_osc(&mut self, action: OscAction) {
        match action {
            OscAction::SetIconNameAndTitle(s) | OscAction::SetWindowTitle(s) => self.title = s,
            OscAction::SetIconName(_) => {}
            OscAction::SetPaletteColor { index, color } => {
                if let Some(rgb) = color.as_rgb() {
                    self.palette.set(index, rgb);
                } else {
                    let rgb = self.palette.get(color.0 as usize);
                    self.palette.set(index, rgb);
                }
            }
            OscAction::SetDynamicColor { target, color } => {
                let rgb = color.as_rgb().unwrap_or_else(|| self.palette.get(color.0 as usize));
                match target {
                    OscTarget::ForegroundDefault => self.palette.default_fg = rgb,
                    OscTarget::BackgroundDefault => self.palette.default_bg = rgb,
                    OscTarget::CursorColor => self.palette.cursor_color = rgb,
                }
            }
            OscAction::QueryDynamicColor(_) | OscAction::ClipboardQuery { .. } => {
                // Answering these requires a response channel the core
                // does not own; left to the embedder, which can inspect
                // `palette()` directly.
            }
            OscAction::ResetPaletteColor(index) => self.palette.reset(index, self.base_palette),
            OscAction::ClipboardWrite { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emulator(rows: usize, cols: usize) -> Emulator {
        let mut cfg = Config::default();
        cfg.rows = rows;
        cfg.cols = cols;
        cfg.scrollback_depth = 50;
        Emulator::new(cfg)
    }

    #[test]
    fn printable_text_advances_cursor() {
        let mut e = emulator(5, 10);
        e.feed(b"Hi");
        assert_eq!(e.cursor().x, 2);
        assert_eq!(e.grid().row(0).unwrap().text_range(0, 9), "Hi");
    }

    #[test]
    fn wide_char_occupies_two_columns_and_advances_by_two() {
        let mut e = emulator(3, 10);
        e.feed("測".as_bytes());
        assert_eq!(e.cursor().x, 2);
        assert!(e.grid().row(0).unwrap().get(0).unwrap().is_wide());
        assert!(e.grid().row(0).unwrap().get(1).unwrap().is_wide_dummy());
    }

    #[test]
    fn line_feed_at_bottom_scrolls_instead_of_overflowing() {
        let mut e = emulator(2, 4);
        e.feed(b"AA\nBB\nCC");
        assert_eq!(e.cursor().y, 1);
        assert_eq!(e.grid().scrollback().len(), 1);
    }

    #[test]
    fn cup_is_zero_based_after_one_based_decode() {
        let mut e = emulator(10, 10);
        e.feed(b"\x1b[6;11H");
        assert_eq!(e.cursor().y, 5);
        assert_eq!(e.cursor().x, 9);
    }

    #[test]
    fn cursor_position_report_matches_scenario() {
        let mut e = emulator(10, 20);
        e.feed(b"\x1b[6;11H");
        let responses = e.feed(b"\x1b[6n");
        assert_eq!(responses, b"\x1b[6;11R".to_vec());
    }

    #[test]
    fn sgr_reset_then_bold_and_color() {
        let mut e = emulator(5, 10);
        e.feed(b"\x1b[0;1;31m");
        assert!(e.cursor().attrs.flags.contains(AttrFlags::BOLD));
        assert_eq!(e.cursor().attrs.fg, ColorKey::index(1));
    }

    #[test]
    fn full_reset_homes_cursor_and_clears_attrs() {
        let mut e = emulator(5, 10);
        e.feed(b"\x1b[5;5H\x1b[1m");
        e.feed(b"\x1bc");
        assert_eq!((e.cursor().x, e.cursor().y), (0, 0));
        assert!(e.cursor().attrs.flags.is_empty());
    }

    #[test]
    fn alt_screen_swap_restores_cursor_on_exit() {
        let mut e = emulator(5, 10);
        e.feed(b"\x1b[3;3H");
        e.feed(b"\x1b[?1049h");
        assert!(e.grid().is_alt_screen());
        e.feed(b"ABC");
        e.feed(b"\x1b[?1049l");
        assert!(!e.grid().is_alt_screen());
        assert_eq!((e.cursor().x, e.cursor().y), (2, 2));
    }

    #[test]
    fn resize_below_minimum_errors() {
        let mut e = emulator(5, 10);
        assert_eq!(e.resize(0, 10), Err(EmulatorError::ResizeBelowMinimum { rows: 0, cols: 10 }));
    }

    #[test]
    fn decaln_fills_screen_with_e() {
        let mut e = emulator(2, 3);
        e.feed(b"\x1b#8");
        assert_eq!(e.grid().row(0).unwrap().text_range(0, 2), "EEE");
        assert_eq!((e.cursor().x, e.cursor().y), (0, 0));
    }

    #[test]
    fn scroll_history_up_and_down_clamp_to_depth() {
        let mut e = emulator(3, 4);
        e.feed(b"AAAA\nBBBB\nCCCC\nDDDD\n");
        assert_eq!(e.grid().scrollback().len(), 2);

        e.scroll_history_up(100);
        assert_eq!(e.scroll_offset(), 2);

        e.scroll_history_down(100);
        assert_eq!(e.scroll_offset(), 0);
    }

    #[test]
    fn entering_alt_screen_resets_history_scroll() {
        let mut e = emulator(3, 4);
        e.feed(b"AAAA\nBBBB\nCCCC\nDDDD\n");
        e.scroll_history_up(1);
        assert!(e.scroll_offset() > 0);
        e.feed(b"\x1b[?1049h");
        assert_eq!(e.scroll_offset(), 0);
    }

    #[test]
    fn visible_row_matches_scrolled_history() {
        let mut e = emulator(3, 4);
        e.feed(b"AAAA\nBBBB\nCCCC\nDDDD\n");
        // Scrollback holds AAAA (oldest) then BBBB (newest, the row
        // directly above the live screen's current top row).
        e.scroll_history_up(1);
        assert_eq!(e.visible_row(0).unwrap().text_range(0, 3), "BBBB");
    }
}

