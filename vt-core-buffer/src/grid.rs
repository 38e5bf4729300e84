// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `Grid`: primary and alternate R x C screen buffers, a fixed-capacity
//! scrollback ring, dirty-row tracking, tab stops, and the DECSTBM
//! scroll region.

use crate::cell::CellAttrs;
use crate::row::Row;

/// A fixed-capacity circular buffer of scrollback `Row`s. Rows are
/// written once at the write cursor and never shifted; once `count`
/// reaches `capacity` the oldest row is silently overwritten.
#[derive(Debug, Clone)]
pub struct ScrollbackRing {
    rows: Vec<Row>,
    capacity: usize,
    write_index: usize,
    count: usize,
}

impl ScrollbackRing {
    #[must_use]
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            rows: (0..capacity).map(|_| Row::blank(width)).collect(),
            capacity,
            write_index: 0,
            count: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append `row`, overwriting the oldest entry once at capacity.
    pub fn push(&mut self, row: Row) {
        if self.capacity == 0 {
            return;
        }
        self.rows[self.write_index] = row;
        self.write_index = (self.write_index + 1) % self.capacity;
        self.count = (self.count + 1).min(self.capacity);
    }

    /// Row `age` generations back from the most recently pushed (0 =
    /// most recent). `None` if `age >= len()`.
    #[must_use]
    pub fn get(&self, age: usize) -> Option<&Row> {
        if age >= self.count {
            return None;
        }
        let idx = (self.write_index + self.capacity - 1 - age) % self.capacity;
        self.rows.get(idx)
    }

    /// Reallocate to `width`, clearing all rows (reflow is not
    /// attempted, per the column-change contract).
    pub fn resize_width(&mut self, width: usize, capacity: usize) {
        self.rows = (0..capacity).map(|_| Row::blank(width)).collect();
        self.capacity = capacity;
        self.write_index = 0;
        self.count = 0;
    }

    /// Discard all scrollback content without reallocating or touching
    /// either screen (`CSI 3 J`).
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.count = 0;
    }
}

/// Which of the two screens a `Grid` is currently presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScreen {
    Primary,
    Alternate,
}

#[derive(Debug, Clone)]
pub struct Grid {
    primary: Vec<Row>,
    alternate: Vec<Row>,
    active: ActiveScreen,
    scrollback: ScrollbackRing,
    rows: usize,
    cols: usize,
    dirty: Vec<bool>,
    tab_stops: Vec<bool>,
    scroll_top: usize,
    scroll_bottom: usize,
    /// `scr`: how many rows the visible window has been scrolled back
    /// into history, `0..=scrollback.len()`.
    scroll_offset: usize,
}

const DEFAULT_TAB_WIDTH: usize = 8;

impl Grid {
    /// `init`: allocate primary and alternate buffers, the scrollback
    /// ring, an all-dirty vector, and a tab-stop bitmap with every 8th
    /// column set.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(rows, cols, scrollback_depth))]
    pub fn new(rows: usize, cols: usize, scrollback_depth: usize) -> Self {
        Self {
            primary: (0..rows).map(|_| Row::blank(cols)).collect(),
            alternate: (0..rows).map(|_| Row::blank(cols)).collect(),
            active: ActiveScreen::Primary,
            scrollback: ScrollbackRing::new(scrollback_depth, cols),
            rows,
            cols,
            dirty: vec![true; rows],
            tab_stops: Self::default_tab_stops(cols),
            scroll_top: 0,
            scroll_bottom: rows.saturating_sub(1),
            scroll_offset: 0,
        }
    }

    fn default_tab_stops(cols: usize) -> Vec<bool> {
        (0..cols).map(|x| x % DEFAULT_TAB_WIDTH == 0).collect()
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn active_screen(&self) -> ActiveScreen {
        self.active
    }

    #[must_use]
    pub const fn is_alt_screen(&self) -> bool {
        matches!(self.active, ActiveScreen::Alternate)
    }

    #[must_use]
    pub const fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    /// `DECSTBM`: a region with `top > bottom` is invalid and leaves the
    /// existing region untouched (a single-row region, `top == bottom`,
    /// is a valid degenerate case used internally by IL/DL).
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.min(self.rows.saturating_sub(1));
        let bottom = bottom.min(self.rows.saturating_sub(1));
        if top > bottom {
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
    }

    pub fn reset_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = self.rows.saturating_sub(1);
    }

    fn active_mut(&mut self) -> &mut Vec<Row> {
        match self.active {
            ActiveScreen::Primary => &mut self.primary,
            ActiveScreen::Alternate => &mut self.alternate,
        }
    }

    #[must_use]
    pub fn active_rows(&self) -> &[Row] {
        match self.active {
            ActiveScreen::Primary => &self.primary,
            ActiveScreen::Alternate => &self.alternate,
        }
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.active_rows().get(y)
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut Row> {
        self.active_mut().get_mut(y)
    }

    #[must_use]
    pub fn scrollback(&self) -> &ScrollbackRing {
        &self.scrollback
    }

    /// `CSI 3 J`: discard scrollback content, leaving both screens alone.
    pub fn clear_scrollback(&mut self) {
        self.scrollback.clear();
    }

    /// `scr`: how many rows the visible window is currently scrolled
    /// back into scrollback history.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// `kscrollUp(n)`: scroll the visible window further back into
    /// history, clamped to the available scrollback depth.
    pub fn kscroll_up(&mut self, n: usize) {
        self.scroll_offset = (self.scroll_offset + n).min(self.scrollback.len());
        self.set_full_dirty();
    }

    /// `kscrollDown(n)`: scroll the visible window back toward the live
    /// screen, clamped at 0.
    pub fn kscroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        self.set_full_dirty();
    }

    /// `getVisibleLine`: resolve displayed row `y` (`0..rows`) under the
    /// current history scroll offset. Rows within the scrolled-back
    /// window come from scrollback; the rest come from the active
    /// screen, shifted down by `scroll_offset`.
    #[must_use]
    pub fn visible_row(&self, y: usize) -> Option<&Row> {
        if y < self.scroll_offset {
            self.scrollback.get(self.scroll_offset - 1 - y)
        } else {
            self.row(y - self.scroll_offset)
        }
    }

    #[must_use]
    pub fn tab_stops(&self) -> &[bool] {
        &self.tab_stops
    }

    pub fn set_tab_stop(&mut self, x: usize) {
        if let Some(stop) = self.tab_stops.get_mut(x) {
            *stop = true;
        }
    }

    pub fn clear_tab_stop(&mut self, x: usize) {
        if let Some(stop) = self.tab_stops.get_mut(x) {
            *stop = false;
        }
    }

    pub fn clear_all_tab_stops(&mut self) {
        self.tab_stops.fill(false);
    }

    /// Next tab stop strictly after `x`, or the last column if none.
    #[must_use]
    pub fn next_tab_stop(&self, x: usize) -> usize {
        self.tab_stops
            .iter()
            .enumerate()
            .skip(x + 1)
            .find(|(_, set)| **set)
            .map_or(self.cols.saturating_sub(1), |(i, _)| i)
    }

    /// Previous tab stop strictly before `x`, or 0 if none.
    #[must_use]
    pub fn prev_tab_stop(&self, x: usize) -> usize {
        self.tab_stops[..x.min(self.cols)]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, set)| **set)
            .map_or(0, |(i, _)| i)
    }

    /// `clearWide`: must be invoked before writing into a cell that
    /// borders the wide/wide-dummy adjacency invariant, clearing
    /// whichever half of the pair is not the write target.
    pub fn clear_wide(&mut self, x: usize, y: usize, template: &CellAttrs) {
        if let Some(row) = self.row_mut(y) {
            row.clear_wide(x, template);
        }
    }

    /// `clearRegion`: inclusive rectangle fill with space cells
    /// inheriting `template`; marks covered rows dirty.
    pub fn clear_region(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, template: &CellAttrs) {
        let y2 = y2.min(self.rows.saturating_sub(1));
        for y in y1..=y2 {
            if let Some(row) = self.row_mut(y) {
                row.clear_range(x1, x2, template);
            }
        }
        self.set_dirty(y1, y2);
    }

    /// `scrollUp(origin, n)`: rotate `[origin, bot]` up by `n`, filling
    /// the exposed bottom rows with spaces. When `origin == 0` and the
    /// alternate screen is not active, departing rows are pushed to the
    /// scrollback ring.
    #[tracing::instrument(level = "trace", skip(self, template))]
    pub fn scroll_up(&mut self, origin: usize, n: usize, template: &CellAttrs) {
        let bot = self.scroll_bottom.min(self.rows.saturating_sub(1));
        if origin > bot || n == 0 {
            return;
        }
        let to_scrollback = origin == 0 && self.active == ActiveScreen::Primary;
        let n = n.min(bot - origin + 1);
        let cols = self.cols;

        for _ in 0..n {
            let departing = self.active_mut().remove(origin);
            if to_scrollback {
                self.scrollback.push(departing);
            }
            self.active_mut().insert(bot, Row::blank(cols));
        }
        self.set_dirty(origin, bot);
    }

    /// `scrollDown(origin, n)`: rotate `[origin, bot]` down by `n`,
    /// filling the exposed top rows with spaces.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn scroll_down(&mut self, origin: usize, n: usize) {
        let bot = self.scroll_bottom.min(self.rows.saturating_sub(1));
        if origin > bot || n == 0 {
            return;
        }
        let n = n.min(bot - origin + 1);
        let cols = self.cols;

        for _ in 0..n {
            self.active_mut().remove(bot);
            self.active_mut().insert(origin, Row::blank(cols));
        }
        self.set_dirty(origin, bot);
    }

    pub fn set_dirty(&mut self, a: usize, b: usize) {
        let b = b.min(self.dirty.len().saturating_sub(1));
        for y in self.dirty.iter_mut().take(b + 1).skip(a) {
            *y = true;
        }
    }

    pub fn set_full_dirty(&mut self) {
        self.dirty.fill(true);
    }

    pub fn clear_dirty(&mut self, y: usize) {
        if let Some(d) = self.dirty.get_mut(y) {
            *d = false;
        }
    }

    #[must_use]
    pub fn is_dirty(&self, y: usize) -> bool {
        self.dirty.get(y).copied().unwrap_or(false)
    }

    /// `swapScreens`: exchange primary/alternate, toggling alt-screen
    /// mode and marking the whole grid dirty.
    pub fn swap_screens(&mut self) {
        self.active = match self.active {
            ActiveScreen::Primary => ActiveScreen::Alternate,
            ActiveScreen::Alternate => ActiveScreen::Primary,
        };
        self.scroll_offset = 0;
        self.set_full_dirty();
    }

    /// `resize(R', C')`: preserve the cursor where possible by shifting
    /// the primary grid up when the cursor's row would fall outside the
    /// new height (those rows are freed, not pushed to scrollback).
    /// Returns the row delta the cursor's y should be adjusted by.
    #[tracing::instrument(level = "debug", skip(self), fields(new_rows, new_cols))]
    pub fn resize(&mut self, new_rows: usize, new_cols: usize, cursor_y: usize, template: &CellAttrs) -> isize {
        let mut shift = 0isize;
        if cursor_y >= new_rows && new_rows > 0 {
            shift = (cursor_y as isize) - (new_rows as isize) + 1;
            for _ in 0..shift {
                if !self.primary.is_empty() {
                    self.primary.remove(0);
                }
            }
        }

        for row in self.primary.iter_mut().chain(self.alternate.iter_mut()) {
            row.resize(new_cols, template);
        }
        while self.primary.len() < new_rows {
            self.primary.push(Row::blank(new_cols));
        }
        self.primary.truncate(new_rows);
        while self.alternate.len() < new_rows {
            self.alternate.push(Row::blank(new_cols));
        }
        self.alternate.truncate(new_rows);

        if new_cols != self.cols {
            self.scrollback.resize_width(new_cols, self.scrollback.capacity());
            self.tab_stops = Self::default_tab_stops(new_cols);
        }

        self.rows = new_rows;
        self.cols = new_cols;
        self.dirty = vec![true; new_rows];
        self.reset_scroll_region();
        shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_allocates_both_screens_and_tab_stops() {
        let grid = Grid::new(4, 16, 100);
        assert_eq!(grid.active_rows().len(), 4);
        assert!(grid.tab_stops()[0]);
        assert!(grid.tab_stops()[8]);
        assert!(!grid.tab_stops()[1]);
    }

    #[test]
    fn scroll_up_from_top_feeds_scrollback_on_primary() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 4, 10);
        grid.row_mut(0).unwrap().get_mut(0).unwrap().codepoint = 'A';

        grid.scroll_up(0, 1, &template);
        assert_eq!(grid.scrollback().len(), 1);
        assert_eq!(grid.scrollback().get(0).unwrap().get(0).unwrap().codepoint, 'A');
    }

    #[test]
    fn scroll_up_does_not_feed_scrollback_on_alt_screen() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 4, 10);
        grid.swap_screens();
        grid.scroll_up(0, 1, &template);
        assert_eq!(grid.scrollback().len(), 0);
    }

    #[test]
    fn scroll_up_within_region_does_not_feed_scrollback() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(5, 4, 10);
        grid.scroll_up(1, 1, &template);
        assert_eq!(grid.scrollback().len(), 0);
    }

    #[test]
    fn swap_screens_toggles_and_marks_full_dirty() {
        let mut grid = Grid::new(3, 4, 10);
        grid.clear_dirty(0);
        grid.swap_screens();
        assert!(grid.is_alt_screen());
        assert!(grid.is_dirty(0));
    }

    #[test]
    fn resize_shrink_shifts_primary_rows_off_when_cursor_overflows() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(5, 4, 10);
        let shift = grid.resize(3, 4, 4, &template);
        assert_eq!(shift, 2);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn next_and_prev_tab_stop_wrap_correctly() {
        let grid = Grid::new(3, 20, 10);
        assert_eq!(grid.next_tab_stop(0), 8);
        assert_eq!(grid.next_tab_stop(8), 16);
        assert_eq!(grid.prev_tab_stop(10), 8);
        assert_eq!(grid.prev_tab_stop(0), 0);
    }

    #[test]
    fn clear_scrollback_empties_the_ring_without_touching_screens() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 4, 10);
        grid.scroll_up(0, 2, &template);
        assert_eq!(grid.scrollback().len(), 2);
        grid.clear_scrollback();
        assert_eq!(grid.scrollback().len(), 0);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn kscroll_up_and_down_clamp_to_scrollback_depth() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 4, 10);
        for _ in 0..5 {
            grid.scroll_up(0, 1, &template);
        }
        assert_eq!(grid.scrollback().len(), 5);

        grid.kscroll_up(100);
        assert_eq!(grid.scroll_offset(), 5);
        grid.kscroll_down(100);
        assert_eq!(grid.scroll_offset(), 0);
    }

    #[test]
    fn visible_row_reads_scrollback_then_active_screen() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 1, 10);
        grid.row_mut(0).unwrap().get_mut(0).unwrap().codepoint = 'A';
        // Scroll row 'A' off the top into scrollback; the row that
        // slides up into row 1 is what gets labeled 'B' below.
        grid.scroll_up(0, 1, &template);
        grid.row_mut(1).unwrap().get_mut(0).unwrap().codepoint = 'B';

        grid.kscroll_up(1);
        // Viewing one row back: row 0 of the window is the scrolled-off
        // 'A', and the live rows shift down by one in the view.
        assert_eq!(grid.visible_row(0).unwrap().get(0).unwrap().codepoint, 'A');
        assert_eq!(grid.visible_row(1).unwrap().get(0).unwrap().codepoint, ' ');
        assert_eq!(grid.visible_row(2).unwrap().get(0).unwrap().codepoint, 'B');
    }

    #[test]
    fn swap_screens_resets_history_scroll() {
        let template = CellAttrs::default();
        let mut grid = Grid::new(3, 4, 10);
        grid.scroll_up(0, 2, &template);
        grid.kscroll_up(1);
        assert_eq!(grid.scroll_offset(), 1);
        grid.swap_screens();
        assert_eq!(grid.scroll_offset(), 0);
    }
}
