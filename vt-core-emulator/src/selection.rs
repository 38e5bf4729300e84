// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection over the combined scrollback + viewport buffer: start,
//! extend, normalize, membership test, and text extraction. A pure
//! data/logic layer with no I/O, independently testable against a
//! [`Grid`] snapshot.

use vt_core_buffer::grid::Grid;

/// A cell position in the combined buffer: lines `0..scrollback_len` are
/// scrollback (oldest first), followed by `grid.rows()` viewport lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferPos {
    pub line: usize,
    pub col: usize,
}

impl BufferPos {
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Inclusive text run from `start` through `end`, wrapping full rows
    /// in between.
    Regular,
    /// A rectangle spanning `[start.col, end.col]` on every row in
    /// `[start.line, end.line]`.
    Rectangular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: BufferPos,
    head: BufferPos,
    mode: SelectionMode,
}

impl Selection {
    #[must_use]
    pub const fn start(pos: BufferPos, mode: SelectionMode) -> Self {
        Self {
            anchor: pos,
            head: pos,
            mode,
        }
    }

    pub fn extend(&mut self, pos: BufferPos) {
        self.head = pos;
    }

    /// Ordered `(start, end)` with `start <= end`.
    #[must_use]
    pub fn normalized(&self) -> (BufferPos, BufferPos) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn is_selected(&self, pos: BufferPos) -> bool {
        let (start, end) = self.normalized();
        if pos.line < start.line || pos.line > end.line {
            return false;
        }
        match self.mode {
            SelectionMode::Rectangular => {
                let (lo, hi) = if start.col <= end.col { (start.col, end.col) } else { (end.col, start.col) };
                pos.col >= lo && pos.col <= hi
            }
            SelectionMode::Regular => {
                if start.line == end.line {
                    pos.col >= start.col && pos.col <= end.col
                } else if pos.line == start.line {
                    pos.col >= start.col
                } else if pos.line == end.line {
                    pos.col <= end.col
                } else {
                    true
                }
            }
        }
    }

    /// Expand `pos` to the word boundaries (contiguous non-delimiter run,
    /// or contiguous delimiter run if the clicked cell is a delimiter).
    #[must_use]
    pub fn word_at(pos: BufferPos, grid: &Grid, delimiters: &str) -> Self {
        let total = total_lines(grid);
        if total == 0 || grid.cols() == 0 {
            return Self::start(pos, SelectionMode::Regular);
        }
        let line = pos.line.min(total - 1);
        let cols = grid.cols();
        let col = pos.col.min(cols - 1);
        let is_delim = |c: char| delimiters.contains(c) || c.is_whitespace();

        let target_is_delim = is_delim(line_char(grid, line, col).unwrap_or(' '));
        let mut start_col = col;
        while start_col > 0 && is_delim(line_char(grid, line, start_col - 1).unwrap_or(' ')) == target_is_delim {
            start_col -= 1;
        }
        let mut end_col = col;
        while end_col + 1 < cols && is_delim(line_char(grid, line, end_col + 1).unwrap_or(' ')) == target_is_delim {
            end_col += 1;
        }

        Self {
            anchor: BufferPos::new(line, start_col),
            head: BufferPos::new(line, end_col),
            mode: SelectionMode::Regular,
        }
    }

    /// Select the entire line `line` (all columns).
    #[must_use]
    pub fn line_at(line: usize, grid: &Grid) -> Self {
        let total = total_lines(grid);
        let cols = grid.cols();
        if total == 0 || cols == 0 {
            let p = BufferPos::new(line, 0);
            return Self::start(p, SelectionMode::Regular);
        }
        let line = line.min(total - 1);
        Self {
            anchor: BufferPos::new(line, 0),
            head: BufferPos::new(line, cols - 1),
            mode: SelectionMode::Regular,
        }
    }

    /// Extract the selected text, trimming trailing blanks per row and
    /// skipping wide-dummy continuation cells.
    #[must_use]
    pub fn get_text(&self, grid: &Grid) -> String {
        let cols = grid.cols();
        let total = total_lines(grid);
        if cols == 0 || total == 0 {
            return String::new();
        }

        let (start, end) = self.normalized();
        let start_line = start.line.min(total - 1);
        let end_line = end.line.min(total - 1);

        let mut out = String::new();
        for line in start_line..=end_line {
            let (sc, ec) = match self.mode {
                SelectionMode::Rectangular => {
                    let (lo, hi) = if start.col <= end.col { (start.col, end.col) } else { (end.col, start.col) };
                    (lo.min(cols - 1), hi.min(cols - 1))
                }
                SelectionMode::Regular => {
                    let sc = if line == start_line { start.col.min(cols - 1) } else { 0 };
                    let ec = if line == end_line { end.col.min(cols - 1) } else { cols - 1 };
                    (sc, ec)
                }
            };

            if sc <= ec {
                out.push_str(&line_text_range(grid, line, sc, ec));
            }
            if line != end_line {
                out.push('\n');
            }
        }
        out
    }
}

fn total_lines(grid: &Grid) -> usize {
    grid.scrollback().len() + grid.rows()
}

/// Maps a combined-buffer `line` to its row, either in `scrollback` or
/// the active viewport.
fn line_char(grid: &Grid, line: usize, col: usize) -> Option<char> {
    let sb_len = grid.scrollback().len();
    if line < sb_len {
        grid.scrollback().get(sb_len - 1 - line)?.get(col).map(|c| c.codepoint)
    } else {
        grid.row(line - sb_len)?.get(col).map(|c| c.codepoint)
    }
}

fn line_text_range(grid: &Grid, line: usize, from: usize, to: usize) -> String {
    let sb_len = grid.scrollback().len();
    if line < sb_len {
        grid.scrollback()
            .get(sb_len - 1 - line)
            .map_or_else(String::new, |row| row.text_range(from, to))
    } else {
        grid.row(line - sb_len).map_or_else(String::new, |row| row.text_range(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_text(rows: usize, cols: usize, lines: &[&str]) -> Grid {
        let mut grid = Grid::new(rows, cols, 10);
        for (y, text) in lines.iter().enumerate() {
            if let Some(row) = grid.row_mut(y) {
                for (x, ch) in text.chars().enumerate() {
                    if let Some(cell) = row.get_mut(x) {
                        cell.codepoint = ch;
                    }
                }
            }
        }
        grid
    }

    #[test]
    fn normalized_orders_regardless_of_drag_direction() {
        let mut sel = Selection::start(BufferPos::new(2, 5), SelectionMode::Regular);
        sel.extend(BufferPos::new(0, 1));
        let (start, end) = sel.normalized();
        assert_eq!(start, BufferPos::new(0, 1));
        assert_eq!(end, BufferPos::new(2, 5));
    }

    #[test]
    fn regular_selection_spans_full_middle_rows() {
        let mut sel = Selection::start(BufferPos::new(0, 3), SelectionMode::Regular);
        sel.extend(BufferPos::new(2, 1));
        assert!(sel.is_selected(BufferPos::new(1, 0)));
        assert!(!sel.is_selected(BufferPos::new(0, 0)));
        assert!(!sel.is_selected(BufferPos::new(2, 2)));
    }

    #[test]
    fn rectangular_selection_only_covers_column_band() {
        let mut sel = Selection::start(BufferPos::new(0, 2), SelectionMode::Rectangular);
        sel.extend(BufferPos::new(2, 4));
        assert!(sel.is_selected(BufferPos::new(1, 3)));
        assert!(!sel.is_selected(BufferPos::new(1, 5)));
    }

    #[test]
    fn word_at_snaps_to_identifier_boundaries() {
        let grid = grid_with_text(1, 20, &["foo.bar baz"]);
        let sel = Selection::word_at(BufferPos::new(0, 1), &grid, " ");
        assert_eq!(sel.get_text(&grid), "foo.bar");
    }

    #[test]
    fn line_at_selects_full_row_trimmed() {
        let grid = grid_with_text(2, 10, &["hi", "there"]);
        let sel = Selection::line_at(0, &grid);
        assert_eq!(sel.get_text(&grid), "hi");
    }

    #[test]
    fn get_text_joins_multiple_rows_with_newline() {
        let grid = grid_with_text(2, 5, &["ab", "cd"]);
        let mut sel = Selection::start(BufferPos::new(0, 0), SelectionMode::Regular);
        sel.extend(BufferPos::new(1, 1));
        assert_eq!(sel.get_text(&grid), "ab\ncd");
    }
}
