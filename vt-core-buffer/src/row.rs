// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `Row`: a fixed-length sequence of `Cell`s with the wide/wide-dummy
//! adjacency invariant enforced at every mutation boundary.

use crate::cell::{Cell, CellAttrs};
use vt_core_common::sgr::AttrFlags;

#[derive(Debug, Clone)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn get(&self, x: usize) -> Option<&Cell> {
        self.cells.get(x)
    }

    pub fn get_mut(&mut self, x: usize) -> Option<&mut Cell> {
        self.cells.get_mut(x)
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear every cell to a blank inheriting `template`'s colours.
    pub fn clear(&mut self, template: &CellAttrs) {
        for cell in &mut self.cells {
            *cell = Cell::blank(template);
        }
    }

    /// Clear `[from, to]` inclusive to blanks inheriting `template`.
    pub fn clear_range(&mut self, from: usize, to: usize, template: &CellAttrs) {
        let to = to.min(self.cells.len().saturating_sub(1));
        for cell in self.cells.iter_mut().take(to + 1).skip(from) {
            *cell = Cell::blank(template);
        }
    }

    /// True iff the last cell of the row has the wrap-marker bit set,
    /// meaning this row logically continues onto the next.
    #[must_use]
    pub fn is_wrap_continued(&self) -> bool {
        self.cells
            .last()
            .is_some_and(|c| c.flags.contains(AttrFlags::WRAP_MARKER))
    }

    /// Invariant enforcement: called before writing into a cell that may
    /// currently be a wide head or a wide-dummy trailer. Clears whichever
    /// half of the pair is *not* being overwritten so the adjacency
    /// invariant never transiently breaks.
    pub fn clear_wide(&mut self, x: usize, template: &CellAttrs) {
        let Some(cell) = self.cells.get(x).copied() else {
            return;
        };

        if cell.is_wide() {
            if let Some(dummy) = self.cells.get_mut(x + 1) {
                *dummy = Cell::blank(template);
            }
        } else if cell.is_wide_dummy() && x > 0 {
            if let Some(head) = self.cells.get_mut(x - 1) {
                *head = Cell::blank(template);
            }
        }
    }

    /// Resize in place: grow by appending blanks, shrink by truncation.
    /// Column changes do not attempt reflow.
    pub fn resize(&mut self, new_width: usize, template: &CellAttrs) {
        match new_width.cmp(&self.cells.len()) {
            std::cmp::Ordering::Greater => self.cells.resize(new_width, Cell::blank(template)),
            std::cmp::Ordering::Less => self.cells.truncate(new_width),
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Insert `n` blanks at `x`, shifting cells `[x, end)` right; cells
    /// shifted past the right margin are dropped. Invalidates any wide
    /// pair straddling `x`.
    pub fn insert_blanks(&mut self, x: usize, n: usize, template: &CellAttrs) {
        if x >= self.cells.len() {
            return;
        }
        self.clear_wide(x, template);
        let width = self.cells.len();
        let n = n.min(width - x);
        self.cells.truncate(width - n);
        for _ in 0..n {
            self.cells.insert(x, Cell::blank(template));
        }
    }

    /// Delete `n` cells at `x`, shifting cells right of the deleted range
    /// left and filling the vacated tail with blanks.
    pub fn delete_cells(&mut self, x: usize, n: usize, template: &CellAttrs) {
        if x >= self.cells.len() {
            return;
        }
        self.clear_wide(x, template);
        let width = self.cells.len();
        let n = n.min(width - x);
        self.cells.drain(x..x + n);
        self.cells.resize(width, Cell::blank(template));
    }

    /// Extract the UTF-8 text of columns `[from, to]` inclusive, trimming
    /// trailing blank cells from the range.
    #[must_use]
    pub fn text_range(&self, from: usize, to: usize) -> String {
        let to = to.min(self.cells.len().saturating_sub(1));
        if from > to {
            return String::new();
        }

        let mut end = to;
        while end >= from && self.cells[end].is_blank() {
            if end == from {
                return String::new();
            }
            end -= 1;
        }

        self.cells[from..=end]
            .iter()
            .filter(|c| !c.is_wide_dummy())
            .map(|c| c.codepoint)
            .collect()
    }
}
