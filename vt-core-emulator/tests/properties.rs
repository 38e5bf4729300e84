// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Property tests for the two invariants this core cannot afford to get
//! wrong under arbitrary input: a double-width cell is always paired
//! with its wide-dummy continuation, and a selection always normalizes
//! to `start <= end` regardless of drag direction.

use proptest::prelude::*;
use vt_core_buffer::grid::Grid;
use vt_core_common::config::Config;
use vt_core_emulator::emulator::Emulator;
use vt_core_emulator::selection::{BufferPos, Selection, SelectionMode};

/// Bytes drawn from printable ASCII, common controls, escape-sequence
/// starters, and a handful of wide (CJK) code points, so generated
/// streams exercise both the parser's state machine and the
/// wide-character write path.
fn arb_terminal_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (0x20u8..=0x7Eu8),
            1 => proptest::sample::select(vec![0x07u8, 0x08u8, b'\r', b'\n', b'\t']),
            1 => Just(0x1Bu8),
            1 => any::<u8>(),
        ],
        0..512,
    )
}

fn arb_wide_char() -> impl Strategy<Value = char> {
    proptest::sample::select(vec!['測', '試', '界', '中', '文'])
}

fn wide_adjacency_holds(grid: &Grid) -> bool {
    for y in 0..grid.rows() {
        let Some(row) = grid.row(y) else { continue };
        let cells = row.cells();
        for (x, cell) in cells.iter().enumerate() {
            if cell.is_wide() && (x + 1 >= cells.len() || !cells[x + 1].is_wide_dummy()) {
                return false;
            }
            if cell.is_wide_dummy() && (x == 0 || !cells[x - 1].is_wide()) {
                return false;
            }
        }
    }
    true
}

proptest! {
    /// Feeding arbitrary bytes, interspersed with wide characters, never
    /// panics and never leaves a wide cell without its dummy partner (or
    /// vice versa) in either screen buffer.
    #[test]
    fn wide_adjacency_survives_arbitrary_input(
        plain in arb_terminal_bytes(),
        wide_chars in proptest::collection::vec(arb_wide_char(), 0..16),
        rows in 2usize..10,
        cols in 2usize..20,
    ) {
        let mut cfg = Config::default();
        cfg.rows = rows;
        cfg.cols = cols;
        cfg.scrollback_depth = 50;
        let mut emulator = Emulator::new(cfg);

        emulator.feed(&plain);
        for c in wide_chars {
            let mut buf = [0u8; 4];
            emulator.feed(c.encode_utf8(&mut buf).as_bytes());
        }
        emulator.feed(&plain);

        prop_assert!(wide_adjacency_holds(emulator.grid()));

        // Swap to the alternate screen and back; the invariant must hold
        // in both buffers, not just whichever is active.
        emulator.feed(b"\x1b[?1049h");
        for c in "測試".chars() {
            let mut buf = [0u8; 4];
            emulator.feed(c.encode_utf8(&mut buf).as_bytes());
        }
        prop_assert!(wide_adjacency_holds(emulator.grid()));
        emulator.feed(b"\x1b[?1049l");
        prop_assert!(wide_adjacency_holds(emulator.grid()));
    }

    /// A selection always normalizes so `start <= end`, no matter which
    /// of two arbitrary positions was the anchor and which was the drag
    /// head, and the membership test agrees with the normalized bounds
    /// on a row strictly inside the span.
    #[test]
    fn selection_normalizes_regardless_of_drag_direction(
        a_line in 0usize..50, a_col in 0usize..200,
        b_line in 0usize..50, b_col in 0usize..200,
        rectangular in any::<bool>(),
    ) {
        let a = BufferPos::new(a_line, a_col);
        let b = BufferPos::new(b_line, b_col);
        let mode = if rectangular { SelectionMode::Rectangular } else { SelectionMode::Regular };

        let mut forward = Selection::start(a, mode);
        forward.extend(b);
        let mut backward = Selection::start(b, mode);
        backward.extend(a);

        let (fs, fe) = forward.normalized();
        let (bs, be) = backward.normalized();

        prop_assert!(fs <= fe);
        prop_assert_eq!((fs, fe), (bs, be));

        if a_line != b_line {
            let mid_line = a_line.min(b_line) + 1;
            if mid_line < a_line.max(b_line) {
                let mid = BufferPos::new(mid_line, 0);
                prop_assert_eq!(forward.is_selected(mid), backward.is_selected(mid));
            }
        }
    }
}
