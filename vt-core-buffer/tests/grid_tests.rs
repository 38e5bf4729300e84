use vt_core_buffer::cell::CellAttrs;
use vt_core_buffer::grid::Grid;

#[test]
fn scrollback_ring_wraps_at_capacity() {
    let template = CellAttrs::default();
    let mut grid = Grid::new(3, 4, 2);

    for i in 0..5 {
        grid.row_mut(0).unwrap().get_mut(0).unwrap().codepoint =
            char::from_u32(u32::from(b'A') + i).unwrap();
        grid.scroll_up(0, 1, &template);
    }

    assert_eq!(grid.scrollback().len(), 2);
    assert_eq!(grid.scrollback().get(0).unwrap().get(0).unwrap().codepoint, 'E');
    assert_eq!(grid.scrollback().get(1).unwrap().get(0).unwrap().codepoint, 'D');
}

#[test]
fn clear_region_marks_rows_dirty_and_blanks_cells() {
    let template = CellAttrs::default();
    let mut grid = Grid::new(5, 5, 10);
    grid.row_mut(2).unwrap().get_mut(2).unwrap().codepoint = 'X';

    for y in 0..grid.rows() {
        grid.clear_dirty(y);
    }

    grid.clear_region(0, 1, 4, 3, &template);

    assert!(grid.row(2).unwrap().get(2).unwrap().is_blank());
    assert!(!grid.is_dirty(0));
    assert!(grid.is_dirty(1));
    assert!(grid.is_dirty(3));
    assert!(!grid.is_dirty(4));
}

#[test]
fn resize_grow_appends_blank_rows_and_columns() {
    let template = CellAttrs::default();
    let mut grid = Grid::new(3, 3, 10);
    grid.resize(5, 6, 0, &template);

    assert_eq!(grid.rows(), 5);
    assert_eq!(grid.cols(), 6);
    assert_eq!(grid.active_rows().len(), 5);
    assert_eq!(grid.row(0).unwrap().width(), 6);
}

#[test]
fn scroll_down_fills_top_with_blanks() {
    let mut grid = Grid::new(4, 3, 10);
    grid.row_mut(0).unwrap().get_mut(0).unwrap().codepoint = 'Z';

    grid.scroll_down(0, 1);

    assert!(grid.row(0).unwrap().get(0).unwrap().is_blank());
    assert_eq!(grid.row(1).unwrap().get(0).unwrap().codepoint, 'Z');
}
