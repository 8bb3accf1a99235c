//! Line resolver tests

use block_grid::core::{find_full_lines, resolve, Board, Piece, ShapeKind};
use block_grid::types::Color;

const C: Color = Color::rgb(1, 2, 3);

#[test]
fn test_single_row_clear() {
    let mut board = Board::from_rows(&["....", "####", "#...", "...."], C).unwrap();
    let clear = resolve(&mut board);

    assert_eq!(clear.lines.rows(), &[1]);
    assert_eq!(clear.line_count(), 1);
    assert_eq!(clear.cells_cleared, 4);
    assert_eq!(board.filled_count(), 1);
    assert!(board.is_filled_at(0, 2));
}

#[test]
fn test_row_and_column_cross_clear_together() {
    let mut board = Board::from_rows(&["#...", "####", "#...", "#..."], C).unwrap();
    let clear = resolve(&mut board);

    assert_eq!(clear.lines.rows(), &[1]);
    assert_eq!(clear.lines.columns(), &[0]);
    assert_eq!(clear.line_count(), 2);
    // Intersection counted once
    assert_eq!(clear.cells_cleared, 7);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_full_board_clears_everything() {
    let mut board = Board::from_rows(&["###", "###", "###"], C).unwrap();
    let clear = resolve(&mut board);
    assert_eq!(clear.line_count(), 6);
    assert_eq!(clear.cells_cleared, 9);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_no_cascade() {
    let mut board = Board::from_rows(&["##.", "###", "##."], C).unwrap();
    let clear = resolve(&mut board);
    assert_eq!(clear.lines.rows(), &[1]);
    assert!(clear.lines.columns().iter().all(|&x| x < 2));

    // A second pass finds nothing new
    assert_eq!(resolve(&mut board).line_count(), 0);
}

#[test]
fn test_resolve_ignores_hover_cells() {
    let mut board = Board::from_rows(&["###.", "....", "....", "...."], C).unwrap();
    board.update_hover_preview(&Piece::new(ShapeKind::Mono, C), 3, 0);

    assert!(find_full_lines(&board).is_empty());
    let clear = resolve(&mut board);
    assert_eq!(clear.line_count(), 0);
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_empty_board_resolves_to_nothing() {
    let mut board = Board::new(8).unwrap();
    let clear = resolve(&mut board);
    assert!(clear.lines.is_empty());
    assert_eq!(clear.cells_cleared, 0);
}
