//! Board module - manages the game grid
//!
//! The board is a square N×N grid (8×8 in normal mode, 10×10 in chaos mode).
//! Uses a flat vector in row-major order (`y * size + x`) so full-grid traversal is a
//! single linear scan.
//!
//! Every cell carries committed state (empty or filled) plus optional transient hover
//! state written by a drag in progress. Hover state never changes what is committed:
//! [`Board::clear_hover_state`] always restores the exact committed pattern.

use arrayvec::ArrayVec;

use crate::error::{EngineError, EngineResult};
use crate::lines::{full_lines_where, FullLines};
use crate::pieces::{Piece, MAX_PIECE_CELLS};
use crate::placement::{check_placement, is_legal};
use crate::types::{CellStatus, Color, GameMode, MAX_BOARD_SIZE};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub status: CellStatus,
    /// Colour of the committed block, or of the piece hovering over an empty cell
    pub color: Option<Color>,
    /// Colour shown on any cell that the current hover would clear
    pub break_color: Option<Color>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        status: CellStatus::Empty,
        color: None,
        break_color: None,
    };

    pub fn filled(color: Color) -> Self {
        Self {
            status: CellStatus::Filled,
            color: Some(color),
            break_color: None,
        }
    }

    /// Whether the committed state is filled, ignoring hover flags
    pub fn is_filled(&self) -> bool {
        self.status.is_filled()
    }

    /// Drop any hover state, keeping the committed fill
    fn revert_hover(&mut self) {
        match self.status {
            CellStatus::HoverPreview | CellStatus::HoverBreakOnEmpty => *self = Cell::EMPTY,
            CellStatus::HoverBreakOnFilled => {
                self.status = CellStatus::Filled;
                self.break_color = None;
            }
            CellStatus::Empty | CellStatus::Filled => {}
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with side length `size`
    pub fn new(size: u8) -> EngineResult<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidBoardSize { size });
        }
        let len = size as usize * size as usize;
        Ok(Self {
            size,
            cells: vec![Cell::EMPTY; len],
        })
    }

    /// Create an empty board sized for a game mode
    pub fn for_mode(mode: GameMode) -> Self {
        let size = mode.board_size();
        Self {
            size,
            cells: vec![Cell::EMPTY; size as usize * size as usize],
        }
    }

    /// Build a board from text rows: `#` is filled, anything else empty.
    ///
    /// Rows must be square. Handy for tests and scripted scenarios.
    ///
    /// ```
    /// use block_grid_core::Board;
    /// use block_grid_types::Color;
    ///
    /// let board = Board::from_rows(&["#.", ".#"], Color::rgb(9, 9, 9)).unwrap();
    /// assert!(board.is_filled_at(0, 0));
    /// assert!(board.is_empty_at(1, 0));
    /// ```
    pub fn from_rows(rows: &[&str], color: Color) -> EngineResult<Self> {
        let size = u8::try_from(rows.len()).map_err(|_| EngineError::InvalidBoardSize { size: u8::MAX })?;
        let mut board = Self::new(size)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size as usize {
                return Err(EngineError::InvalidBoardSize { size });
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    board.cells[y * size as usize + x] = Cell::filled(color);
                }
            }
        }
        Ok(board)
    }

    /// Side length
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    pub(crate) fn index(&self, x: i16, y: i16) -> Option<usize> {
        let n = self.size as i16;
        if x < 0 || x >= n || y < 0 || y >= n {
            return None;
        }
        Some(y as usize * self.size as usize + x as usize)
    }

    /// Get cell at position (x, y). Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<&Cell> {
        self.index(x as i16, y as i16).map(|idx| &self.cells[idx])
    }

    /// Overwrite cell at position (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x as i16, y as i16) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and logically empty (hover over an empty cell still counts as empty)
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        self.is_open(x as i16, y as i16)
    }

    /// Within bounds and committed as filled
    pub fn is_filled_at(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some_and(Cell::is_filled)
    }

    #[inline(always)]
    pub(crate) fn is_open(&self, x: i16, y: i16) -> bool {
        match self.index(x, y) {
            Some(idx) => !self.cells[idx].is_filled(),
            None => false,
        }
    }

    #[inline(always)]
    pub(crate) fn filled_unchecked(&self, x: u8, y: u8) -> bool {
        self.cells[y as usize * self.size as usize + x as usize].is_filled()
    }

    /// Visit every cell in row-major order
    pub fn for_each_cell<F: FnMut(u8, u8, &Cell)>(&self, mut f: F) {
        let n = self.size as usize;
        for (idx, cell) in self.cells.iter().enumerate() {
            f((idx % n) as u8, (idx / n) as u8, cell);
        }
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of committed filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Whether any cell carries hover state
    pub fn has_hover_state(&self) -> bool {
        self.cells.iter().any(|c| c.status.is_hover())
    }

    /// Committed fill pattern, row-major (hover flags ignored)
    pub fn filled_mask(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_filled).collect()
    }

    /// Revert every hover status to its committed state. Idempotent
    pub fn clear_hover_state(&mut self) {
        for cell in &mut self.cells {
            cell.revert_hover();
        }
    }

    /// Commit `piece` anchored at `(x, y)`.
    ///
    /// Validates first and leaves the board untouched on error. Returns the cells that
    /// became filled, in the piece's offset order.
    pub fn place(
        &mut self,
        piece: &Piece,
        x: i8,
        y: i8,
    ) -> EngineResult<ArrayVec<(u8, u8), MAX_PIECE_CELLS>> {
        check_placement(self, piece, x, y)?;

        let mut placed = ArrayVec::new();
        for (cx, cy) in piece.cells_at(x, y) {
            if let Some(idx) = self.index(cx, cy) {
                self.cells[idx] = Cell::filled(piece.color);
                placed.push((cx as u8, cy as u8));
            }
        }
        Ok(placed)
    }

    /// Paint the hover preview for `piece` anchored at `(x, y)`.
    ///
    /// Any previous hover state is cleared first. Returns `None` (and paints nothing)
    /// when the spot is illegal, otherwise the lines the placement would complete.
    pub fn update_hover_preview(&mut self, piece: &Piece, x: i8, y: i8) -> Option<FullLines> {
        self.clear_hover_state();
        if !is_legal(self, piece, x, y) {
            return None;
        }

        for (cx, cy) in piece.cells_at(x, y) {
            if let Some(idx) = self.index(cx, cy) {
                self.cells[idx] = Cell {
                    status: CellStatus::HoverPreview,
                    color: Some(piece.color),
                    break_color: None,
                };
            }
        }

        let lines = full_lines_where(self.size, |cx, cy| {
            let cell = &self.cells[cy as usize * self.size as usize + cx as usize];
            cell.is_filled() || cell.status == CellStatus::HoverPreview
        });

        for (cx, cy) in lines.cells(self.size) {
            let idx = cy as usize * self.size as usize + cx as usize;
            let cell = &mut self.cells[idx];
            cell.status = if cell.is_filled() {
                CellStatus::HoverBreakOnFilled
            } else {
                CellStatus::HoverBreakOnEmpty
            };
            cell.break_color = Some(piece.color);
        }

        Some(lines)
    }

    /// Empty a single cell (used by the line resolver)
    pub(crate) fn clear_cell(&mut self, x: u8, y: u8) {
        let idx = y as usize * self.size as usize + x as usize;
        self.cells[idx] = Cell::EMPTY;
    }

    /// Numeric status codes, row-major (see [`CellStatus::code`])
    pub fn status_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.status.code()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::ShapeKind;

    const RED: Color = Color::rgb(200, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 200);

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(8).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(7, 0), Some(7));
        assert_eq!(board.index(0, 1), Some(8));
        assert_eq!(board.index(7, 7), Some(63));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(8, 0), None);
        assert_eq!(board.index(0, 8), None);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert_eq!(Board::new(0), Err(EngineError::InvalidBoardSize { size: 0 }));
        assert_eq!(
            Board::new(MAX_BOARD_SIZE + 1),
            Err(EngineError::InvalidBoardSize {
                size: MAX_BOARD_SIZE + 1
            })
        );
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
    }

    #[test]
    fn test_for_each_cell_row_major() {
        let board = Board::new(3).unwrap();
        let mut visited = Vec::new();
        board.for_each_cell(|x, y, _| visited.push((x, y)));
        assert_eq!(
            visited,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_place_sets_color() {
        let mut board = Board::new(8).unwrap();
        let piece = Piece::new(ShapeKind::Square2, RED);
        let placed = board.place(&piece, 2, 3).unwrap();
        assert_eq!(placed.as_slice(), &[(2, 3), (3, 3), (2, 4), (3, 4)]);
        assert_eq!(board.get(3, 4), Some(&Cell::filled(RED)));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_place_rejects_without_mutation() {
        let mut board = Board::new(4).unwrap();
        board.set(1, 0, Cell::filled(BLUE));
        let before = board.clone();

        let piece = Piece::new(ShapeKind::TrominoH, RED);
        assert_eq!(
            board.place(&piece, 0, 0),
            Err(EngineError::IllegalPlacement { x: 1, y: 0 })
        );
        assert_eq!(
            board.place(&piece, 2, 1),
            Err(EngineError::OutOfBounds { x: 4, y: 1 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_hover_preview_marks_cells() {
        let mut board = Board::new(4).unwrap();
        let piece = Piece::new(ShapeKind::DominoV, RED);
        let lines = board.update_hover_preview(&piece, 1, 1).unwrap();
        assert!(lines.is_empty());
        assert_eq!(board.get(1, 1).unwrap().status, CellStatus::HoverPreview);
        assert_eq!(board.get(1, 2).unwrap().status, CellStatus::HoverPreview);
        assert_eq!(board.get(1, 1).unwrap().color, Some(RED));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_hover_preview_marks_breaks() {
        let mut board = Board::from_rows(&["###.", "....", "....", "...."], BLUE).unwrap();
        let piece = Piece::new(ShapeKind::Mono, RED);
        let lines = board.update_hover_preview(&piece, 3, 0).unwrap();

        assert_eq!(lines.rows(), &[0]);
        assert!(lines.columns().is_empty());
        for x in 0..3 {
            let cell = board.get(x, 0).unwrap();
            assert_eq!(cell.status, CellStatus::HoverBreakOnFilled);
            assert_eq!(cell.color, Some(BLUE));
            assert_eq!(cell.break_color, Some(RED));
        }
        let covered = board.get(3, 0).unwrap();
        assert_eq!(covered.status, CellStatus::HoverBreakOnEmpty);
        assert_eq!(covered.color, Some(RED));
        assert_eq!(board.get(3, 1).unwrap().status, CellStatus::Empty);
    }

    #[test]
    fn test_break_colour_on_empty_cells_of_breaking_line() {
        let mut board = Board::from_rows(&["##..", "....", "....", "...."], BLUE).unwrap();
        let piece = Piece::new(ShapeKind::DominoH, RED);
        board.update_hover_preview(&piece, 2, 0).unwrap();

        for x in 0..4 {
            assert_eq!(board.get(x, 0).unwrap().break_color, Some(RED));
        }
        assert_eq!(board.get(2, 0).unwrap().status, CellStatus::HoverBreakOnEmpty);
        assert_eq!(board.get(2, 1).unwrap().break_color, None);

        board.clear_hover_state();
        assert!(board.cells().iter().all(|c| c.break_color.is_none()));
    }

    #[test]
    fn test_hover_preview_illegal_paints_nothing() {
        let mut board = Board::from_rows(&["#...", "....", "....", "...."], BLUE).unwrap();
        let piece = Piece::new(ShapeKind::DominoH, RED);
        board.update_hover_preview(&piece, 1, 1).unwrap();
        assert!(board.has_hover_state());

        assert!(board.update_hover_preview(&piece, 0, 0).is_none());
        assert!(!board.has_hover_state());
        assert!(board.update_hover_preview(&piece, 3, 3).is_none());
        assert!(!board.has_hover_state());
    }

    #[test]
    fn test_clear_hover_state_restores_committed() {
        let mut board = Board::from_rows(&["###.", "#...", "#...", "...."], BLUE).unwrap();
        let before = board.clone();
        let piece = Piece::new(ShapeKind::Mono, RED);

        board.update_hover_preview(&piece, 3, 0).unwrap();
        assert_ne!(board, before);
        board.clear_hover_state();
        assert_eq!(board, before);
        board.clear_hover_state();
        assert_eq!(board, before);
    }

    #[test]
    fn test_hover_cell_counts_as_empty_for_place() {
        let mut board = Board::new(4).unwrap();
        let piece = Piece::new(ShapeKind::Mono, RED);
        board.update_hover_preview(&piece, 0, 0).unwrap();
        assert!(board.is_empty_at(0, 0));
        assert!(board.place(&piece, 0, 0).is_ok());
        assert!(board.is_filled_at(0, 0));
    }

    #[test]
    fn test_status_codes() {
        let board = Board::from_rows(&["#.", ".."], RED).unwrap();
        assert_eq!(board.status_codes(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(&["#..", ".."], RED).is_err());
    }
}
