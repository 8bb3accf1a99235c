//! Line resolver - full row/column detection and clearing
//!
//! Rows and columns are detected independently in a single pass and cleared together.
//! Clearing never cascades: a resolve call scans once, empties what it found, and stops.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{LineAxis, MAX_BOARD_SIZE};

const MAX_LINES: usize = MAX_BOARD_SIZE as usize;

/// Indices of full rows and full columns found in one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullLines {
    rows: ArrayVec<u8, MAX_LINES>,
    columns: ArrayVec<u8, MAX_LINES>,
}

impl FullLines {
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    /// Rows plus columns; an intersecting row and column count as two
    pub fn count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Whether `(x, y)` lies in any of the lines
    pub fn contains(&self, x: u8, y: u8) -> bool {
        self.rows.contains(&y) || self.columns.contains(&x)
    }

    /// Every line as `(axis, index)`, rows first
    pub fn iter(&self) -> impl Iterator<Item = (LineAxis, u8)> + '_ {
        self.rows
            .iter()
            .map(|&y| (LineAxis::Row, y))
            .chain(self.columns.iter().map(|&x| (LineAxis::Column, x)))
    }

    /// Every cell covered by the lines, each exactly once, in row-major order
    pub fn cells(&self, size: u8) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.contains(x, y))
    }
}

/// Find full lines of an `size`×`size` grid under an arbitrary occupancy predicate.
///
/// The hover preview uses this to ask "what would be full if this piece landed here"
/// without touching committed state.
pub fn full_lines_where<F: Fn(u8, u8) -> bool>(size: u8, occupied: F) -> FullLines {
    let mut lines = FullLines::default();
    for y in 0..size {
        if (0..size).all(|x| occupied(x, y)) {
            lines.rows.push(y);
        }
    }
    for x in 0..size {
        if (0..size).all(|y| occupied(x, y)) {
            lines.columns.push(x);
        }
    }
    lines
}

/// Full rows and columns of committed fills (hover flags ignored)
pub fn find_full_lines(board: &Board) -> FullLines {
    full_lines_where(board.size(), |x, y| board.filled_unchecked(x, y))
}

/// Result of one resolve pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    pub lines: FullLines,
    /// Distinct cells emptied; intersections are counted once
    pub cells_cleared: usize,
}

impl LineClear {
    /// Number of lines broken, rows plus columns
    pub fn line_count(&self) -> usize {
        self.lines.count()
    }
}

/// Detect every full row and column, then empty all of their cells at once
pub fn resolve(board: &mut Board) -> LineClear {
    let lines = find_full_lines(board);
    if lines.is_empty() {
        return LineClear::default();
    }

    let size = board.size();
    let mut cells_cleared = 0;
    for (x, y) in lines.cells(size) {
        board.clear_cell(x, y);
        cells_cleared += 1;
    }

    LineClear {
        lines,
        cells_cleared,
    }
}
