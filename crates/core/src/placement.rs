//! Placement validator
//!
//! A placement is legal when every offset cell of the piece lands inside the board on a
//! cell that is not committed as filled. Hover statuses are ignored: a cell showing a
//! preview is still empty as far as legality goes.
//!
//! `legal_spots` is the per-drag-tick path, so every anchor check bails out on the first
//! blocked offset.

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::hand::Hand;
use crate::pieces::Piece;

/// Whether `piece` anchored at `(x, y)` fits
pub fn is_legal(board: &Board, piece: &Piece, x: i8, y: i8) -> bool {
    piece.cells_at(x, y).all(|(cx, cy)| board.is_open(cx, cy))
}

/// Like [`is_legal`], but says why a placement is rejected.
///
/// Bounds are checked for every cell before overlap, so a piece that is both off the
/// board and overlapping reports `OutOfBounds`.
pub fn check_placement(board: &Board, piece: &Piece, x: i8, y: i8) -> EngineResult<()> {
    if let Some((cx, cy)) = piece
        .cells_at(x, y)
        .find(|&(cx, cy)| board.index(cx, cy).is_none())
    {
        return Err(EngineError::OutOfBounds { x: cx, y: cy });
    }
    if let Some((cx, cy)) = piece.cells_at(x, y).find(|&(cx, cy)| !board.is_open(cx, cy)) {
        return Err(EngineError::IllegalPlacement { x: cx, y: cy });
    }
    Ok(())
}

/// N×N map of legal anchors for one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotMap {
    size: u8,
    spots: Vec<bool>,
}

impl SpotMap {
    /// A map with no legal anchors (no piece held)
    pub fn empty(size: u8) -> Self {
        Self {
            size,
            spots: vec![false; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `(x, y)` is a legal anchor; false outside the board
    pub fn get(&self, x: i8, y: i8) -> bool {
        let n = self.size as i8;
        if x < 0 || x >= n || y < 0 || y >= n {
            return false;
        }
        self.spots[y as usize * self.size as usize + x as usize]
    }

    /// Number of legal anchors
    pub fn count(&self) -> usize {
        self.spots.iter().filter(|&&s| s).count()
    }

    pub fn any(&self) -> bool {
        self.spots.iter().any(|&s| s)
    }

    /// Legal anchors in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let n = self.size as usize;
        self.spots
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(move |(idx, _)| ((idx % n) as u8, (idx / n) as u8))
    }

    /// Rows of booleans, indexed `[y][x]`
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.spots
            .chunks(self.size as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Evaluate [`is_legal`] for every anchor of the board
pub fn legal_spots(board: &Board, piece: &Piece) -> SpotMap {
    let n = board.size();
    let mut map = SpotMap::empty(n);
    for y in 0..n {
        for x in 0..n {
            map.spots[y as usize * n as usize + x as usize] =
                is_legal(board, piece, x as i8, y as i8);
        }
    }
    map
}

/// Whether `piece` fits anywhere; stops at the first legal anchor
pub fn has_any_legal_spot(board: &Board, piece: &Piece) -> bool {
    let n = board.size() as i8;
    (0..n).any(|y| (0..n).any(|x| is_legal(board, piece, x, y)))
}

/// Whether any occupied hand slot fits anywhere. False means game over
pub fn has_any_move(board: &Board, hand: &Hand) -> bool {
    hand.occupied().any(|(_, piece)| has_any_legal_spot(board, piece))
}
