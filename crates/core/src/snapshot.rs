use crate::pieces::{Piece, ShapeKind};
use crate::types::{Color, GameMode, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub block_count: u8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            block_count: value.block_count() as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub board_size: u8,
    /// Row-major status codes (`CellStatus::code`)
    pub board: Vec<u8>,
    /// Row-major colour of each cell, `None` when empty
    pub colors: Vec<Option<Color>>,
    pub hand: Vec<Option<PieceSnapshot>>,
    pub score: f64,
    pub combo: u32,
    pub turns_since_last_clear: u32,
    pub status: GameStatus,
    pub episode_id: u32,
    pub placements: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Status code at `(x, y)`, `None` outside the board
    pub fn code_at(&self, x: u8, y: u8) -> Option<u8> {
        if x >= self.board_size || y >= self.board_size {
            return None;
        }
        self.board
            .get(y as usize * self.board_size as usize + x as usize)
            .copied()
    }
}
