//! Engine error taxonomy
//!
//! Every variant is a caller contract violation rather than a transient fault, so nothing
//! here is ever retried. A correct presentation layer validates with the placement
//! validator first and never sees these.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An offset cell resolved outside `[0, N)`
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i16, y: i16 },
    /// An offset cell is already filled
    #[error("cell ({x}, {y}) is already filled")]
    IllegalPlacement { x: i16, y: i16 },
    #[error("hand slot {slot} is empty")]
    EmptyHandSlot { slot: usize },
    #[error("hand slot {slot} does not exist (hand has {len} slots)")]
    SlotOutOfRange { slot: usize, len: usize },
    #[error("unsupported board size {size}")]
    InvalidBoardSize { size: u8 },
    #[error("unsupported hand size {size}")]
    InvalidHandSize { size: usize },
    #[error("game is over")]
    GameOver,
}

pub type EngineResult<T> = Result<T, EngineError>;
