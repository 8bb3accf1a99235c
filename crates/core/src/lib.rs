//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and placement logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical hands (for replays and tests)
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run behind any presentation layer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: N×N grid with committed fills and transient hover statuses
//! - [`pieces`]: Fixed shape catalog (no rotation; each orientation is its own shape)
//! - [`rng`]: Seeded piece dealer (uniform shape, uniform palette colour)
//! - [`theme`]: The five piece palettes
//! - [`hand`]: Slots of pieces waiting to be placed
//! - [`placement`]: Legality checks and legal-anchor maps
//! - [`lines`]: Full row/column detection and clearing
//! - [`scoring`]: Placement points, line bonus, combo streak
//! - [`game_state`]: One session, with the commit pipeline and event buffer
//! - [`snapshot`]: Plain-data view of a session
//!
//! # Game Rules
//!
//! - **Modes**: Normal is an 8×8 board with 3-piece hands, Chaos is 10×10 with 5
//! - **Placement**: Every block of a piece must land on an empty in-bounds cell
//! - **Lines**: Full rows and full columns are cleared together, once per placement
//! - **Scoring**: Block count per placement, plus `lines * size * (combo / 2) * blocks`
//! - **Combo**: Grows by the lines broken; resets after a full hand without a clear
//! - **Game Over**: No piece left in the hand fits anywhere
//!
//! # Example
//!
//! ```
//! use block_grid_core::{GameState, SessionConfig};
//!
//! let mut game = GameState::new(SessionConfig::default());
//!
//! // Find where the first piece fits and drop it on the first legal anchor
//! let spots = game.legal_spots(0).unwrap();
//! let (x, y) = spots.iter().next().unwrap();
//! let outcome = game.commit(0, x as i8, y as i8).unwrap();
//!
//! assert!(outcome.score.total.whole() > 0);
//! assert!(!game.take_events().is_empty());
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod hand;
pub mod lines;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod theme;

pub use block_grid_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use error::{EngineError, EngineResult};
pub use game_state::{GameState, PlacementOutcome, SessionConfig};
pub use hand::Hand;
pub use lines::{find_full_lines, resolve, FullLines, LineClear};
pub use pieces::{Piece, ShapeKind};
pub use placement::{check_placement, has_any_legal_spot, has_any_move, is_legal, legal_spots, SpotMap};
pub use rng::PieceDealer;
pub use scoring::{combo_tier, Score, ScoreKeeper, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use theme::{Palette, ThemeKind};
