//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, drag controller, JSON adapter).
//!
//! # Board and Hand Dimensions
//!
//! | Mode | Board | Hand |
//! |------|-------|------|
//! | `Normal` | 8x8 | 3 pieces |
//! | `Chaos` | 10x10 | 5 pieces |
//!
//! Coordinates are `(x, y)` with `x` growing left to right and `y` growing top to bottom.
//! Cells are stored row-major.
//!
//! # Examples
//!
//! ```
//! use block_grid_types::{CellStatus, Color, GameMode};
//!
//! let mode = GameMode::from_str("chaos").unwrap();
//! assert_eq!(mode.board_size(), 10);
//! assert_eq!(mode.hand_size(), 5);
//!
//! assert!(CellStatus::HoverBreakOnFilled.is_filled());
//! assert!(!CellStatus::HoverPreview.is_filled());
//!
//! let orange = Color::rgb(227, 143, 16);
//! assert_eq!(orange.to_hex(), "#e38f10");
//! ```

/// Board side length in normal mode
pub const NORMAL_BOARD_SIZE: u8 = 8;

/// Board side length in chaos mode
pub const CHAOS_BOARD_SIZE: u8 = 10;

/// Largest supported board side length
pub const MAX_BOARD_SIZE: u8 = 16;

/// Hand size in normal mode
pub const NORMAL_HAND_SIZE: usize = 3;

/// Hand size in chaos mode
pub const CHAOS_HAND_SIZE: usize = 5;

/// Largest supported hand size
pub const MAX_HAND_SIZE: usize = 8;

/// Game modes
///
/// The mode fixes both the board side length and the number of pieces per hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Normal,
    Chaos,
}

impl GameMode {
    /// Board side length for this mode
    pub fn board_size(&self) -> u8 {
        match self {
            GameMode::Normal => NORMAL_BOARD_SIZE,
            GameMode::Chaos => CHAOS_BOARD_SIZE,
        }
    }

    /// Number of pieces dealt per hand for this mode
    pub fn hand_size(&self) -> usize {
        match self {
            GameMode::Normal => NORMAL_HAND_SIZE,
            GameMode::Chaos => CHAOS_HAND_SIZE,
        }
    }

    /// Parse mode from string (case-insensitive)
    ///
    /// ```
    /// use block_grid_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("Normal"), Some(GameMode::Normal));
    /// assert_eq!(GameMode::from_str("CHAOS"), Some(GameMode::Chaos));
    /// assert_eq!(GameMode::from_str("zen"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(GameMode::Normal),
            "chaos" => Some(GameMode::Chaos),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::Chaos => "chaos",
        }
    }
}

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Per-cell status
///
/// `Empty` and `Filled` are committed game state. The three hover statuses are transient
/// preview state layered on top of it by a drag in progress:
///
/// - **HoverPreview**: empty cell the dragged piece would cover
/// - **HoverBreakOnEmpty**: empty cell the piece would cover, inside a line that would clear
/// - **HoverBreakOnFilled**: filled cell inside a line that would clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    Filled,
    HoverPreview,
    HoverBreakOnEmpty,
    HoverBreakOnFilled,
}

impl CellStatus {
    /// Whether the underlying committed state is filled, ignoring hover flags
    pub fn is_filled(&self) -> bool {
        matches!(self, CellStatus::Filled | CellStatus::HoverBreakOnFilled)
    }

    /// Whether this is one of the transient hover statuses
    pub fn is_hover(&self) -> bool {
        matches!(
            self,
            CellStatus::HoverPreview | CellStatus::HoverBreakOnEmpty | CellStatus::HoverBreakOnFilled
        )
    }

    /// The committed status this cell reverts to once hover state is cleared
    pub fn committed(&self) -> Self {
        if self.is_filled() {
            CellStatus::Filled
        } else {
            CellStatus::Empty
        }
    }

    /// Stable numeric code used by snapshots and the JSON adapter
    pub fn code(&self) -> u8 {
        match self {
            CellStatus::Empty => 0,
            CellStatus::Filled => 1,
            CellStatus::HoverPreview => 2,
            CellStatus::HoverBreakOnEmpty => 3,
            CellStatus::HoverBreakOnFilled => 4,
        }
    }
}

/// Orientation of a cleared line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAxis {
    Row,
    Column,
}

impl LineAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineAxis::Row => "row",
            LineAxis::Column => "column",
        }
    }
}

/// Lifecycle state of a game session
///
/// `Active` is initial. `GameOver` is terminal and one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Active,
    GameOver,
}

/// Core-side event emitted while committing a placement.
///
/// Events are buffered by the game state and drained by observers, so presentation
/// (animation, audio) never has to diff boards to find out what happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// A cell became filled by a committed piece
    CellFilled { x: u8, y: u8, color: Color },
    /// A filled cell was emptied by a line clear
    CellCleared { x: u8, y: u8 },
    /// A full row or column was resolved
    LineResolved { axis: LineAxis, index: u8 },
    /// Score changed after a placement; `total` is the new running score
    ScoreChanged { delta: f64, total: f64 },
    /// The combo streak was reset after a full hand cycle without a clear
    ComboBroken { previous: u32 },
    /// Every slot was empty and the hand was dealt again
    HandRefilled { size: usize },
    /// No piece in the hand fits anywhere
    GameOver { final_score: u64 },
}
