//! Scoring module - placement points, line bonus, and the combo streak
//!
//! Per committed placement:
//! - `score += block_count`, always.
//! - On a clear: `combo += lines`, the turn counter resets, and
//!   `score += lines * board_size * (combo / 2) * block_count`.
//! - Without a clear: the turn counter increments, and once it reaches the hand size the
//!   combo drops back to zero.
//!
//! `combo / 2` is not floored, so the bonus can land on a half point with odd board sizes.
//! Scores are therefore kept in half-point units internally, which keeps them exact.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Exact score, stored as a count of half points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score {
    halves: u64,
}

impl Score {
    pub const ZERO: Score = Score { halves: 0 };

    pub fn from_points(points: u64) -> Self {
        Self {
            halves: points.saturating_mul(2),
        }
    }

    pub fn from_halves(halves: u64) -> Self {
        Self { halves }
    }

    pub fn halves(&self) -> u64 {
        self.halves
    }

    pub fn as_f64(&self) -> f64 {
        self.halves as f64 / 2.0
    }

    /// Whole points, rounded down (the value shown on the game-over screen)
    pub fn whole(&self) -> u64 {
        self.halves / 2
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            halves: self.halves.saturating_add(rhs.halves),
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.halves % 2 == 0 {
            write!(f, "{}", self.halves / 2)
        } else {
            write!(f, "{}.5", self.halves / 2)
        }
    }
}

/// Base reward for placing a piece
pub fn placement_points(block_count: usize) -> Score {
    Score::from_points(block_count as u64)
}

/// Line-clear bonus: `lines * board_size * (combo / 2) * block_count`
///
/// `combo` is the streak after this clear has been added to it.
pub fn line_bonus(lines: usize, board_size: u8, combo: u32, block_count: usize) -> Score {
    let halves = (lines as u64)
        .saturating_mul(board_size as u64)
        .saturating_mul(combo as u64)
        .saturating_mul(block_count as u64);
    Score::from_halves(halves)
}

/// Audio tier for a combo count: 2..=5 for streaks of 2, 3, 4, and 5+, else 1
pub fn combo_tier(combo: u32) -> u8 {
    match combo {
        0 | 1 => 1,
        2..=4 => combo as u8,
        _ => 5,
    }
}

/// Score calculation result for one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub base: Score,
    pub bonus: Score,
    pub total: Score,
    /// Combo after this placement
    pub combo: u32,
    /// The streak was non-zero and has just been reset
    pub combo_broken: bool,
}

/// Score/combo state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeeper {
    board_size: u8,
    hand_size: usize,
    score: Score,
    combo: u32,
    turns_since_last_clear: u32,
}

impl ScoreKeeper {
    pub fn new(board_size: u8, hand_size: usize) -> Self {
        Self {
            board_size,
            hand_size,
            score: Score::ZERO,
            combo: 0,
            turns_since_last_clear: 0,
        }
    }

    /// Start from an existing state (restores and scripted scenarios)
    pub fn with_state(mut self, score: Score, combo: u32, turns_since_last_clear: u32) -> Self {
        self.score = score;
        self.combo = combo;
        self.turns_since_last_clear = turns_since_last_clear;
        self
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn turns_since_last_clear(&self) -> u32 {
        self.turns_since_last_clear
    }

    /// Apply one committed placement
    pub fn apply(&mut self, block_count: usize, lines_broken: usize) -> ScoreResult {
        let base = placement_points(block_count);
        let mut bonus = Score::ZERO;
        let mut combo_broken = false;

        if lines_broken > 0 {
            self.turns_since_last_clear = 0;
            self.combo = self.combo.saturating_add(lines_broken as u32);
            bonus = line_bonus(lines_broken, self.board_size, self.combo, block_count);
        } else {
            self.turns_since_last_clear = self.turns_since_last_clear.saturating_add(1);
            if self.turns_since_last_clear as usize >= self.hand_size {
                combo_broken = self.combo > 0;
                self.combo = 0;
            }
        }

        let total = base + bonus;
        self.score += total;

        ScoreResult {
            base,
            bonus,
            total,
            combo: self.combo,
            combo_broken,
        }
    }
}
