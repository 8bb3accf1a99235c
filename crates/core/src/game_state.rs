//! Game state module - one session's board, hand, dealer, and score
//!
//! [`GameState::commit`] is the only path that changes committed state, and it always runs
//! in the same order: place, resolve lines, update score, refill the hand if it is empty,
//! then check for game over. Everything that happened is buffered as [`EngineEvent`]s for
//! the caller to drain.

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::hand::Hand;
use crate::lines::{self, FullLines};
use crate::pieces::Piece;
use crate::placement::{self, SpotMap};
use crate::rng::PieceDealer;
use crate::scoring::{combo_tier, Score, ScoreKeeper, ScoreResult};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::theme::ThemeKind;
use crate::types::{EngineEvent, GameMode, GameStatus};

/// Explicit per-session context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub seed: u64,
    pub theme: ThemeKind,
}

/// Everything a caller needs to know about one committed placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub slot: usize,
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
    pub lines: FullLines,
    pub lines_broken: usize,
    pub cells_cleared: usize,
    pub score: ScoreResult,
    /// Audio tier for the combo after this placement (see [`combo_tier`])
    pub combo_tier: u8,
    pub hand_refilled: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: SessionConfig,
    board: Board,
    hand: Hand,
    dealer: PieceDealer,
    scoring: ScoreKeeper,
    status: GameStatus,
    events: Vec<EngineEvent>,
    episode_id: u32,
    placements: u32,
}

impl GameState {
    /// Start a fresh session: empty board, full hand, zero score
    pub fn new(config: SessionConfig) -> Self {
        let mode = config.mode;
        let mut dealer = PieceDealer::new(config.seed, config.theme.piece_colors());
        let hand = Hand::for_mode(&mut dealer, mode);
        Self {
            config,
            board: Board::for_mode(mode),
            hand,
            dealer,
            scoring: ScoreKeeper::new(mode.board_size(), mode.hand_size()),
            status: GameStatus::Active,
            events: Vec::new(),
            episode_id: 0,
            placements: 0,
        }
    }

    /// Build a session around an existing board and hand.
    ///
    /// Scoring uses the board's size and the hand's slot count. The status is derived
    /// from the position, so a stuck position starts as game over.
    pub fn from_parts(config: SessionConfig, board: Board, hand: Hand) -> Self {
        let scoring = ScoreKeeper::new(board.size(), hand.len());
        let status = if placement::has_any_move(&board, &hand) {
            GameStatus::Active
        } else {
            GameStatus::GameOver
        };
        Self {
            config,
            board,
            hand,
            dealer: PieceDealer::new(config.seed, config.theme.piece_colors()),
            scoring,
            status,
            events: Vec::new(),
            episode_id: 0,
            placements: 0,
        }
    }

    /// Override score, combo, and the turn counter
    pub fn with_scoring(mut self, score: Score, combo: u32, turns_since_last_clear: u32) -> Self {
        self.scoring = self
            .scoring
            .with_state(score, combo, turns_since_last_clear);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn scoring(&self) -> &ScoreKeeper {
        &self.scoring
    }

    pub fn score(&self) -> Score {
        self.scoring.score()
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo()
    }

    pub fn turns_since_last_clear(&self) -> u32 {
        self.scoring.turns_since_last_clear()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    /// Legal anchors for the piece in `slot`
    pub fn legal_spots(&self, slot: usize) -> EngineResult<SpotMap> {
        let piece = self.hand.get(slot)?;
        Ok(placement::legal_spots(&self.board, &piece))
    }

    /// Paint the hover preview for the piece in `slot` anchored at `(x, y)`.
    ///
    /// Returns the lines the drop would complete, or `None` when the spot is illegal
    /// (in which case the board carries no hover state).
    pub fn preview(&mut self, slot: usize, x: i8, y: i8) -> EngineResult<Option<FullLines>> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let piece = self.hand.get(slot)?;
        Ok(self.board.update_hover_preview(&piece, x, y))
    }

    pub fn clear_preview(&mut self) {
        self.board.clear_hover_state();
    }

    /// Whether any piece left in the hand fits anywhere
    pub fn has_any_move(&self) -> bool {
        placement::has_any_move(&self.board, &self.hand)
    }

    /// Commit the piece in `slot` at `(x, y)`.
    ///
    /// Fails without touching any state when the game is over, the slot is empty, or the
    /// placement is illegal.
    pub fn commit(&mut self, slot: usize, x: i8, y: i8) -> EngineResult<PlacementOutcome> {
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }
        let piece = self.hand.get(slot)?;
        placement::check_placement(&self.board, &piece, x, y)?;

        self.board.clear_hover_state();
        let placed = self.board.place(&piece, x, y)?;
        self.hand.take(slot)?;
        for (cx, cy) in placed {
            self.events.push(EngineEvent::CellFilled {
                x: cx,
                y: cy,
                color: piece.color,
            });
        }

        let clear = lines::resolve(&mut self.board);
        for (axis, index) in clear.lines.iter() {
            self.events.push(EngineEvent::LineResolved { axis, index });
        }
        for (cx, cy) in clear.lines.cells(self.board.size()) {
            self.events.push(EngineEvent::CellCleared { x: cx, y: cy });
        }

        let previous_combo = self.scoring.combo();
        let score = self.scoring.apply(piece.block_count(), clear.line_count());
        self.events.push(EngineEvent::ScoreChanged {
            delta: score.total.as_f64(),
            total: self.scoring.score().as_f64(),
        });
        if score.combo_broken {
            self.events.push(EngineEvent::ComboBroken {
                previous: previous_combo,
            });
        }

        let hand_refilled = self.hand.is_empty();
        if hand_refilled {
            self.hand.refill(&mut self.dealer);
            self.events.push(EngineEvent::HandRefilled {
                size: self.hand.len(),
            });
        }

        self.placements = self.placements.saturating_add(1);

        let game_over = !self.has_any_move();
        if game_over {
            self.status = GameStatus::GameOver;
            self.events.push(EngineEvent::GameOver {
                final_score: self.scoring.score().whole(),
            });
        }

        Ok(PlacementOutcome {
            slot,
            piece,
            x,
            y,
            lines_broken: clear.line_count(),
            cells_cleared: clear.cells_cleared,
            lines: clear.lines,
            score,
            combo_tier: combo_tier(score.combo),
            hand_refilled,
            game_over,
        })
    }

    /// Drain buffered events, oldest first
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a new episode with the same configuration.
    ///
    /// The dealer keeps its stream, so the new episode is dealt fresh pieces rather than
    /// replaying the previous ones.
    pub fn restart(&mut self) {
        let mode = self.config.mode;
        self.board = Board::for_mode(mode);
        self.hand = Hand::for_mode(&mut self.dealer, mode);
        self.scoring = ScoreKeeper::new(mode.board_size(), mode.hand_size());
        self.status = GameStatus::Active;
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.placements = 0;
    }

    /// Switch palettes. Pieces already dealt keep their colours
    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.config.theme = theme;
        self.dealer.set_palette(theme.piece_colors());
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.mode = self.config.mode;
        out.board_size = self.board.size();
        out.board.clear();
        out.board
            .extend(self.board.cells().iter().map(|c| c.status.code()));
        out.colors.clear();
        out.colors.extend(self.board.cells().iter().map(|c| c.color));
        out.hand.clear();
        out.hand
            .extend(self.hand.slots().iter().map(|s| s.map(PieceSnapshot::from)));
        out.score = self.scoring.score().as_f64();
        out.combo = self.scoring.combo();
        out.turns_since_last_clear = self.scoring.turns_since_last_clear();
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.placements = self.placements;
        out.seed = self.config.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
