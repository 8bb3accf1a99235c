//! Drag-and-drop session controller
//!
//! Drives a [`GameState`] the way a pointer-driven presentation layer does:
//!
//! 1. `begin_drag(slot)` computes the legal-spot map for the held piece
//! 2. `drag_over(Some((x, y)))` repaints the hover preview; `drag_over(None)` clears it
//! 3. `drop_at(target)` commits on a legal target, otherwise counts a missed drop
//!
//! The session also owns the score record lifecycle: one record per episode, updated
//! after every commit.

use thiserror::Error;

use crate::core::{
    EngineError, FullLines, GameState, PlacementOutcome, SessionConfig, SpotMap, ThemeKind,
};
use crate::recorder::{RecordError, RecordId, ScoreRecord, ScoreRecorder};
use crate::types::EngineEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("game is not playable")]
    NotPlayable,
    #[error("no drag in progress")]
    NoDrag,
    #[error(transparent)]
    Engine(EngineError),
}

impl From<EngineError> for DragError {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::GameOver => DragError::NotPlayable,
            other => DragError::Engine(other),
        }
    }
}

impl DragError {
    /// Stable error code for the wire protocol
    pub fn code(self) -> &'static str {
        match self {
            DragError::NotPlayable => "not_playable",
            DragError::NoDrag => "no_drag",
            DragError::Engine(e) => match e {
                EngineError::OutOfBounds { .. } | EngineError::IllegalPlacement { .. } => {
                    "invalid_place"
                }
                EngineError::EmptyHandSlot { .. } | EngineError::SlotOutOfRange { .. } => {
                    "invalid_slot"
                }
                EngineError::InvalidBoardSize { .. } | EngineError::InvalidHandSize { .. } => {
                    "invalid_config"
                }
                EngineError::GameOver => "not_playable",
            },
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DragError::NotPlayable => "game is not playable",
            DragError::NoDrag => "no drag in progress",
            DragError::Engine(e) => match e {
                EngineError::OutOfBounds { .. } => "target would place piece out of bounds",
                EngineError::IllegalPlacement { .. } => "target overlaps a filled cell",
                EngineError::EmptyHandSlot { .. } => "hand slot is empty",
                EngineError::SlotOutOfRange { .. } => "hand slot does not exist",
                EngineError::InvalidBoardSize { .. } => "unsupported board size",
                EngineError::InvalidHandSize { .. } => "unsupported hand size",
                EngineError::GameOver => "game is not playable",
            },
        }
    }
}

/// The piece being dragged and where it currently hovers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub slot: usize,
    pub spots: SpotMap,
    pub target: Option<(i8, i8)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Placed(PlacementOutcome),
    /// Released off the grid or on an illegal anchor; nothing was committed
    Missed,
}

pub struct Session<R: ScoreRecorder> {
    game: GameState,
    recorder: R,
    record_id: Option<RecordId>,
    drag: Option<DragState>,
    missed_drops: u32,
    record_error: Option<RecordError>,
}

impl<R: ScoreRecorder> Session<R> {
    pub fn new(config: SessionConfig, recorder: R) -> Self {
        Self::from_game(GameState::new(config), recorder)
    }

    /// Wrap an existing game and open a score record for it
    pub fn from_game(game: GameState, recorder: R) -> Self {
        let mut session = Self {
            game,
            recorder,
            record_id: None,
            drag: None,
            missed_drops: 0,
            record_error: None,
        };
        session.open_record();
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn missed_drops(&self) -> u32 {
        self.missed_drops
    }

    /// Pick up the piece in `slot`.
    ///
    /// An empty or missing slot is rejected and leaves any drag in progress untouched.
    pub fn begin_drag(&mut self, slot: usize) -> Result<&SpotMap, DragError> {
        if self.game.is_game_over() {
            return Err(DragError::NotPlayable);
        }
        let spots = self.game.legal_spots(slot)?;
        self.game.clear_preview();
        let drag = self.drag.insert(DragState {
            slot,
            spots,
            target: None,
        });
        Ok(&drag.spots)
    }

    /// Move the dragged piece over `target`, or off the grid with `None`.
    ///
    /// Returns the lines a drop here would complete; `None` when the target is off the
    /// grid or not a legal anchor.
    pub fn drag_over(&mut self, target: Option<(i8, i8)>) -> Result<Option<FullLines>, DragError> {
        let drag = self.drag.as_mut().ok_or(DragError::NoDrag)?;
        drag.target = target;
        self.game.clear_preview();

        match target {
            Some((x, y)) if drag.spots.get(x, y) => Ok(self.game.preview(drag.slot, x, y)?),
            _ => Ok(None),
        }
    }

    /// Release the dragged piece at `target`
    pub fn drop_at(&mut self, target: Option<(i8, i8)>) -> Result<DropOutcome, DragError> {
        let drag = self.drag.take().ok_or(DragError::NoDrag)?;

        match target {
            Some((x, y)) if drag.spots.get(x, y) => {
                let outcome = self.commit(drag.slot, x, y)?;
                Ok(DropOutcome::Placed(outcome))
            }
            _ => {
                self.game.clear_preview();
                self.missed_drops = self.missed_drops.saturating_add(1);
                Ok(DropOutcome::Missed)
            }
        }
    }

    /// Drop any drag state and its preview
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.game.clear_preview();
    }

    /// Commit directly, without a drag. Cancels any drag in progress
    pub fn place(&mut self, slot: usize, x: i8, y: i8) -> Result<PlacementOutcome, DragError> {
        self.cancel_drag();
        self.commit(slot, x, y)
    }

    /// New episode, same configuration, fresh score record
    pub fn restart(&mut self) {
        self.drag = None;
        self.missed_drops = 0;
        self.game.restart();
        self.open_record();
    }

    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.game.set_theme(theme);
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.game.take_events()
    }

    /// Last score recorder failure, if any. Recorder failures never interrupt play
    pub fn take_record_error(&mut self) -> Option<RecordError> {
        self.record_error.take()
    }

    fn commit(&mut self, slot: usize, x: i8, y: i8) -> Result<PlacementOutcome, DragError> {
        let outcome = self.game.commit(slot, x, y)?;
        self.update_record();
        Ok(outcome)
    }

    fn current_record(&self) -> ScoreRecord {
        ScoreRecord::now(self.game.score().as_f64(), self.game.mode())
    }

    fn open_record(&mut self) {
        let record = self.current_record();
        match self.recorder.create(&record) {
            Ok(id) => self.record_id = Some(id),
            Err(e) => {
                self.record_id = None;
                self.record_error = Some(e);
            }
        }
    }

    fn update_record(&mut self) {
        let Some(id) = self.record_id else {
            return;
        };
        let record = self.current_record();
        if let Err(e) = self.recorder.update(id, &record) {
            self.record_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Hand, Piece, ShapeKind};
    use crate::recorder::MemoryRecorder;
    use crate::types::{CellStatus, Color};

    const C: Color = Color::rgb(1, 2, 3);

    fn session(rows: &[&str], slots: &[Option<Piece>]) -> Session<MemoryRecorder> {
        let board = Board::from_rows(rows, C).unwrap();
        let hand = Hand::from_slots(slots).unwrap();
        let game = GameState::from_parts(SessionConfig::default(), board, hand);
        Session::from_game(game, MemoryRecorder::new())
    }

    fn piece(kind: ShapeKind) -> Option<Piece> {
        Some(Piece::new(kind, C))
    }

    #[test]
    fn test_session_opens_record() {
        let s = Session::new(SessionConfig::default(), MemoryRecorder::new());
        assert_eq!(s.record_id(), Some(0));
        assert_eq!(s.recorder().records().len(), 1);
        assert_eq!(s.recorder().records()[0].score, 0.0);
    }

    #[test]
    fn test_begin_drag_computes_spots() {
        let mut s = session(
            &["....", "....", "....", "...."],
            &[piece(ShapeKind::Square3), None],
        );
        let spots = s.begin_drag(0).unwrap();
        assert_eq!(spots.count(), 4);
        assert_eq!(s.drag().map(|d| d.slot), Some(0));
    }

    #[test]
    fn test_begin_drag_on_empty_slot_is_rejected() {
        let mut s = session(&["....", "....", "....", "...."], &[piece(ShapeKind::Mono), None]);
        assert_eq!(
            s.begin_drag(1).unwrap_err(),
            DragError::Engine(EngineError::EmptyHandSlot { slot: 1 })
        );
        assert!(s.drag().is_none());
    }

    #[test]
    fn test_drag_over_paints_and_clears_preview() {
        let mut s = session(&["###.", "....", "....", "...."], &[piece(ShapeKind::Mono), None]);
        s.begin_drag(0).unwrap();

        let lines = s.drag_over(Some((3, 0))).unwrap().unwrap();
        assert_eq!(lines.rows(), &[0]);
        let cell = s.game().board().get(0, 0).unwrap();
        assert_eq!(cell.status, CellStatus::HoverBreakOnFilled);

        // Illegal anchor: nothing painted
        assert_eq!(s.drag_over(Some((0, 0))).unwrap(), None);
        assert!(!s.game().board().has_hover_state());

        s.drag_over(Some((1, 2))).unwrap();
        assert!(s.game().board().has_hover_state());
        assert_eq!(s.drag_over(None).unwrap(), None);
        assert!(!s.game().board().has_hover_state());
    }

    #[test]
    fn test_drop_on_legal_target_commits_and_records() {
        let mut s = session(
            &["###.", "....", "....", "...."],
            &[piece(ShapeKind::Mono), piece(ShapeKind::Mono)],
        );
        s.begin_drag(0).unwrap();
        s.drag_over(Some((3, 0))).unwrap();

        let outcome = s.drop_at(Some((3, 0))).unwrap();
        let DropOutcome::Placed(placed) = outcome else {
            panic!("expected a placement");
        };
        assert_eq!(placed.lines_broken, 1);
        assert!(s.drag().is_none());
        assert!(!s.game().board().has_hover_state());
        assert_eq!(s.recorder().records()[0].score, 3.0);
    }

    #[test]
    fn test_drop_off_grid_is_missed() {
        let mut s = session(&["....", "....", "....", "...."], &[piece(ShapeKind::Mono), None]);
        s.begin_drag(0).unwrap();
        s.drag_over(Some((1, 1))).unwrap();

        assert_eq!(s.drop_at(None).unwrap(), DropOutcome::Missed);
        assert_eq!(s.missed_drops(), 1);
        assert!(!s.game().board().has_hover_state());
        assert_eq!(s.game().board().filled_count(), 0);
        assert!(s.game().hand().get(0).is_ok());

        s.begin_drag(0).unwrap();
        assert_eq!(s.drop_at(Some((9, 9))).unwrap(), DropOutcome::Missed);
        assert_eq!(s.missed_drops(), 2);
    }

    #[test]
    fn test_drop_without_drag() {
        let mut s = session(&["....", "....", "....", "...."], &[piece(ShapeKind::Mono)]);
        assert_eq!(s.drop_at(Some((0, 0))).unwrap_err(), DragError::NoDrag);
        assert_eq!(s.drag_over(Some((0, 0))).unwrap_err(), DragError::NoDrag);
    }

    #[test]
    fn test_cancel_drag() {
        let mut s = session(&["....", "....", "....", "...."], &[piece(ShapeKind::Mono)]);
        s.begin_drag(0).unwrap();
        s.drag_over(Some((2, 2))).unwrap();
        s.cancel_drag();
        assert!(s.drag().is_none());
        assert!(!s.game().board().has_hover_state());
    }

    #[test]
    fn test_game_over_blocks_drag() {
        let mut s = session(
            &["....", ".#..", "....", "...."],
            &[piece(ShapeKind::Mono), piece(ShapeKind::Square3)],
        );
        let outcome = s.place(0, 3, 3).unwrap();
        assert!(outcome.game_over);
        assert_eq!(s.begin_drag(1).unwrap_err(), DragError::NotPlayable);
        assert_eq!(s.place(1, 0, 0).unwrap_err(), DragError::NotPlayable);
    }

    #[test]
    fn test_restart_opens_new_record() {
        let mut s = Session::new(SessionConfig::default(), MemoryRecorder::new());
        s.restart();
        assert_eq!(s.record_id(), Some(1));
        assert_eq!(s.recorder().records().len(), 2);
        assert_eq!(s.game().episode_id(), 1);
    }

    #[test]
    fn test_error_codes() {
        let oob = DragError::from(EngineError::OutOfBounds { x: 9, y: 0 });
        assert_eq!(oob.code(), "invalid_place");
        assert_eq!(DragError::from(EngineError::GameOver), DragError::NotPlayable);
        assert_eq!(
            DragError::from(EngineError::EmptyHandSlot { slot: 0 }).code(),
            "invalid_slot"
        );
        assert_eq!(DragError::NoDrag.message(), "no drag in progress");
    }
}
