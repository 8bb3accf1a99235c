//! Game flow tests - commit pipeline, events, refill, game over, restart

use block_grid::core::{Board, EngineError, GameState, Hand, Piece, SessionConfig, ShapeKind};
use block_grid::types::{CellStatus, Color, EngineEvent, GameMode, GameStatus, LineAxis};

const C: Color = Color::rgb(50, 60, 70);

fn mono() -> Option<Piece> {
    Some(Piece::new(ShapeKind::Mono, C))
}

fn scripted(rows: &[&str], slots: &[Option<Piece>]) -> GameState {
    let board = Board::from_rows(rows, C).unwrap();
    let hand = Hand::from_slots(slots).unwrap();
    GameState::from_parts(SessionConfig::default(), board, hand)
}

#[test]
fn test_new_game_is_ready() {
    let game = GameState::new(SessionConfig {
        mode: GameMode::Chaos,
        seed: 3,
        ..SessionConfig::default()
    });
    assert_eq!(game.board().size(), 10);
    assert_eq!(game.hand().len(), 5);
    assert_eq!(game.hand().occupied_count(), 5);
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.score().as_f64(), 0.0);
}

#[test]
fn test_same_seed_deals_same_hand() {
    let config = SessionConfig {
        seed: 1234,
        ..SessionConfig::default()
    };
    let a = GameState::new(config);
    let b = GameState::new(config);
    assert_eq!(a.hand(), b.hand());
}

#[test]
fn test_commit_with_line_clear_emits_ordered_events() {
    let mut game = scripted(&["###.", "....", "....", "...."], &[mono(), mono()]);
    let outcome = game.commit(0, 3, 0).unwrap();

    assert_eq!(outcome.lines.rows(), &[0]);
    assert_eq!(outcome.lines_broken, 1);
    assert_eq!(outcome.cells_cleared, 4);
    // 1 block + 1 line * 4 * (1 / 2) * 1
    assert_eq!(outcome.score.total.as_f64(), 3.0);
    assert!(!outcome.hand_refilled);
    assert!(!outcome.game_over);

    let events = game.take_events();
    assert_eq!(
        events,
        vec![
            EngineEvent::CellFilled { x: 3, y: 0, color: C },
            EngineEvent::LineResolved {
                axis: LineAxis::Row,
                index: 0
            },
            EngineEvent::CellCleared { x: 0, y: 0 },
            EngineEvent::CellCleared { x: 1, y: 0 },
            EngineEvent::CellCleared { x: 2, y: 0 },
            EngineEvent::CellCleared { x: 3, y: 0 },
            EngineEvent::ScoreChanged {
                delta: 3.0,
                total: 3.0
            },
        ]
    );
    assert!(game.take_events().is_empty());
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.placements(), 1);
}

#[test]
fn test_rejected_commit_changes_nothing() {
    let mut game = scripted(&["#...", "....", "....", "...."], &[mono(), None]);
    let before = game.snapshot();

    assert_eq!(
        game.commit(0, 0, 0),
        Err(EngineError::IllegalPlacement { x: 0, y: 0 })
    );
    assert_eq!(game.commit(1, 1, 1), Err(EngineError::EmptyHandSlot { slot: 1 }));
    assert!(matches!(
        game.commit(2, 1, 1),
        Err(EngineError::SlotOutOfRange { slot: 2, len: 2 })
    ));
    assert_eq!(game.snapshot(), before);
    assert!(game.take_events().is_empty());
}

#[test]
fn test_last_piece_triggers_refill() {
    let mut game = scripted(&["....", "....", "....", "...."], &[mono(), None]);
    let outcome = game.commit(0, 0, 0).unwrap();

    assert!(outcome.hand_refilled);
    assert_eq!(game.hand().occupied_count(), 2);
    assert!(game
        .take_events()
        .contains(&EngineEvent::HandRefilled { size: 2 }));
}

#[test]
fn test_game_over_when_nothing_fits() {
    let mut game = scripted(
        &["#.#", "...", "#.#"],
        &[mono(), Some(Piece::new(ShapeKind::Square2, C))],
    );
    assert_eq!(game.status(), GameStatus::Active);

    let outcome = game.commit(0, 1, 1).unwrap();
    assert!(outcome.game_over);
    assert!(game.is_game_over());
    assert_eq!(
        game.take_events().last(),
        Some(&EngineEvent::GameOver { final_score: 1 })
    );

    assert_eq!(game.commit(1, 0, 0), Err(EngineError::GameOver));
    assert_eq!(game.preview(1, 0, 0), Err(EngineError::GameOver));
}

#[test]
fn test_stuck_start_is_game_over() {
    let game = scripted(&["#.", ".#"], &[Some(Piece::new(ShapeKind::Square2, C))]);
    assert!(game.is_game_over());
}

#[test]
fn test_preview_then_commit_leaves_no_hover() {
    let mut game = scripted(&["##..", "....", "....", "...."], &[mono(), mono()]);

    let lines = game.preview(0, 2, 0).unwrap().unwrap();
    assert!(lines.is_empty());
    assert_eq!(game.board().get(2, 0).unwrap().status, CellStatus::HoverPreview);

    game.commit(1, 3, 3).unwrap();
    assert!(!game.board().has_hover_state());
    assert_eq!(game.board().filled_count(), 3);
}

#[test]
fn test_illegal_preview_clears_previous_hover() {
    let mut game = scripted(&["#...", "....", "....", "...."], &[mono()]);
    game.preview(0, 1, 1).unwrap();
    assert!(game.board().has_hover_state());

    assert_eq!(game.preview(0, 0, 0).unwrap(), None);
    assert!(!game.board().has_hover_state());
}

#[test]
fn test_combo_broken_event() {
    let mut game = scripted(&["....", "....", "....", "...."], &[mono(), mono(), mono()])
        .with_scoring(block_grid::core::Score::from_points(10), 2, 2);

    let outcome = game.commit(0, 0, 0).unwrap();
    assert!(outcome.score.combo_broken);
    assert_eq!(game.combo(), 0);
    assert!(game
        .take_events()
        .contains(&EngineEvent::ComboBroken { previous: 2 }));
}

#[test]
fn test_restart_starts_new_episode() {
    let mut game = GameState::new(SessionConfig {
        seed: 77,
        ..SessionConfig::default()
    });
    let first_hand = game.hand().clone();
    let spot = game.legal_spots(0).unwrap().iter().next().unwrap();
    game.commit(0, spot.0 as i8, spot.1 as i8).unwrap();

    game.restart();
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.placements(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.score().as_f64(), 0.0);
    assert_eq!(game.hand().occupied_count(), 3);
    assert!(game.take_events().is_empty());
    // The dealer keeps its stream, so the new hand is not a replay
    assert_ne!(game.hand(), &first_hand);
}
