//! Built-in greedy bot.
//!
//! For every occupied slot and every legal anchor, it simulates the drop on a copy of the
//! board and keeps the best-scoring move: most lines cleared first, then the fewest cells
//! left filled, then the most contact with walls and filled cells. Ties keep the first move
//! found (lowest slot, then row-major anchor), so play is deterministic for a given seed.

use serde::Serialize;

use crate::core::{lines, placement, Board, GameState, Piece};
use crate::engine::{DragError, ScoreRecorder, Session};

/// Default cap on placements per game
pub const MAX_PLACEMENTS_PER_GAME: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub slot: usize,
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSummary {
    pub episode_id: u32,
    pub placements: u32,
    pub score: f64,
    /// Score shown at game over (rounded down)
    pub final_score: u64,
}

/// Best move for the current position, `None` when nothing fits
pub fn choose_move(game: &GameState) -> Option<Move> {
    let board = game.board();
    let mut best: Option<(Move, (usize, i64, u32))> = None;

    for (slot, piece) in game.hand().occupied() {
        for (x, y) in placement::legal_spots(board, piece).iter() {
            let mv = Move {
                slot,
                x: x as i8,
                y: y as i8,
            };
            let Some(rank) = evaluate(board, piece, mv.x, mv.y) else {
                continue;
            };
            if best.as_ref().map_or(true, |(_, b)| rank > *b) {
                best = Some((mv, rank));
            }
        }
    }

    best.map(|(mv, _)| mv)
}

/// `(lines cleared, -cells left filled, contact)`; higher is better
fn evaluate(board: &Board, piece: &Piece, x: i8, y: i8) -> Option<(usize, i64, u32)> {
    let contact = contact(board, piece, x, y);
    let mut sim = board.clone();
    sim.place(piece, x, y).ok()?;
    let clear = lines::resolve(&mut sim);
    Some((clear.line_count(), -(sim.filled_count() as i64), contact))
}

/// Neighbours of the piece's cells that are walls or already filled
fn contact(board: &Board, piece: &Piece, x: i8, y: i8) -> u32 {
    let mut touching = 0;
    for (cx, cy) in piece.cells_at(x, y) {
        for (dx, dy) in [(-1i16, 0i16), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (cx + dx, cy + dy);
            let n = board.size() as i16;
            if nx < 0 || ny < 0 || nx >= n || ny >= n {
                touching += 1;
            } else if board.is_filled_at(nx as i8, ny as i8) {
                touching += 1;
            }
        }
    }
    touching
}

/// Play until game over or `max_placements`, then report the result
pub fn play_game<R: ScoreRecorder>(
    session: &mut Session<R>,
    max_placements: u32,
) -> Result<GameSummary, DragError> {
    let mut placements = 0u32;
    while !session.game().is_game_over() && placements < max_placements {
        let Some(mv) = choose_move(session.game()) else {
            break;
        };
        session.place(mv.slot, mv.x, mv.y)?;
        placements += 1;
    }

    let game = session.game();
    Ok(GameSummary {
        episode_id: game.episode_id(),
        placements: game.placements(),
        score: game.score().as_f64(),
        final_score: game.score().whole(),
    })
}

/// Play `games` games back to back, restarting in between
pub fn run<R: ScoreRecorder>(
    session: &mut Session<R>,
    games: u32,
    max_placements: u32,
) -> Result<Vec<GameSummary>, DragError> {
    let mut summaries = Vec::with_capacity(games as usize);
    for i in 0..games {
        if i > 0 {
            session.restart();
        }
        summaries.push(play_game(session, max_placements)?);
    }
    Ok(summaries)
}
