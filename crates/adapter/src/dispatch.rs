//! Command dispatch: one inbound JSON line in, zero or more outbound JSON lines out.

use anyhow::{Context, Result};

use crate::core::{GameSnapshot, ThemeKind};
use crate::engine::{DragError, DropOutcome, ScoreRecorder, Session};
use crate::protocol::{
    build_observation, create_ack, create_error, extract_seq_best_effort, parse_message,
    AckMessage, CommandAction, CommandMessage, ErrorCode, LinesSnapshot, ParsedMessage,
    PlacementSnapshot, SpotsSnapshot,
};

struct CommandError {
    code: ErrorCode,
    message: String,
}

impl CommandError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<DragError> for CommandError {
    fn from(value: DragError) -> Self {
        Self::new(ErrorCode::from(value), value.message())
    }
}

pub struct Dispatcher<R: ScoreRecorder> {
    session: Session<R>,
    out_seq: u64,
    snapshot: GameSnapshot,
}

impl<R: ScoreRecorder> Dispatcher<R> {
    pub fn new(session: Session<R>) -> Self {
        Self {
            session,
            out_seq: 0,
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<R> {
        &mut self.session
    }

    pub fn into_session(self) -> Session<R> {
        self.session
    }

    /// Observation of the current state, carrying every event buffered since the last one
    pub fn observation(&mut self) -> Result<String> {
        let events = self.session.take_events();
        self.session.game().snapshot_into(&mut self.snapshot);
        let seq = self.next_seq();
        let obs = build_observation(seq, &self.snapshot, &events);
        serde_json::to_string(&obs).context("serialize observation")
    }

    /// Handle one inbound line
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Vec::new());
        }

        let cmd = match parse_message(line) {
            Ok(ParsedMessage::Command(cmd)) => cmd,
            Ok(ParsedMessage::Unknown(m)) => {
                let err = create_error(m.seq, ErrorCode::InvalidCommand, "unknown message type");
                return Ok(vec![serde_json::to_string(&err).context("serialize error")?]);
            }
            Err(e) => {
                let seq = extract_seq_best_effort(line).unwrap_or(0);
                let err = create_error(seq, ErrorCode::InvalidCommand, &e.to_string());
                return Ok(vec![serde_json::to_string(&err).context("serialize error")?]);
            }
        };

        let mut out = Vec::with_capacity(2);
        match self.apply(&cmd) {
            Ok((ack, observe)) => {
                out.push(serde_json::to_string(&ack).context("serialize ack")?);
                if observe {
                    out.push(self.observation()?);
                }
            }
            Err(e) => {
                let err = create_error(cmd.seq, e.code, &e.message);
                out.push(serde_json::to_string(&err).context("serialize error")?);
            }
        }
        Ok(out)
    }

    /// Run a command. The flag says whether the state changed enough to send an observation
    fn apply(&mut self, cmd: &CommandMessage) -> Result<(AckMessage, bool), CommandError> {
        let mut ack = create_ack(cmd.seq);
        let target = cmd.target.map(|t| (t.x, t.y));

        let observe = match cmd.action {
            CommandAction::BeginDrag => {
                let slot = require_slot(cmd)?;
                let spots = self.session.begin_drag(slot)?;
                ack.spots = Some(SpotsSnapshot::new(slot, spots));
                false
            }
            CommandAction::DragOver => {
                let lines = self.session.drag_over(target)?;
                ack.preview = lines.as_ref().map(LinesSnapshot::from);
                true
            }
            CommandAction::Drop => {
                match self.session.drop_at(target)? {
                    DropOutcome::Placed(outcome) => {
                        ack.placement = Some(PlacementSnapshot::from(&outcome));
                    }
                    DropOutcome::Missed => ack.missed = Some(true),
                }
                true
            }
            CommandAction::CancelDrag => {
                self.session.cancel_drag();
                true
            }
            CommandAction::Place => {
                let slot = require_slot(cmd)?;
                let Some((x, y)) = target else {
                    return Err(CommandError::new(ErrorCode::InvalidPlace, "Missing target"));
                };
                let outcome = self.session.place(slot, x, y)?;
                ack.placement = Some(PlacementSnapshot::from(&outcome));
                true
            }
            CommandAction::LegalSpots => {
                let slot = require_slot(cmd)?;
                let spots = self
                    .session
                    .game()
                    .legal_spots(slot)
                    .map_err(DragError::from)?;
                ack.spots = Some(SpotsSnapshot::new(slot, &spots));
                false
            }
            CommandAction::Observe => true,
            CommandAction::Restart => {
                self.session.restart();
                true
            }
            CommandAction::SetTheme => {
                let name = cmd.theme.as_deref().unwrap_or_default();
                let Some(theme) = ThemeKind::from_str(name) else {
                    return Err(CommandError::new(
                        ErrorCode::InvalidCommand,
                        format!("Unknown theme: {}", name),
                    ));
                };
                self.session.set_theme(theme);
                false
            }
        };

        Ok((ack, observe))
    }

    fn next_seq(&mut self) -> u64 {
        self.out_seq += 1;
        self.out_seq
    }
}

fn require_slot(cmd: &CommandMessage) -> Result<usize, CommandError> {
    cmd.slot
        .ok_or_else(|| CommandError::new(ErrorCode::InvalidCommand, "Missing slot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameState, Hand, Piece, SessionConfig, ShapeKind};
    use crate::engine::MemoryRecorder;
    use crate::types::Color;
    use serde_json::Value;

    fn dispatcher(rows: &[&str], slots: &[Option<Piece>]) -> Dispatcher<MemoryRecorder> {
        let board = Board::from_rows(rows, Color::rgb(5, 5, 5)).unwrap();
        let hand = Hand::from_slots(slots).unwrap();
        let game = GameState::from_parts(SessionConfig::default(), board, hand);
        Dispatcher::new(Session::from_game(game, MemoryRecorder::new()))
    }

    fn mono() -> Option<Piece> {
        Some(Piece::new(ShapeKind::Mono, Color::rgb(1, 1, 1)))
    }

    fn send(d: &mut Dispatcher<MemoryRecorder>, line: &str) -> Vec<Value> {
        d.handle_line(line)
            .unwrap()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_begin_drag_returns_spots() {
        let mut d = dispatcher(&["#..", "...", "..."], &[mono(), mono()]);
        let out = send(&mut d, r#"{"type":"command","seq":1,"action":"begin_drag","slot":0}"#);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["type"], "ack");
        assert_eq!(out[0]["seq"], 1);
        assert_eq!(out[0]["spots"]["count"], 8);
        assert_eq!(out[0]["spots"]["spots"][0][0], false);
    }

    #[test]
    fn test_drag_and_drop_flow() {
        let mut d = dispatcher(&["##.", "...", "..."], &[mono(), mono()]);
        send(&mut d, r#"{"type":"command","seq":1,"action":"begin_drag","slot":0}"#);

        let over = send(
            &mut d,
            r#"{"type":"command","seq":2,"action":"drag_over","target":{"x":2,"y":0}}"#,
        );
        assert_eq!(over[0]["preview"]["rows"][0], 0);
        assert_eq!(over[1]["type"], "observation");
        assert_eq!(over[1]["board"]["cells"][0][0], 4);
        assert_eq!(over[1]["board"]["cells"][0][2], 3);

        let dropped = send(
            &mut d,
            r#"{"type":"command","seq":3,"action":"drop","target":{"x":2,"y":0}}"#,
        );
        assert_eq!(dropped[0]["placement"]["lines_broken"], 1);
        assert_eq!(dropped[0]["placement"]["cells_cleared"], 3);
        assert_eq!(dropped[1]["score"], 2.5);
        let kinds: Vec<&str> = dropped[1]["events"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["kind"].as_str())
            .collect();
        assert!(kinds.contains(&"line_resolved"));
        assert!(kinds.contains(&"score_changed"));
    }

    #[test]
    fn test_missed_drop() {
        let mut d = dispatcher(&["...", "...", "..."], &[mono()]);
        send(&mut d, r#"{"type":"command","seq":1,"action":"begin_drag","slot":0}"#);
        let out = send(&mut d, r#"{"type":"command","seq":2,"action":"drop","target":null}"#);
        assert_eq!(out[0]["missed"], true);
        assert_eq!(d.session().missed_drops(), 1);
    }

    #[test]
    fn test_errors_are_reported_not_raised() {
        let mut d = dispatcher(&["#..", "...", "..."], &[mono(), None]);

        let out = send(&mut d, r#"{"type":"command","seq":4,"action":"drop"}"#);
        assert_eq!(out[0]["type"], "error");
        assert_eq!(out[0]["code"], "no_drag");
        assert_eq!(out[0]["seq"], 4);

        let out = send(&mut d, r#"{"type":"command","seq":5,"action":"begin_drag","slot":1}"#);
        assert_eq!(out[0]["code"], "invalid_slot");

        let out = send(
            &mut d,
            r#"{"type":"command","seq":6,"action":"place","slot":0,"target":{"x":0,"y":0}}"#,
        );
        assert_eq!(out[0]["code"], "invalid_place");

        let out = send(&mut d, r#"{"type":"command","seq":7,"action":"place","slot":0}"#);
        assert_eq!(out[0]["code"], "invalid_place");

        let out = send(&mut d, r#"{"type":"command","seq":8,"action":"spin"}"#);
        assert_eq!(out[0]["code"], "invalid_command");
        assert_eq!(out[0]["seq"], 8);

        let out = send(&mut d, "not json");
        assert_eq!(out[0]["code"], "invalid_command");
    }

    #[test]
    fn test_set_theme_and_restart() {
        let mut d = dispatcher(&["...", "...", "..."], &[mono()]);
        let out = send(&mut d, r#"{"type":"command","seq":1,"action":"set_theme","theme":"retro"}"#);
        assert_eq!(out[0]["type"], "ack");
        assert_eq!(d.session().game().config().theme, ThemeKind::Retro);

        let out = send(&mut d, r#"{"type":"command","seq":2,"action":"set_theme","theme":"pastel"}"#);
        assert_eq!(out[0]["code"], "invalid_command");

        let out = send(&mut d, r#"{"type":"command","seq":3,"action":"restart"}"#);
        assert_eq!(out[1]["episode_id"], 1);
        assert_eq!(out[1]["board"]["size"], 8);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut d = dispatcher(&["..", ".."], &[mono()]);
        assert!(d.handle_line("   ").unwrap().is_empty());
    }
}
