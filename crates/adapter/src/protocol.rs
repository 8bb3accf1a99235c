//! Protocol module - JSON message types for the presentation adapter
//!
//! Line-delimited JSON. Every message has: type, seq (sequence number), ts (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::core::{FullLines, GameSnapshot, PieceSnapshot, PlacementOutcome, SpotMap};
use crate::engine::DragError;
use crate::types::{EngineEvent, LineAxis};

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    #[serde(rename = "command")]
    Command,
}

impl Default for CommandType {
    fn default() -> Self {
        Self::Command
    }
}

/// Command message
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: CommandAction,
    #[serde(default)]
    pub slot: Option<usize>,
    /// Grid cell under the pointer; absent or null means off the grid
    #[serde(default)]
    pub target: Option<TargetCell>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetCell {
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    BeginDrag,
    DragOver,
    Drop,
    CancelDrag,
    Place,
    LegalSpots,
    Observe,
    Restart,
    SetTheme,
}

impl<'de> Deserialize<'de> for CommandAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("begin_drag") {
            Ok(Self::BeginDrag)
        } else if s.eq_ignore_ascii_case("drag_over") {
            Ok(Self::DragOver)
        } else if s.eq_ignore_ascii_case("drop") {
            Ok(Self::Drop)
        } else if s.eq_ignore_ascii_case("cancel_drag") {
            Ok(Self::CancelDrag)
        } else if s.eq_ignore_ascii_case("place") {
            Ok(Self::Place)
        } else if s.eq_ignore_ascii_case("legal_spots") {
            Ok(Self::LegalSpots)
        } else if s.eq_ignore_ascii_case("observe") {
            Ok(Self::Observe)
        } else if s.eq_ignore_ascii_case("restart") {
            Ok(Self::Restart)
        } else if s.eq_ignore_ascii_case("set_theme") {
            Ok(Self::SetTheme)
        } else {
            Err(serde::de::Error::custom("unknown action"))
        }
    }
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "invalid_place")]
    InvalidPlace,
    #[serde(rename = "invalid_slot")]
    InvalidSlot,
    #[serde(rename = "invalid_config")]
    InvalidConfig,
    #[serde(rename = "not_playable")]
    NotPlayable,
    #[serde(rename = "no_drag")]
    NoDrag,
}

impl From<DragError> for ErrorCode {
    fn from(value: DragError) -> Self {
        match value.code() {
            "invalid_place" => Self::InvalidPlace,
            "invalid_slot" => Self::InvalidSlot,
            "invalid_config" => Self::InvalidConfig,
            "not_playable" => Self::NotPlayable,
            "no_drag" => Self::NoDrag,
            _ => Self::InvalidCommand,
        }
    }
}

/// Acknowledgment for a command, with whatever the command produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spots: Option<SpotsSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<LinesSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementSnapshot>,
    /// Set on a drop that did not land on a legal anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed: Option<bool>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Full session observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    pub game_over: bool,
    pub mode: String,
    pub episode_id: u32,
    pub seed: u64,
    pub placements: u32,
    pub board: BoardSnapshot,
    pub hand: Vec<Option<HandPieceSnapshot>>,
    pub score: f64,
    pub combo: u32,
    pub turns_since_last_clear: u32,
    pub events: Vec<EventSnapshot>,
    pub state_hash: StateHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: u8,
    /// `[y][x]` status codes: 0 empty, 1 filled, 2 preview, 3 break on empty, 4 break on filled
    pub cells: Vec<Vec<u8>>,
    /// `[y][x]` colours as `#rrggbb`, null when empty
    pub colors: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPieceSnapshot {
    pub shape: String,
    pub color: String,
    pub blocks: u8,
}

impl From<PieceSnapshot> for HandPieceSnapshot {
    fn from(value: PieceSnapshot) -> Self {
        Self {
            shape: value.kind.as_str().to_string(),
            color: value.color.to_hex(),
            blocks: value.block_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotsSnapshot {
    pub slot: usize,
    pub count: usize,
    /// `[y][x]` legal anchors
    pub spots: Vec<Vec<bool>>,
}

impl SpotsSnapshot {
    pub fn new(slot: usize, map: &SpotMap) -> Self {
        Self {
            slot,
            count: map.count(),
            spots: map.to_rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinesSnapshot {
    pub rows: Vec<u8>,
    pub columns: Vec<u8>,
}

impl From<&FullLines> for LinesSnapshot {
    fn from(value: &FullLines) -> Self {
        Self {
            rows: value.rows().to_vec(),
            columns: value.columns().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSnapshot {
    pub slot: usize,
    pub shape: String,
    pub x: i8,
    pub y: i8,
    pub lines: LinesSnapshot,
    pub lines_broken: usize,
    pub cells_cleared: usize,
    pub base: f64,
    pub bonus: f64,
    pub delta: f64,
    pub combo: u32,
    pub combo_tier: u8,
    pub combo_broken: bool,
    pub hand_refilled: bool,
    pub game_over: bool,
}

impl From<&PlacementOutcome> for PlacementSnapshot {
    fn from(value: &PlacementOutcome) -> Self {
        Self {
            slot: value.slot,
            shape: value.piece.kind.as_str().to_string(),
            x: value.x,
            y: value.y,
            lines: LinesSnapshot::from(&value.lines),
            lines_broken: value.lines_broken,
            cells_cleared: value.cells_cleared,
            base: value.score.base.as_f64(),
            bonus: value.score.bonus.as_f64(),
            delta: value.score.total.as_f64(),
            combo: value.score.combo,
            combo_tier: value.combo_tier,
            combo_broken: value.score.combo_broken,
            hand_refilled: value.hand_refilled,
            game_over: value.game_over,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSnapshot {
    CellFilled { x: u8, y: u8, color: String },
    CellCleared { x: u8, y: u8 },
    LineResolved { axis: String, index: u8 },
    ScoreChanged { delta: f64, total: f64 },
    ComboBroken { previous: u32 },
    HandRefilled { size: usize },
    GameOver { final_score: u64 },
}

impl From<EngineEvent> for EventSnapshot {
    fn from(value: EngineEvent) -> Self {
        match value {
            EngineEvent::CellFilled { x, y, color } => Self::CellFilled {
                x,
                y,
                color: color.to_hex(),
            },
            EngineEvent::CellCleared { x, y } => Self::CellCleared { x, y },
            EngineEvent::LineResolved { axis, index } => Self::LineResolved {
                axis: match axis {
                    LineAxis::Row => "row".to_string(),
                    LineAxis::Column => "column".to_string(),
                },
                index,
            },
            EngineEvent::ScoreChanged { delta, total } => Self::ScoreChanged { delta, total },
            EngineEvent::ComboBroken { previous } => Self::ComboBroken { previous },
            EngineEvent::HandRefilled { size } => Self::HandRefilled { size },
            EngineEvent::GameOver { final_score } => Self::GameOver { final_score },
        }
    }
}

/// Deterministic state hash serialized as lowercase hex (without heap allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            let nib = (v & 0x0f) as usize;
            buf[15 - i] = HEX[nib];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        let s = s.trim();
        let mut v: u64 = 0;
        for b in s.as_bytes() {
            let d = match b {
                b'0'..=b'9' => (b - b'0') as u64,
                b'a'..=b'f' => (b - b'a' + 10) as u64,
                b'A'..=b'F' => (b - b'A' + 10) as u64,
                _ => return Err(serde::de::Error::custom("invalid hex")),
            };
            v = (v << 4) | d;
        }
        Ok(StateHash(v))
    }
}

/// FNV-1a, so hashes stay stable across Rust versions and platforms
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl std::hash::Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Hash of everything that defines the position (board, hand, score state)
pub fn state_hash(snap: &GameSnapshot) -> StateHash {
    use std::hash::{Hash, Hasher};

    let mut hasher = Fnv1aHasher::new();
    snap.mode.hash(&mut hasher);
    snap.board_size.hash(&mut hasher);
    snap.board.hash(&mut hasher);
    snap.colors.hash(&mut hasher);
    snap.hand.hash(&mut hasher);
    snap.score.to_bits().hash(&mut hasher);
    snap.combo.hash(&mut hasher);
    snap.turns_since_last_clear.hash(&mut hasher);
    snap.status.hash(&mut hasher);
    snap.episode_id.hash(&mut hasher);
    snap.seed.hash(&mut hasher);
    StateHash(hasher.finish())
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Command(CommandMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "command" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

/// Pull `"seq": N` out of a line that failed to parse, best effort
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create an acknowledgment with no payload
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        spots: None,
        preview: None,
        placement: None,
        missed: None,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a snapshot plus the events drained since the last one
pub fn build_observation(seq: u64, snap: &GameSnapshot, events: &[EngineEvent]) -> ObservationMessage {
    let n = snap.board_size as usize;
    let cells = if n == 0 {
        Vec::new()
    } else {
        snap.board.chunks(n).map(|row| row.to_vec()).collect()
    };
    let colors = if n == 0 {
        Vec::new()
    } else {
        snap.colors
            .chunks(n)
            .map(|row| row.iter().map(|c| c.map(|c| c.to_hex())).collect())
            .collect()
    };

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snap.playable(),
        game_over: !snap.playable(),
        mode: snap.mode.as_str().to_string(),
        episode_id: snap.episode_id,
        seed: snap.seed,
        placements: snap.placements,
        board: BoardSnapshot {
            size: snap.board_size,
            cells,
            colors,
        },
        hand: snap
            .hand
            .iter()
            .map(|p| p.map(HandPieceSnapshot::from))
            .collect(),
        score: snap.score,
        combo: snap.combo,
        turns_since_last_clear: snap.turns_since_last_clear,
        events: events.iter().copied().map(EventSnapshot::from).collect(),
        state_hash: state_hash(snap),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
