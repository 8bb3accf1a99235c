//! Adapter module - drive a session through a line-delimited JSON protocol
//!
//! This module lets an external presentation layer (a GUI, a web front end, a bot) play the
//! game without linking against the engine: it writes commands as JSON lines and reads back
//! acks, errors, and observations.
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **command**: one of `begin_drag`, `drag_over`, `drop`, `cancel_drag`, `place`,
//!   `legal_spots`, `observe`, `restart`, `set_theme`
//!
//! ## Engine → Client
//!
//! - **ack**: Command accepted, with its result (legal spots, preview lines, placement)
//! - **error**: Command rejected, with a stable code and a message
//! - **observation**: Full session snapshot plus the engine events since the last one
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Engine: {"type":"command","seq":1,"action":"begin_drag","slot":0}
//! Engine -> Client: {"type":"ack","seq":1,"ts":1700000000000,"status":"ok","spots":{...}}
//! Client -> Engine: {"type":"command","seq":2,"action":"drag_over","target":{"x":3,"y":4}}
//! Engine -> Client: {"type":"ack","seq":2,...,"preview":{"rows":[4],"columns":[]}}
//! Engine -> Client: {"type":"observation","seq":1,...,"board":{...},"events":[]}
//! Client -> Engine: {"type":"command","seq":3,"action":"drop","target":{"x":3,"y":4}}
//! Engine -> Client: {"type":"ack","seq":3,...,"placement":{"lines_broken":1,...}}
//! Engine -> Client: {"type":"observation","seq":2,...,"events":[{"kind":"cell_filled",...}]}
//! ```
//!
//! A `null` or missing `target` means the pointer is off the grid.
//!
//! # Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `invalid_command` | Malformed line, unknown action, or missing field |
//! | `invalid_place` | Target is out of bounds or overlaps a filled cell |
//! | `invalid_slot` | Hand slot is empty or does not exist |
//! | `not_playable` | The game is over |
//! | `no_drag` | `drag_over` or `drop` without `begin_drag` |

pub mod dispatch;
pub mod protocol;
pub mod recorder;

pub use block_grid_core as core;
pub use block_grid_engine as engine;
pub use block_grid_types as types;

// Re-export protocol types for convenience
pub use dispatch::Dispatcher;
pub use protocol::*;
pub use recorder::{JsonLinesRecorder, RecordOp, ScoreLine};
