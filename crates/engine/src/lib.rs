//! Session layer: drag-and-drop control of a game plus score record bookkeeping.
//!
//! `block_grid_core` knows how to commit a placement. This crate knows when to: it turns
//! begin / hover / drop / cancel gestures into previews and commits, and keeps one score
//! record per episode up to date through a [`ScoreRecorder`].

pub mod drag;
pub mod recorder;

pub use block_grid_core as core;
pub use block_grid_types as types;

pub use drag::{DragError, DragState, DropOutcome, Session};
pub use recorder::{MemoryRecorder, NullRecorder, RecordError, RecordId, ScoreRecord, ScoreRecorder};
