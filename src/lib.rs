//! Block Grid (workspace facade crate).
//!
//! Exposes `block_grid::{core,engine,adapter,types}` while the implementation lives in
//! dedicated crates under `crates/`, plus the run configuration and autoplay driver used by
//! the `block-grid` binary.

pub mod autoplay;
pub mod config;

pub use block_grid_adapter as adapter;
pub use block_grid_core as core;
pub use block_grid_engine as engine;
pub use block_grid_types as types;
