//! Run configuration for the `block-grid` binary.
//!
//! Environment variables set the defaults, command-line flags override them:
//!
//! | Variable | Flag | Meaning |
//! |----------|------|---------|
//! | `BLOCK_GRID_MODE` | `--mode` | `normal` (8×8, hand 3) or `chaos` (10×10, hand 5) |
//! | `BLOCK_GRID_SEED` | `--seed` | Dealer seed; derived from the clock when unset |
//! | `BLOCK_GRID_THEME` | `--theme` | `classic`, `neon`, `dark`, `retro`, `blue` |
//! | `BLOCK_GRID_SCORE_LOG` | `--score-log` | Append score records to this file as JSON lines |
//! | `BLOCK_GRID_QUIET` | `--quiet` | Silence `[Session]` log lines on stderr |
//! | | `--autoplay N` | Play N games with the built-in bot instead of reading stdin |
//!
//! Unparseable environment values fall back to defaults; bad flags are errors.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::{SessionConfig, ThemeKind};
use crate::types::GameMode;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub mode: GameMode,
    pub seed: Option<u64>,
    pub theme: ThemeKind,
    pub score_log: Option<PathBuf>,
    pub autoplay: Option<u32>,
    pub quiet: bool,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup (the process environment in production)
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = get("BLOCK_GRID_MODE")
            .and_then(|s| GameMode::from_str(s.trim()))
            .unwrap_or_default();
        let seed = get("BLOCK_GRID_SEED").and_then(|s| s.trim().parse().ok());
        let theme = get("BLOCK_GRID_THEME")
            .and_then(|s| ThemeKind::from_str(s.trim()))
            .unwrap_or_default();
        let score_log = get("BLOCK_GRID_SCORE_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let quiet = get("BLOCK_GRID_QUIET")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            mode,
            seed,
            theme,
            score_log,
            autoplay: None,
            quiet,
        }
    }

    /// Engine-facing session context. An unset seed is taken from the clock
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            seed: self.seed.unwrap_or_else(clock_seed),
            theme: self.theme,
        }
    }
}

/// Apply command-line flags on top of `base`
pub fn parse_args(mut base: RunConfig, args: &[String]) -> Result<RunConfig> {
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                let v = flag_value(args, i, "--mode")?;
                base.mode =
                    GameMode::from_str(v).ok_or_else(|| anyhow!("invalid --mode value: {}", v))?;
                i += 1;
            }
            "--seed" => {
                let v = flag_value(args, i, "--seed")?;
                base.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
                i += 1;
            }
            "--theme" => {
                let v = flag_value(args, i, "--theme")?;
                base.theme =
                    ThemeKind::from_str(v).ok_or_else(|| anyhow!("invalid --theme value: {}", v))?;
                i += 1;
            }
            "--score-log" => {
                let v = flag_value(args, i, "--score-log")?;
                base.score_log = Some(PathBuf::from(v));
                i += 1;
            }
            "--autoplay" => {
                let v = flag_value(args, i, "--autoplay")?;
                let games = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --autoplay value: {}", v))?;
                if games == 0 {
                    return Err(anyhow!("--autoplay needs at least one game"));
                }
                base.autoplay = Some(games);
                i += 1;
            }
            "--quiet" => base.quiet = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(base)
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
