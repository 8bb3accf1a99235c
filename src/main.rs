//! Block Grid runner (default binary).
//!
//! Reads protocol commands from stdin and writes acks, errors, and observations to stdout,
//! one JSON object per line. With `--autoplay N` the built-in bot plays instead.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use block_grid::adapter::{Dispatcher, JsonLinesRecorder};
use block_grid::autoplay::{self, MAX_PLACEMENTS_PER_GAME};
use block_grid::config::{parse_args, RunConfig};
use block_grid::engine::{NullRecorder, ScoreRecorder, Session};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(RunConfig::from_env(), &args)?;

    match config.score_log.clone() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("open score log {}", path.display()))?;
            run(&config, JsonLinesRecorder::new(file))
        }
        None => run(&config, NullRecorder),
    }
}

fn run<R: ScoreRecorder>(config: &RunConfig, recorder: R) -> Result<()> {
    let session_config = config.session_config();
    if !config.quiet {
        eprintln!(
            "[Session] mode={} seed={} theme={}",
            session_config.mode.as_str(),
            session_config.seed,
            session_config.theme.as_str()
        );
    }

    let mut session = Session::new(session_config, recorder);
    match config.autoplay {
        Some(games) => run_autoplay(config, &mut session, games),
        None => serve(config, session),
    }
}

fn run_autoplay<R: ScoreRecorder>(
    config: &RunConfig,
    session: &mut Session<R>,
    games: u32,
) -> Result<()> {
    let summaries = autoplay::run(session, games, MAX_PLACEMENTS_PER_GAME)?;
    report_record_error(config, session);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for s in &summaries {
        if !config.quiet {
            eprintln!(
                "[Session] episode {} over: score={} placements={}",
                s.episode_id, s.final_score, s.placements
            );
        }
        serde_json::to_writer(&mut out, s).context("failed to encode game summary")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn serve<R: ScoreRecorder>(config: &RunConfig, session: Session<R>) -> Result<()> {
    let mut dispatcher = Dispatcher::new(session);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", dispatcher.observation()?)?;
    out.flush()?;

    let mut was_over = dispatcher.session().game().is_game_over();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        for reply in dispatcher.handle_line(&line)? {
            writeln!(out, "{}", reply)?;
        }
        out.flush()?;

        report_record_error(config, dispatcher.session_mut());
        let game = dispatcher.session().game();
        if game.is_game_over() && !was_over && !config.quiet {
            eprintln!(
                "[Session] episode {} over: score={} placements={}",
                game.episode_id(),
                game.score().whole(),
                game.placements()
            );
        }
        was_over = game.is_game_over();
    }

    if !config.quiet {
        eprintln!("[Session] stdin closed");
    }
    Ok(())
}

fn report_record_error<R: ScoreRecorder>(config: &RunConfig, session: &mut Session<R>) {
    if let Some(e) = session.take_record_error() {
        if !config.quiet {
            eprintln!("[Session] score record failed: {}", e);
        }
    }
}
