mod config;

use std::path::PathBuf;
use std::{fs, panic, thread};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use pgnan_core::Board;
use pgnan_pgn::{PgnRecord, read_games};
use pgnan_replay::{Game, ReplayError, ReplayOptions, ReplaySummary};

use crate::config::AppConfig;

/// What one game produced: its header block, final board and outcome.
struct Replayed {
    header: String,
    board: Board,
    outcome: Result<ReplaySummary, ReplayError>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    info!(on_error = %config.on_error, threads = config.threads, "pgnan starting");

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: pgnan <file.pgn>...");
    }

    let mut records = Vec::new();
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let games = read_games(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!(file = %path.display(), games = games.len(), "loaded");
        records.extend(games);
    }

    let options = ReplayOptions::with_policy(config.on_error);
    let replayed = replay_all(records, options, config.threads);

    let mut failed = 0usize;
    for (index, game) in replayed.iter().enumerate() {
        print!("{}", game.header);
        match &game.outcome {
            Ok(summary) => info!(
                game = index + 1,
                applied = summary.applied,
                skipped = summary.skipped.len(),
                "replayed"
            ),
            Err(err) => {
                failed += 1;
                warn!(game = index + 1, error = %err, "replay aborted");
            }
        }
        println!("{}", game.board.placement());
    }

    if failed > 0 {
        bail!("{failed} of {} games failed to replay", replayed.len());
    }
    Ok(())
}

/// Replay every record, splitting the games into contiguous chunks per worker.
///
/// Output order matches input order regardless of `threads`.
fn replay_all(records: Vec<PgnRecord>, options: ReplayOptions, threads: usize) -> Vec<Replayed> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut games: Vec<Game> = records.into_iter().map(PgnRecord::into_game).collect();
    let chunk_len = games.len().div_ceil(threads.max(1));

    thread::scope(|scope| {
        let handles: Vec<_> = games
            .chunks_mut(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter_mut()
                        .map(|game| replay_one(game, options))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|p| panic::resume_unwind(p)))
            .collect()
    })
}

fn replay_one(game: &mut Game, options: ReplayOptions) -> Replayed {
    let mut header = String::new();
    let outcome = game.run(options, |block| header.push_str(block));
    Replayed {
        header,
        board: *game.board(),
        outcome,
    }
}
