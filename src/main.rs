use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::info;

use lucena_board::{Board, move_to_uci};
use lucena_engine::{Engine, EngineConfig};

/// Command-line driver: search one position and print the best move.
///
/// Usage: `lucena [FEN] [--depth N] [--time SECONDS]`
/// With no FEN the starting position is searched.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut fen: Option<String> = None;
    let mut config = EngineConfig {
        max_depth: 7,
        ..EngineConfig::default()
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" => {
                let value = args.next().context("--depth needs a value")?;
                config.max_depth = value
                    .parse()
                    .with_context(|| format!("invalid depth: {value}"))?;
            }
            "--time" => {
                let value = args.next().context("--time needs a value")?;
                let seconds: u64 = value
                    .parse()
                    .with_context(|| format!("invalid time budget: {value}"))?;
                config.time_limit = Duration::from_secs(seconds);
            }
            other if fen.is_none() => fen = Some(other.to_string()),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let board = match fen {
        Some(fen) => fen.parse::<Board>()?,
        None => Board::starting_position(),
    };

    info!(fen = %board.fen(), depth = config.max_depth, "searching");

    let mut engine = Engine::with_config(config);
    let result = engine.search(&board);

    match result.best_move {
        Some(mv) => println!("bestmove {}", move_to_uci(&mv)),
        None if board.in_check() => println!("checkmate"),
        None => println!("stalemate"),
    }

    Ok(())
}
