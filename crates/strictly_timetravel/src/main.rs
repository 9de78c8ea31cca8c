//! Strictly Timetravel - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_timeline::{GameState, MoveOutcome, Position, SortOrder};
use strictly_timetravel::{TimeTravelConfig, render_text, run_tui};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui { config } => {
            let config = TimeTravelConfig::load_or_default(&config)?;
            run_tui(&config)
        }
        Command::Replay {
            moves,
            jump,
            descending,
        } => run_replay(&moves, jump, descending),
    }
}

/// Apply moves, optionally jump, and print the game.
#[instrument]
fn run_replay(moves: &[Position], jump: Option<usize>, descending: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut game = GameState::with_sort_order(SortOrder::from_ascending(!descending));

    for &pos in moves {
        if let MoveOutcome::Ignored(reason) = game.apply_move(pos) {
            info!(%pos, %reason, "Move skipped");
        }
    }

    if let Some(step) = jump {
        game.jump_to(step)?;
    }

    debug!(step = game.step_number(), "Replay finished");
    println!("{}", render_text(&game));
    Ok(())
}
