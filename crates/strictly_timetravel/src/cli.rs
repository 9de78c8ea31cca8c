//! Command-line interface for strictly_timetravel.

use clap::{Parser, Subcommand};
use strictly_timeline::Position;

/// Strictly Timetravel - tic-tac-toe with a rewindable move history
#[derive(Parser, Debug)]
#[command(name = "strictly_timetravel")]
#[command(about = "Tic-tac-toe with time travel through the move history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Tui {
        /// Path to the TOML config file (defaults are used if missing)
        #[arg(short, long, default_value = "strictly_timetravel.toml")]
        config: std::path::PathBuf,
    },

    /// Apply moves headlessly and print the resulting game
    Replay {
        /// Cells in play order, comma separated: indices 0-8 or labels
        /// such as `center` and `top-left`
        #[arg(short, long, value_delimiter = ',', value_parser = parse_position)]
        moves: Vec<Position>,

        /// Step to view after the moves are applied
        #[arg(short, long)]
        jump: Option<usize>,

        /// List moves most recent first
        #[arg(long)]
        descending: bool,
    },
}

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_label_or_number(s)
        .ok_or_else(|| format!("'{}' is not a cell index (0-8) or label", s))
}
