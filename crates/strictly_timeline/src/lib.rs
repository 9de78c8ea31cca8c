//! Strictly Timeline - tic-tac-toe with time travel.
//!
//! Pure game logic with no I/O: a history of board snapshots, a pointer
//! to the snapshot being viewed, and the rules that judge a single
//! board. A front end forwards [`Intent`]s to [`GameState`] and re-reads
//! its queries to render.
//!
//! # Example
//!
//! ```
//! use strictly_timeline::{GameState, GameStatus, Player, Position};
//!
//! let mut game = GameState::new();
//! for pos in [
//!     Position::TopLeft,
//!     Position::Center,
//!     Position::TopCenter,
//!     Position::MiddleRight,
//!     Position::TopRight,
//! ] {
//!     game.apply_move(pos);
//! }
//! assert_eq!(game.status(), GameStatus::Won(Player::X));
//!
//! // Step back two moves and play a different line.
//! game.jump_to(3).unwrap();
//! game.apply_move(Position::BottomLeft);
//! assert_eq!(game.history().len(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod game;
mod history;
mod intent;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{IgnoreReason, Move, MoveOutcome};
pub use error::TimelineError;
pub use game::{GameState, MoveListEntry, SortOrder};
pub use history::{History, HistoryEntry};
pub use intent::Intent;
pub use position::Position;
pub use rules::WinningLine;
pub use types::{Board, GameStatus, Player, Square};
