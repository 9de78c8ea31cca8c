//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a single board
//! snapshot. Rules never mutate the board and know nothing about
//! history or turn order.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinningLine, check_winner, winning_line, winning_triple};
