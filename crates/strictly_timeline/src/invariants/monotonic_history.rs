//! Monotonic history invariant: each entry adds exactly one mark.

use super::Invariant;
use crate::{GameState, HistoryEntry, Square};

/// Invariant: every entry is its predecessor plus the recorded move.
///
/// Entry 0 is the empty board with no move. Each later entry differs
/// from the one before it in exactly one square, which was empty and
/// now holds the mark named by `last_move`.
pub struct MonotonicHistoryInvariant;

impl MonotonicHistoryInvariant {
    fn step_is_single_placement(prev: &HistoryEntry, next: &HistoryEntry) -> bool {
        let Some(mv) = next.last_move else {
            return false;
        };

        let changed: Vec<usize> = prev
            .board
            .squares()
            .iter()
            .zip(next.board.squares())
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(i, _)| i)
            .collect();

        changed == [mv.position.to_index()]
            && prev.board.get(mv.position) == Square::Empty
            && next.board.get(mv.position) == Square::Occupied(mv.player)
    }
}

impl Invariant<GameState> for MonotonicHistoryInvariant {
    fn holds(game: &GameState) -> bool {
        let entries = game.history().entries();

        let Some(first) = entries.first() else {
            return false;
        };
        if first != &HistoryEntry::start() {
            return false;
        }

        entries
            .windows(2)
            .all(|pair| Self::step_is_single_placement(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Each history entry adds exactly one mark to the previous board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_empty_game_holds() {
        let game = GameState::new();
        assert!(MonotonicHistoryInvariant::holds(&game));
    }

    #[test]
    fn test_full_game_holds() {
        let mut game = GameState::new();
        for index in [0, 4, 8, 2, 6, 3, 5, 1, 7] {
            game.apply_index(index).expect("index in range");
        }
        assert!(MonotonicHistoryInvariant::holds(&game));
    }

    #[test]
    fn test_single_placement_detects_extra_mark() {
        let prev = HistoryEntry::start();
        let mut board = prev.board;
        board.set(Position::Center, Square::Occupied(Player::X));
        board.set(Position::TopLeft, Square::Occupied(Player::O));
        let next = HistoryEntry {
            board,
            last_move: Some(Move::new(Player::X, Position::Center)),
        };
        assert!(!MonotonicHistoryInvariant::step_is_single_placement(&prev, &next));
    }

    #[test]
    fn test_single_placement_detects_wrong_mark() {
        let prev = HistoryEntry::start();
        let mut board = prev.board;
        board.set(Position::Center, Square::Occupied(Player::O));
        let next = HistoryEntry {
            board,
            last_move: Some(Move::new(Player::X, Position::Center)),
        };
        assert!(!MonotonicHistoryInvariant::step_is_single_placement(&prev, &next));
    }
}
