//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: the move recorded at step k was made by the player whose
/// turn it was at step k - 1.
///
/// X makes odd-numbered moves and O even-numbered ones, so the mark on
/// any history entry can be predicted from its index alone.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        game.history()
            .iter()
            .enumerate()
            .skip(1)
            .all(|(step, entry)| {
                entry
                    .last_move
                    .is_some_and(|mv| mv.player == Player::for_step(step - 1))
            })
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_empty_game_holds() {
        let game = GameState::new();
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let mut game = GameState::new();
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopRight,
            Position::BottomLeft,
            Position::BottomRight,
        ] {
            game.apply_move(pos);
        }
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.next_player(), Player::O);
    }

    #[test]
    fn test_holds_after_branching() {
        let mut game = GameState::new();
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            game.apply_move(pos);
        }
        game.jump_to(2).expect("step 2 exists");
        game.apply_move(Position::BottomLeft);
        assert!(AlternatingTurnInvariant::holds(&game));
    }
}
