//! Step pointer invariant: the viewed step always exists.

use super::Invariant;
use crate::GameState;

/// Invariant: `0 <= step_number < history.len()`.
pub struct StepInRangeInvariant;

impl Invariant<GameState> for StepInRangeInvariant {
    fn holds(game: &GameState) -> bool {
        game.step_number() < game.history().len()
    }

    fn description() -> &'static str {
        "Step number points at a recorded history entry"
    }
}
