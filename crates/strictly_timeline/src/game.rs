//! Game state with time travel through the move history.
//!
//! [`GameState`] owns the history of board snapshots, a pointer to the
//! snapshot being viewed, and the move-list sort preference. The player
//! to move is never stored; it is derived from the parity of the step
//! pointer, so jumping around the history cannot desynchronise it.

use super::action::{IgnoreReason, Move, MoveOutcome};
use super::error::TimelineError;
use super::history::{History, HistoryEntry};
use super::rules::{self, WinningLine};
use super::{Board, GameStatus, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Display order of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Game start first, most recent move last.
    #[default]
    Ascending,
    /// Most recent move first.
    Descending,
}

impl SortOrder {
    /// Maps the `ascending` flag used by front ends.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    /// Returns true for [`SortOrder::Ascending`].
    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }

    /// Returns the other order.
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// One row of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveListEntry {
    /// History index this row jumps to.
    pub step: usize,
    /// True for the entry currently being viewed.
    pub is_current: bool,
    /// The move that produced the entry; `None` for the game start.
    pub last_move: Option<Move>,
}

impl MoveListEntry {
    /// Button text for this row.
    pub fn label(&self) -> String {
        if self.step == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", self.step)
        }
    }
}

/// Authoritative game state: history, step pointer, sort preference.
///
/// Deserialization checks the same invariants every mutator keeps, so a
/// loaded state is as trustworthy as one built by play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct GameState {
    history: History,
    step_number: usize,
    sort_order: SortOrder,
}

/// Unchecked wire form of a [`GameState`].
#[derive(Deserialize)]
struct GameRecord {
    history: History,
    step_number: usize,
    #[serde(default)]
    sort_order: SortOrder,
}

impl TryFrom<GameRecord> for GameState {
    type Error = TimelineError;

    #[instrument(skip(record), fields(step = record.step_number, len = record.history.len()))]
    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        use super::invariants::{InvariantSet, TimelineInvariants};

        if record.step_number >= record.history.len() {
            return Err(TimelineError::StepOutOfRange {
                step: record.step_number,
                len: record.history.len(),
            });
        }

        let state = Self {
            history: record.history,
            step_number: record.step_number,
            sort_order: record.sort_order,
        };
        TimelineInvariants::check_all(&state).map_err(|violations| {
            let description = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%description, "Rejected deserialized game state");
            TimelineError::CorruptState { description }
        })?;
        Ok(state)
    }
}

impl GameState {
    /// Creates a game at its start: one empty board, step 0, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            step_number: 0,
            sort_order: SortOrder::default(),
        }
    }

    /// Creates a game with the given move-list order.
    #[instrument]
    pub fn with_sort_order(sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            ..Self::new()
        }
    }

    /// Places the mark of the player to move on `pos`.
    ///
    /// Ignored without touching any state when the viewed board already
    /// has a winner or the square is occupied. Otherwise the history is
    /// truncated after the viewed step, the new board appended, and the
    /// step pointer moved onto it.
    #[instrument(skip(self), fields(step = self.step_number))]
    pub fn apply_move(&mut self, pos: Position) -> MoveOutcome {
        let current = *self.current_entry();

        if let Some(winner) = rules::check_winner(&current.board) {
            debug!(%winner, "Move ignored, game already won");
            return MoveOutcome::Ignored(IgnoreReason::GameWon(winner));
        }

        if !current.board.is_empty(pos) {
            debug!(position = %pos, "Move ignored, square occupied");
            return MoveOutcome::Ignored(IgnoreReason::SquareOccupied(pos));
        }

        let player = self.next_player();
        let mut board = current.board;
        board.set(pos, Square::Occupied(player));

        self.step_number = self.history.commit(
            self.step_number,
            HistoryEntry {
                board,
                last_move: Some(Move::new(player, pos)),
            },
        );
        info!(%player, position = %pos, step = self.step_number, "Move applied");

        self.debug_check_invariants();
        MoveOutcome::Applied {
            step: self.step_number,
            player,
        }
    }

    /// Index-based [`apply_move`](Self::apply_move).
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::InvalidCell`] if `index` is not in 0-8.
    #[instrument(skip(self))]
    pub fn apply_index(&mut self, index: usize) -> Result<MoveOutcome, TimelineError> {
        let pos = Position::from_index(index).ok_or(TimelineError::InvalidCell { index })?;
        Ok(self.apply_move(pos))
    }

    /// Views the board at `step` without discarding any history.
    ///
    /// The next successful move from there truncates everything after
    /// `step`.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::StepOutOfRange`] if `step` is not a
    /// recorded history index.
    #[instrument(skip(self), fields(from = self.step_number))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), TimelineError> {
        if step >= self.history.len() {
            return Err(TimelineError::StepOutOfRange {
                step,
                len: self.history.len(),
            });
        }

        self.step_number = step;
        debug!(step, "Jumped");
        self.debug_check_invariants();
        Ok(())
    }

    /// Sets the move-list order. Never touches history or the step.
    #[instrument(skip(self))]
    pub fn set_sort_order(&mut self, ascending: bool) {
        self.sort_order = SortOrder::from_ascending(ascending);
    }

    /// Flips the move-list order.
    #[instrument(skip(self))]
    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggle();
    }

    /// Starts over with a single empty board. The sort order is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.history.reset();
        self.step_number = 0;
        info!("Game reset");
    }

    /// Returns the history entry being viewed.
    pub fn current_entry(&self) -> &HistoryEntry {
        // step_number < history.len() is kept by every mutator and by
        // deserialization.
        self.history.get(self.step_number).unwrap_or_else(|| self.history.last())
    }

    /// Returns the board being viewed.
    pub fn current_board(&self) -> &Board {
        &self.current_entry().board
    }

    /// Returns the viewed step.
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Returns the move-list order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Returns the full recorded history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Player to move at the viewed step.
    pub fn next_player(&self) -> Player {
        Player::for_step(self.step_number)
    }

    /// Status of the viewed board. A winner takes precedence over a full
    /// board.
    pub fn status(&self) -> GameStatus {
        let board = self.current_board();
        if let Some(winner) = rules::check_winner(board) {
            GameStatus::Won(winner)
        } else if rules::is_draw(board) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress(self.next_player())
        }
    }

    /// Winning line on the viewed board, for highlighting.
    pub fn winning_line(&self) -> Option<WinningLine> {
        rules::winning_line(self.current_board())
    }

    /// One row per history entry, ordered by the sort preference.
    ///
    /// Recomputed from the history on every call.
    pub fn move_list(&self) -> Vec<MoveListEntry> {
        let entries = self
            .history
            .iter()
            .enumerate()
            .map(|(step, entry)| MoveListEntry {
                step,
                is_current: step == self.step_number,
                last_move: entry.last_move,
            });

        match self.sort_order {
            SortOrder::Ascending => entries.collect(),
            SortOrder::Descending => entries.rev().collect(),
        }
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        use super::invariants::{InvariantSet, TimelineInvariants};

        if let Err(violations) = TimelineInvariants::check_all(self) {
            for violation in &violations {
                warn!(description = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Timeline invariants violated");
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_check_invariants(&self) {}

    #[cfg(test)]
    pub(crate) fn corrupt_step_for_test(&mut self, step: usize) {
        self.step_number = step;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut GameState, indices: &[usize]) {
        for &index in indices {
            game.apply_index(index).expect("index in range");
        }
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.step_number(), 0);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.current_board(), &Board::new());
        assert_eq!(game.status(), GameStatus::InProgress(Player::X));
        assert_eq!(game.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn test_apply_move_places_mark_of_player_to_move() {
        let mut game = GameState::new();
        let outcome = game.apply_move(Position::Center);
        assert_eq!(outcome, MoveOutcome::Applied { step: 1, player: Player::X });
        assert_eq!(game.current_board().get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(game.next_player(), Player::O);
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut game = GameState::new();
        game.apply_move(Position::Center);
        let before = game.clone();

        let outcome = game.apply_move(Position::Center);
        assert_eq!(
            outcome,
            MoveOutcome::Ignored(IgnoreReason::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_move_after_win_is_ignored() {
        let mut game = GameState::new();
        play(&mut game, &[0, 4, 1, 5, 2]);
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        let before = game.clone();

        let outcome = game.apply_move(Position::BottomLeft);
        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::GameWon(Player::X)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_apply_index_out_of_bounds() {
        let mut game = GameState::new();
        assert_eq!(
            game.apply_index(9),
            Err(TimelineError::InvalidCell { index: 9 })
        );
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_jump_keeps_forward_history() {
        let mut game = GameState::new();
        play(&mut game, &[0, 4, 8]);
        game.jump_to(1).expect("step 1 exists");

        assert_eq!(game.step_number(), 1);
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.next_player(), Player::O);

        game.jump_to(3).expect("redo by jumping forward");
        assert_eq!(game.current_board().count_marks(), 3);
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut game = GameState::new();
        play(&mut game, &[0]);
        assert_eq!(
            game.jump_to(2),
            Err(TimelineError::StepOutOfRange { step: 2, len: 2 })
        );
        assert_eq!(game.step_number(), 1);
    }

    #[test]
    fn test_move_after_jump_truncates() {
        let mut game = GameState::new();
        play(&mut game, &[0, 4, 8, 2]);
        game.jump_to(1).expect("step 1 exists");

        let outcome = game.apply_move(Position::BottomLeft);
        assert_eq!(outcome, MoveOutcome::Applied { step: 2, player: Player::O });
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.current_board().get(Position::Center), Square::Empty);
    }

    #[test]
    fn test_jump_back_from_won_board_allows_play() {
        let mut game = GameState::new();
        play(&mut game, &[0, 4, 1, 5, 2]);
        game.jump_to(4).expect("step 4 exists");
        assert_eq!(game.status(), GameStatus::InProgress(Player::X));

        assert!(game.apply_move(Position::BottomRight).is_applied());
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn test_move_list_follows_sort_order() {
        let mut game = GameState::new();
        play(&mut game, &[0, 4]);

        let steps: Vec<usize> = game.move_list().iter().map(|e| e.step).collect();
        assert_eq!(steps, [0, 1, 2]);

        game.set_sort_order(false);
        let steps: Vec<usize> = game.move_list().iter().map(|e| e.step).collect();
        assert_eq!(steps, [2, 1, 0]);
        assert!(game.move_list()[0].is_current);
    }

    #[test]
    fn test_move_list_labels() {
        let mut game = GameState::new();
        play(&mut game, &[4]);
        let list = game.move_list();
        assert_eq!(list[0].label(), "Go to game start");
        assert_eq!(list[1].label(), "Go to move #1");
        assert_eq!(list[1].last_move, Some(Move::new(Player::X, Position::Center)));
    }

    #[test]
    fn test_toggle_sort_order() {
        let mut game = GameState::new();
        game.toggle_sort_order();
        assert_eq!(game.sort_order(), SortOrder::Descending);
        game.toggle_sort_order();
        assert_eq!(game.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn test_full_board_with_winner_is_won_not_draw() {
        let mut game = GameState::new();
        play(&mut game, &[0, 2, 1, 3, 6, 5, 8, 7, 4]);
        assert!(rules::is_full(game.current_board()));
        assert_eq!(game.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let mut game = GameState::new();
        play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn test_deserialize_rejects_empty_history() {
        let json = r#"{"history":{"entries":[]},"step_number":0,"sort_order":"Ascending"}"#;
        let err = serde_json::from_str::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("History has no entries"));
    }

    #[test]
    fn test_deserialize_rejects_step_past_history() {
        let mut value = serde_json::to_value(GameState::new()).expect("serializes");
        value["step_number"] = serde_json::json!(5);
        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(err.to_string().contains("Step 5 is out of range (history has 1 entries)"));
    }

    #[test]
    fn test_deserialize_rejects_skipped_move() {
        use crate::invariants::{Invariant, MonotonicHistoryInvariant};

        let mut game = GameState::new();
        play(&mut game, &[0, 4]);
        let mut value = serde_json::to_value(&game).expect("serializes");
        let entries = value["history"]["entries"]
            .as_array_mut()
            .expect("entries array");
        entries.remove(1);
        value["step_number"] = serde_json::json!(1);

        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(
            err.to_string()
                .contains(<MonotonicHistoryInvariant as Invariant<GameState>>::description())
        );
    }

    #[test]
    fn test_deserialize_accepts_played_game() {
        let mut game = GameState::with_sort_order(SortOrder::Descending);
        play(&mut game, &[0, 4, 1]);
        game.jump_to(1).expect("step in range");

        let json = serde_json::to_string(&game).expect("serializes");
        let loaded: GameState = serde_json::from_str(&json).expect("valid game");
        assert_eq!(loaded, game);
        assert_eq!(loaded.current_board(), game.current_board());
    }

    #[test]
    fn test_reset_keeps_sort_order() {
        let mut game = GameState::with_sort_order(SortOrder::Descending);
        play(&mut game, &[0, 4, 8]);
        game.reset();

        assert_eq!(game.step_number(), 0);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.sort_order(), SortOrder::Descending);
    }
}
