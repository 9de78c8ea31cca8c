//! User intents forwarded by a presentation surface.

use super::action::MoveOutcome;
use super::error::TimelineError;
use super::game::GameState;
use tracing::instrument;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// A board cell (0-8) was clicked.
    CellClicked(usize),
    /// A move-list row was clicked; carries its step number.
    HistoryEntryClicked(usize),
    /// A sort button was pressed; `true` for ascending.
    SortToggled(bool),
    /// Start a fresh game.
    NewGame,
}

impl GameState {
    /// Routes an intent to the matching operation.
    ///
    /// Returns the move outcome for [`Intent::CellClicked`] and `None`
    /// for everything else.
    ///
    /// # Errors
    ///
    /// Propagates [`TimelineError`] for out-of-range cells or steps.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<MoveOutcome>, TimelineError> {
        match intent {
            Intent::CellClicked(index) => self.apply_index(index).map(Some),
            Intent::HistoryEntryClicked(step) => self.jump_to(step).map(|()| None),
            Intent::SortToggled(ascending) => {
                self.set_sort_order(ascending);
                Ok(None)
            }
            Intent::NewGame => {
                self.reset();
                Ok(None)
            }
        }
    }
}
