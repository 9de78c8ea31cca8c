//! Application state and key handling.
//!
//! Kept free of any terminal handle so it can be driven from tests.

use crossterm::event::KeyCode;
use strictly_timeline::{GameState, Intent, MoveOutcome, Position, SortOrder, TimelineError};
use tracing::{debug, instrument};

use super::input::{digit_to_cell, move_cursor};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    #[default]
    Board,
    /// Arrow keys move through the move list.
    Moves,
}

impl Focus {
    /// Switches to the other panel.
    pub fn toggle(self) -> Self {
        match self {
            Focus::Board => Focus::Moves,
            Focus::Moves => Focus::Board,
        }
    }
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    game: GameState,
    cursor: Position,
    focus: Focus,
    /// Row of the move list under the selection, in display order.
    selected: usize,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(sort_order: SortOrder) -> Self {
        let game = GameState::with_sort_order(sort_order);
        let status_message = game.status().to_string();
        Self {
            game,
            cursor: Position::Center,
            focus: Focus::Board,
            selected: 0,
            status_message,
            should_quit: false,
        }
    }

    /// Gets the current game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Focused panel.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Selected move-list row, in display order.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    ///
    /// # Errors
    ///
    /// Only fails if an intent built here falls outside the engine's
    /// published ranges.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Result<(), TimelineError> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("User quit");
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focus = self.focus.toggle();
                self.select_current();
            }
            KeyCode::Char('a') => self.sort(true)?,
            KeyCode::Char('d') => self.sort(false)?,
            KeyCode::Char('s') => {
                let ascending = !self.game.sort_order().is_ascending();
                self.sort(ascending)?;
            }
            KeyCode::Char('n') => {
                self.game.dispatch(Intent::NewGame)?;
                self.cursor = Position::Center;
                self.select_current();
                self.status_message = format!("New game. {}", self.game.status());
            }
            KeyCode::Char(' ') if self.focus == Focus::Board => {
                self.click_cell(self.cursor.to_index())?;
            }
            KeyCode::Char(c) => {
                if let Some(cell) = digit_to_cell(c) {
                    self.focus = Focus::Board;
                    self.click_cell(cell)?;
                }
            }
            _ => match self.focus {
                Focus::Board => self.handle_board_key(key)?,
                Focus::Moves => self.handle_moves_key(key)?,
            },
        }
        Ok(())
    }

    fn handle_board_key(&mut self, key: KeyCode) -> Result<(), TimelineError> {
        match key {
            KeyCode::Enter => self.click_cell(self.cursor.to_index()),
            _ => {
                self.cursor = move_cursor(self.cursor, key);
                Ok(())
            }
        }
    }

    fn handle_moves_key(&mut self, key: KeyCode) -> Result<(), TimelineError> {
        let rows = self.game.move_list();
        match key {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(rows.len() - 1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = rows.len() - 1,
            KeyCode::Enter => {
                if let Some(entry) = rows.get(self.selected) {
                    self.game.dispatch(Intent::HistoryEntryClicked(entry.step))?;
                    self.status_message = if entry.step == 0 {
                        format!("Viewing game start. {}", self.game.status())
                    } else {
                        format!("Viewing move #{}. {}", entry.step, self.game.status())
                    };
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn click_cell(&mut self, cell: usize) -> Result<(), TimelineError> {
        let outcome = self.game.dispatch(Intent::CellClicked(cell))?;
        self.status_message = match outcome {
            Some(MoveOutcome::Ignored(reason)) => format!("{}. {}", reason, self.game.status()),
            _ => self.game.status().to_string(),
        };
        self.select_current();
        Ok(())
    }

    fn sort(&mut self, ascending: bool) -> Result<(), TimelineError> {
        self.game.dispatch(Intent::SortToggled(ascending))?;
        self.select_current();
        Ok(())
    }

    /// Moves the selection onto the row of the viewed step.
    fn select_current(&mut self) {
        self.selected = self
            .game
            .move_list()
            .iter()
            .position(|entry| entry.is_current)
            .unwrap_or(0);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SortOrder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_timeline::{GameStatus, Player, Square};

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key).expect("keys map to valid intents");
        }
    }

    #[test]
    fn test_digits_place_marks() {
        let mut app = App::default();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('5')]);
        let board = app.game().current_board();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(app.status_message(), "Next player: X");
    }

    #[test]
    fn test_cursor_and_enter() {
        let mut app = App::default();
        press(&mut app, &[KeyCode::Up, KeyCode::Left, KeyCode::Enter]);
        assert_eq!(
            app.game().current_board().get(Position::TopLeft),
            Square::Occupied(Player::X)
        );
    }

    #[test]
    fn test_occupied_square_explained() {
        let mut app = App::default();
        press(&mut app, &[KeyCode::Char('5'), KeyCode::Char('5')]);
        assert_eq!(app.game().history().len(), 2);
        assert_eq!(app.status_message(), "Center is already occupied. Next player: O");
    }

    #[test]
    fn test_jump_through_move_list() {
        let mut app = App::default();
        press(
            &mut app,
            &[KeyCode::Char('1'), KeyCode::Char('5'), KeyCode::Char('9')],
        );
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.focus(), Focus::Moves);
        assert_eq!(app.selected(), 3);

        press(&mut app, &[KeyCode::Up, KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.game().step_number(), 1);
        assert_eq!(app.game().history().len(), 4);
        assert_eq!(app.status_message(), "Viewing move #1. Next player: O");
    }

    #[test]
    fn test_descending_selection_follows_current() {
        let mut app = App::default();
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('5')]);
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.game().sort_order(), SortOrder::Descending);
        assert_eq!(app.selected(), 0);

        press(&mut app, &[KeyCode::Tab, KeyCode::End, KeyCode::Enter]);
        assert_eq!(app.game().step_number(), 0);
        assert_eq!(app.selected(), 2);

        press(&mut app, &[KeyCode::Char('s')]);
        assert_eq!(app.game().sort_order(), SortOrder::Ascending);
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn test_win_then_new_game() {
        let mut app = App::default();
        for c in ['1', '5', '2', '6', '3'] {
            press(&mut app, &[KeyCode::Char(c)]);
        }
        assert_eq!(app.game().status(), GameStatus::Won(Player::X));

        press(&mut app, &[KeyCode::Char('9')]);
        assert_eq!(app.status_message(), "X has already won. Winner is X");

        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.game().history().len(), 1);
        assert_eq!(app.cursor(), Position::Center);
    }

    #[test]
    fn test_quit() {
        let mut app = App::default();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_quit());
    }
}
