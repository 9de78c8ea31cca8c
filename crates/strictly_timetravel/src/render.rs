//! Plain-text rendering of a game, for non-interactive output.

use strictly_timeline::{GameState, MoveListEntry, Position, Square};

/// Renders the viewed board, its status and the move list.
///
/// Squares on the winning line are wrapped in brackets. The current
/// move-list row is marked with `>`.
pub fn render_text(game: &GameState) -> String {
    let mut out = String::new();
    out.push_str(&render_board(game));
    out.push_str("\n\n");
    out.push_str(&game.status().to_string());
    out.push_str(&format!(
        "\n\nMoves (sort: {}):\n",
        game.sort_order().label()
    ));
    for entry in game.move_list() {
        out.push_str(&render_entry(&entry));
        out.push('\n');
    }
    out
}

fn render_board(game: &GameState) -> String {
    let board = game.current_board();
    let line = game.winning_line();

    let rows: Vec<String> = Position::ALL
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|&pos| {
                    let symbol = match board.get(pos) {
                        Square::Empty => (pos.to_index() + 1).to_string(),
                        Square::Occupied(player) => player.to_string(),
                    };
                    if line.is_some_and(|l| l.contains(pos)) {
                        format!("[{}]", symbol)
                    } else {
                        format!(" {} ", symbol)
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    rows.join("\n---+---+---\n")
}

fn render_entry(entry: &MoveListEntry) -> String {
    let marker = if entry.is_current { '>' } else { ' ' };
    match entry.last_move {
        Some(mv) => format!("{} {} ({})", marker, entry.label(), mv),
        None => format!("{} {}", marker, entry.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_new_game() {
        let game = GameState::new();
        let text = render_text(&game);
        assert!(text.starts_with(" 1 | 2 | 3 \n---+---+---\n"));
        assert!(text.contains("Next player: X"));
        assert!(text.contains("> Go to game start"));
    }

    #[test]
    fn test_render_highlights_winning_line() {
        let mut game = GameState::new();
        for index in [0, 4, 1, 5, 2] {
            game.apply_index(index).expect("index in range");
        }
        let text = render_text(&game);
        assert!(text.starts_with("[X]|[X]|[X]\n"));
        assert!(text.contains("Winner is X"));
        assert!(text.contains("> Go to move #5 (X at (1, 3))"));
    }
}
