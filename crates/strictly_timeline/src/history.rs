//! Board snapshot history.
//!
//! The history is never empty: entry 0 is the empty board at game start
//! and every later entry is the board right after one move. Branches are
//! not kept. Committing from an earlier step discards everything after
//! it before appending.

use super::{Board, Move, TimelineError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A board snapshot taken immediately after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The board after the move.
    pub board: Board,
    /// The move that produced this board; `None` for the game start.
    pub last_move: Option<Move>,
}

impl HistoryEntry {
    /// The entry for the start of a game.
    pub const fn start() -> Self {
        Self {
            board: Board::new(),
            last_move: None,
        }
    }
}

static GAME_START: HistoryEntry = HistoryEntry::start();

/// Ordered list of board snapshots, index 0 = game start.
///
/// Deserialization rejects a list that does not begin with the empty
/// starting board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord")]
pub struct History {
    entries: Vec<HistoryEntry>,
}

/// Unchecked wire form of a [`History`].
#[derive(Deserialize)]
struct HistoryRecord {
    entries: Vec<HistoryEntry>,
}

impl TryFrom<HistoryRecord> for History {
    type Error = TimelineError;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        match record.entries.first() {
            None => Err(TimelineError::EmptyHistory),
            Some(first) if *first != HistoryEntry::start() => Err(TimelineError::CorruptState {
                description: "History must begin with the empty starting board".to_string(),
            }),
            Some(_) => Ok(Self {
                entries: record.entries,
            }),
        }
    }
}

impl History {
    /// Creates a history holding only the empty starting board.
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::start()],
        }
    }

    /// Number of entries, including the game start.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history has no entries.
    ///
    /// Construction, `reset` and deserialization all keep the starting
    /// entry, so this returns false for every reachable `History`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at the given step.
    pub fn get(&self, step: usize) -> Option<&HistoryEntry> {
        self.entries.get(step)
    }

    /// Returns the most recent entry.
    pub fn last(&self) -> &HistoryEntry {
        self.entries.last().unwrap_or(&GAME_START)
    }

    /// Iterates entries from game start onward.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Entries as a slice.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Truncates to `[0..=step]`, appends `entry`, and returns its step.
    ///
    /// `step` is clamped to the last entry.
    #[instrument(skip(self, entry), fields(len = self.entries.len()))]
    pub fn commit(&mut self, step: usize, entry: HistoryEntry) -> usize {
        let keep = (step + 1).min(self.entries.len());
        if keep < self.entries.len() {
            debug!(
                discarded = self.entries.len() - keep,
                "Discarding future entries"
            );
        }
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Drops everything except a fresh empty board.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(HistoryEntry::start());
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
