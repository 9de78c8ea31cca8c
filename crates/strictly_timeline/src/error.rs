//! Error types for the timeline engine.

use derive_more::{Display, Error};

/// Caller contract violations and rejected saved states.
///
/// Occupied squares and decided games are not errors; see
/// [`MoveOutcome::Ignored`](crate::MoveOutcome::Ignored). The index
/// variants fire when a caller passes an index outside the ranges the
/// engine publishes. The state variants fire when deserialized data
/// would break a timeline invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TimelineError {
    /// Cell index outside 0-8.
    #[display("Cell index {index} is out of bounds (must be 0-8)")]
    InvalidCell {
        /// The offending index.
        index: usize,
    },

    /// Step number outside the recorded history.
    #[display("Step {step} is out of range (history has {len} entries)")]
    StepOutOfRange {
        /// The requested step.
        step: usize,
        /// History length at the time of the request.
        len: usize,
    },

    /// A deserialized history had no entries.
    #[display("History has no entries")]
    EmptyHistory,

    /// A deserialized state broke a timeline invariant.
    #[display("Corrupt game state: {description}")]
    CorruptState {
        /// What was wrong with it.
        description: String,
    },
}
