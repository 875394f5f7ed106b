// Error taxonomy for table construction and selection.

use thiserror::Error;

use crate::player::Position;

/// Failures raised while planning a lineup, a transfer or a squad.
///
/// None of these are retried: they describe data that cannot satisfy the
/// requested selection, and no partial result is returned alongside them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("no candidates left for the {ranking} pick")]
    EmptyCandidateSet { ranking: &'static str },

    #[error("need {needed} eligible players but only {available} are available")]
    InsufficientSquadSize { needed: usize, available: usize },

    #[error("player not found in table: {name}")]
    InvalidPlayerReference { name: String },

    #[error("no {position} slots left to fill")]
    QuotaExhausted { position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate player name in table: {name}")]
    DuplicatePlayer { name: String },

    #[error("player {name} has a non-finite {field}")]
    NonFiniteValue { name: String, field: &'static str },
}
