//! Error types shared by the solver, the dictionary store and the game session.

use std::path::PathBuf;

/// Why a solve request was rejected before any search ran.
///
/// Every variant is caller-correctable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("word must not be empty")]
    EmptyWord,
    #[error("dictionary is empty")]
    EmptyDictionary,
    #[error("'{0}' is not in the dictionary")]
    UnknownWord(String),
    #[error("'{start}' and '{end}' have different lengths")]
    LengthMismatch { start: String, end: String },
}

/// Failure side of [`crate::SolveOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("no ladder exists from '{start}' to '{end}'")]
    Unreachable { start: String, end: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HintError {
    #[error("the ladder is already solved")]
    AlreadySolved,
}

/// Either half of [`crate::LadderSolver::hint`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveHintError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Hint(#[from] HintError),
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {path} contains no words")]
    Empty { path: PathBuf },
}

/// A rejected move in an interactive [`crate::LadderGame`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the ladder is already solved")]
    AlreadySolved,
    #[error("'{0}' is not in the dictionary")]
    UnknownWord(String),
    #[error("'{word}' is not one letter away from '{current}'")]
    NotAdjacent { current: String, word: String },
    #[error("nothing to undo")]
    NothingToUndo,
}
