//! # Word Ladder
//!
//! A word ladder game: turn a start word into a target word one letter at a time,
//! where every intermediate word must be in the dictionary.
//!
//! The solver runs a breadth-first search over the implicit one-substitution graph,
//! using a wildcard-bucket index so neighbor lookup costs O(word length) instead of a
//! scan of the whole dictionary. The HTTP front end and CLI are thin layers on top.

pub mod config;
pub mod error;
pub mod game;
pub mod index;
pub mod server;
pub mod solver;
pub mod store;

use std::path::Path;

pub use config::ServerConfig;
pub use error::{DictionaryError, HintError, InvalidInput, MoveError, SolveError, SolveHintError};
pub use game::{random_pair, validate_words, LadderGame, MoveOutcome};
pub use index::{hamming_distance, normalize, WordIndex};
pub use solver::{solve, Hint, Ladder, LadderSolver, LadderStats, SolveOutcome, SolverConfig};
pub use store::DictionaryStore;

/// Split a whitespace-delimited word list.
pub fn parse_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Load the dictionary bundled with the crate.
pub fn load_dictionary() -> Vec<String> {
    parse_words(include_str!("../assets/words.txt"))
}

/// Read a word list from disk.
pub fn read_dictionary(path: impl AsRef<Path>) -> Result<Vec<String>, DictionaryError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_words(&text))
}
