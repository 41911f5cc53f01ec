//! Game setup and an interactive ladder session.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MoveError, SolveHintError};
use crate::index::{hamming_distance, normalize, WordIndex};
use crate::solver::{Hint, LadderSolver, SolveOutcome};

/// Pick two distinct words of the same length.
///
/// Only lengths with at least two words are eligible, weighted by how many words
/// they hold. The pair is not guaranteed to be connected.
pub fn random_pair<R: Rng + ?Sized>(index: &WordIndex, rng: &mut R) -> Option<(String, String)> {
    let candidates: Vec<&str> = index
        .lengths()
        .filter(|&len| index.words_of_length(len).nth(1).is_some())
        .flat_map(|len| index.words_of_length(len))
        .collect();

    let from = *candidates.choose(rng)?;
    let len = from.chars().count();
    let others: Vec<&str> = index.words_of_length(len).filter(|&w| w != from).collect();
    let to = *others.choose(rng)?;

    Some((from.to_string(), to.to_string()))
}

/// True when every word is in the dictionary. An empty list is valid.
pub fn validate_words<I, S>(index: &WordIndex, words: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words.into_iter().all(|w| index.contains(w.as_ref()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was accepted; this many moves have been played so far.
    Continue { moves: usize },
    Solved { moves: usize },
}

/// One player's attempt at a ladder.
#[derive(Debug, Clone)]
pub struct LadderGame<'a> {
    solver: LadderSolver<'a>,
    target: String,
    chain: Vec<String>,
}

impl<'a> LadderGame<'a> {
    /// Start a game. Both words must be in the dictionary and of equal length.
    pub fn new(solver: LadderSolver<'a>, start: &str, target: &str) -> Result<Self, SolveHintError> {
        // Validates the pair and rejects unconnected games up front.
        solver.solve(start, target).into_result(start, target)?;
        Ok(Self {
            solver,
            target: normalize(target),
            chain: vec![normalize(start)],
        })
    }

    /// Start a game on a random connected pair, giving up after `attempts` draws.
    pub fn random<R: Rng + ?Sized>(solver: LadderSolver<'a>, rng: &mut R, attempts: usize) -> Option<Self> {
        (0..attempts).find_map(|_| {
            let (start, target) = random_pair(solver.index(), rng)?;
            Self::new(solver, &start, &target).ok()
        })
    }

    pub fn start(&self) -> &str {
        &self.chain[0]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn current(&self) -> &str {
        &self.chain[self.chain.len() - 1]
    }

    /// Words played so far, starting with the start word.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    pub fn moves(&self) -> usize {
        self.chain.len() - 1
    }

    pub fn is_solved(&self) -> bool {
        self.current() == self.target
    }

    pub fn play(&mut self, word: &str) -> Result<MoveOutcome, MoveError> {
        if self.is_solved() {
            return Err(MoveError::AlreadySolved);
        }
        let word = normalize(word);
        if !self.solver.index().contains(&word) {
            return Err(MoveError::UnknownWord(word));
        }
        if hamming_distance(self.current(), &word) != Some(1) {
            return Err(MoveError::NotAdjacent {
                current: self.current().to_string(),
                word,
            });
        }

        self.chain.push(word);
        let moves = self.moves();
        if self.is_solved() {
            Ok(MoveOutcome::Solved { moves })
        } else {
            Ok(MoveOutcome::Continue { moves })
        }
    }

    /// Take back the last move.
    pub fn undo(&mut self) -> Result<&str, MoveError> {
        if self.chain.len() < 2 {
            return Err(MoveError::NothingToUndo);
        }
        self.chain.pop();
        Ok(self.current())
    }

    /// Best next word from the current position.
    pub fn hint(&self) -> Result<Hint, SolveHintError> {
        self.solver.hint(self.current(), &self.target)
    }

    /// Steps in a shortest ladder from the start word.
    pub fn optimal_steps(&self) -> Option<usize> {
        match self.solver.solve(self.start(), &self.target) {
            SolveOutcome::Found(ladder) => Some(ladder.steps()),
            _ => None,
        }
    }
}
