//! Shortest word ladder search.
//!
//! The ladder graph is never materialized: nodes are dictionary words and edges are
//! discovered on demand through the [`WordIndex`] buckets. A breadth-first search
//! from the start word records each word's predecessor the first time it is
//! enqueued, so the first time the end word is reached its predecessor chain is a
//! shortest ladder.

use std::collections::{BTreeMap, VecDeque};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{HintError, InvalidInput, SolveError, SolveHintError};
use crate::index::{hamming_distance, normalize, WordId, WordIndex};

/// Next word to play and the number of steps left after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    #[serde(rename = "hint")]
    pub word: String,
    #[serde(rename = "numLeft")]
    pub remaining: usize,
}

/// A chain of words from start to end inclusive, each one substitution from the last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ladder {
    words: Vec<String>,
}

impl Ladder {
    fn new(words: Vec<String>) -> Self {
        debug_assert!(!words.is_empty());
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn start(&self) -> &str {
        &self.words[0]
    }

    pub fn end(&self) -> &str {
        &self.words[self.words.len() - 1]
    }

    /// Number of words including both endpoints.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of substitutions.
    pub fn steps(&self) -> usize {
        self.words.len() - 1
    }

    /// Every word is in `index` and each consecutive pair differs in exactly one position.
    pub fn is_valid_in(&self, index: &WordIndex) -> bool {
        self.words.iter().all(|w| index.contains(w))
            && self
                .words
                .windows(2)
                .all(|pair| hamming_distance(&pair[0], &pair[1]) == Some(1))
    }

    /// The word after the start, and how many steps remain once it is played.
    pub fn hint(&self) -> Result<Hint, HintError> {
        if self.words.len() < 2 {
            return Err(HintError::AlreadySolved);
        }
        Ok(Hint {
            word: self.words[1].clone(),
            remaining: self.words.len() - 2,
        })
    }
}

/// Result of a single solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Found(Ladder),
    /// Both words are valid but no ladder connects them.
    Unreachable,
    InvalidInput(InvalidInput),
}

impl SolveOutcome {
    pub fn ladder(&self) -> Option<&Ladder> {
        match self {
            SolveOutcome::Found(ladder) => Some(ladder),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SolveOutcome::Found(_))
    }

    /// Fold the outcome into a `Result`, naming the endpoints if unreachable.
    pub fn into_result(self, start: &str, end: &str) -> Result<Ladder, SolveError> {
        match self {
            SolveOutcome::Found(ladder) => Ok(ladder),
            SolveOutcome::Unreachable => Err(SolveError::Unreachable {
                start: normalize(start),
                end: normalize(end),
            }),
            SolveOutcome::InvalidInput(reason) => Err(reason.into()),
        }
    }
}

/// Solver tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Longest ladder (in steps) worth searching for. Longer ladders are reported as
    /// unreachable. `None` searches the whole connected component.
    pub max_depth: Option<usize>,
}

/// Aggregate of many solves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadderStats {
    /// Ladder length in steps mapped to how many pairs needed that many.
    pub steps: BTreeMap<usize, usize>,
    pub unreachable: usize,
    pub invalid: usize,
}

impl LadderStats {
    pub fn solved(&self) -> usize {
        self.steps.values().sum()
    }

    pub fn total(&self) -> usize {
        self.solved() + self.unreachable + self.invalid
    }

    pub fn average_steps(&self) -> Option<f64> {
        let solved = self.solved();
        if solved == 0 {
            return None;
        }
        let total: usize = self.steps.iter().map(|(s, c)| s * c).sum();
        Some(total as f64 / solved as f64)
    }
}

/// Breadth-first ladder solver over a borrowed index.
///
/// The solver holds no mutable state, so one index can serve any number of
/// concurrent solvers.
#[derive(Debug, Clone, Copy)]
pub struct LadderSolver<'a> {
    index: &'a WordIndex,
    config: SolverConfig,
}

impl<'a> LadderSolver<'a> {
    pub fn new(index: &'a WordIndex) -> Self {
        Self::with_config(index, SolverConfig::default())
    }

    pub fn with_config(index: &'a WordIndex, config: SolverConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &'a WordIndex {
        self.index
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    fn validate(&self, start: &str, end: &str) -> Result<(WordId, WordId), InvalidInput> {
        if start.is_empty() || end.is_empty() {
            return Err(InvalidInput::EmptyWord);
        }
        if self.index.is_empty() {
            return Err(InvalidInput::EmptyDictionary);
        }
        if start.chars().count() != end.chars().count() {
            return Err(InvalidInput::LengthMismatch {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let from = self
            .index
            .id_of(start)
            .ok_or_else(|| InvalidInput::UnknownWord(start.to_string()))?;
        let to = self
            .index
            .id_of(end)
            .ok_or_else(|| InvalidInput::UnknownWord(end.to_string()))?;
        Ok((from, to))
    }

    /// Find a shortest ladder from `start` to `end`.
    ///
    /// Among equally short ladders the one returned is fixed by dictionary order:
    /// neighbors are expanded in the order the index yields them.
    pub fn solve(&self, start: &str, end: &str) -> SolveOutcome {
        let start = normalize(start);
        let end = normalize(end);

        let (from, to) = match self.validate(&start, &end) {
            Ok(ids) => ids,
            Err(reason) => return SolveOutcome::InvalidInput(reason),
        };

        if from == to {
            return SolveOutcome::Found(Ladder::new(vec![start]));
        }

        match self.search(from, to) {
            Some(ids) => SolveOutcome::Found(Ladder::new(
                ids.into_iter().map(|id| self.index.word(id).to_string()).collect(),
            )),
            None => SolveOutcome::Unreachable,
        }
    }

    fn search(&self, from: WordId, to: WordId) -> Option<Vec<WordId>> {
        const UNSEEN: WordId = WordId::MAX;

        let mut previous = vec![UNSEEN; self.index.len()];
        let mut queue = VecDeque::new();
        previous[from as usize] = from;
        queue.push_back((from, 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            if self.config.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            for next in self.index.neighbor_ids(current) {
                if previous[next as usize] != UNSEEN {
                    continue;
                }
                previous[next as usize] = current;

                if next == to {
                    return Some(Self::reconstruct(&previous, from, to));
                }
                queue.push_back((next, depth + 1));
            }
        }

        None
    }

    fn reconstruct(previous: &[WordId], from: WordId, to: WordId) -> Vec<WordId> {
        let mut path = vec![to];
        let mut node = to;
        while node != from {
            node = previous[node as usize];
            path.push(node);
        }
        path.reverse();
        path
    }

    /// Solve and derive the next-word hint in one call.
    pub fn hint(&self, start: &str, end: &str) -> Result<Hint, SolveHintError> {
        let ladder = self.solve(start, end).into_result(start, end)?;
        Ok(ladder.hint()?)
    }

    /// Solve many pairs in parallel. Outcomes keep the order of `pairs`.
    pub fn survey<S>(&self, pairs: &[(S, S)]) -> Vec<SolveOutcome>
    where
        S: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(start, end)| self.solve(start.as_ref(), end.as_ref()))
            .collect()
    }

    /// Distribution of ladder lengths over `pairs`.
    pub fn length_distribution<S>(&self, pairs: &[(S, S)]) -> LadderStats
    where
        S: AsRef<str> + Sync,
    {
        let mut stats = LadderStats::default();
        for outcome in self.survey(pairs) {
            match outcome {
                SolveOutcome::Found(ladder) => *stats.steps.entry(ladder.steps()).or_default() += 1,
                SolveOutcome::Unreachable => stats.unreachable += 1,
                SolveOutcome::InvalidInput(_) => stats.invalid += 1,
            }
        }
        stats
    }
}

/// Shorthand for a one-off solve with the default configuration.
pub fn solve(start: &str, end: &str, index: &WordIndex) -> SolveOutcome {
    LadderSolver::new(index).solve(start, end)
}
