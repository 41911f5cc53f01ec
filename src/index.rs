//! Wildcard-bucket index over a dictionary.
//!
//! Every word of length L is filed under L buckets, one per character position,
//! keyed by the word with that position masked out. Two words of the same length
//! differ in exactly one position iff they share a bucket, so the neighbors of a
//! word are the union of its L buckets minus the word itself. This avoids a
//! pairwise scan of the dictionary on every search expansion.

use std::collections::{BTreeMap, HashMap};

/// Position of a word inside a [`WordIndex`], in first-seen order.
pub type WordId = u32;

type BucketId = u32;

/// Masked position plus the remaining characters.
///
/// Keeping the position outside the string means no placeholder character has to be
/// reserved, so any character may appear in a dictionary word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Pattern {
    position: usize,
    rest: String,
}

impl Pattern {
    fn masking(chars: &[char], position: usize) -> Self {
        let rest = chars
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != position)
            .map(|(_, &c)| c)
            .collect();
        Self { position, rest }
    }
}

/// Trim and lowercase a raw word.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Number of differing character positions, or `None` when the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Option<usize> {
    if a.chars().count() != b.chars().count() {
        return None;
    }
    Some(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

/// Read-only index built once from a dictionary snapshot.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: Vec<String>,
    ids: HashMap<String, WordId>,
    buckets: Vec<Vec<WordId>>,
    patterns: HashMap<Pattern, BucketId>,
    /// Bucket ids of each word, one per character position.
    word_buckets: Vec<Vec<BucketId>>,
    by_length: BTreeMap<usize, Vec<WordId>>,
}

impl WordIndex {
    /// Build an index from raw words.
    ///
    /// Entries are normalized, empty entries are dropped and duplicates keep their
    /// first position. Bucket members are stored in that same order, which is what
    /// makes neighbor enumeration (and therefore solver tie-breaking) deterministic.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();

        for raw in words {
            let word = normalize(raw.as_ref());
            if word.is_empty() || index.ids.contains_key(&word) {
                continue;
            }

            let id = index.words.len() as WordId;
            let chars: Vec<char> = word.chars().collect();
            let mut own_buckets = Vec::with_capacity(chars.len());

            for position in 0..chars.len() {
                let pattern = Pattern::masking(&chars, position);
                let next_bucket = index.buckets.len() as BucketId;
                let bucket = *index.patterns.entry(pattern).or_insert(next_bucket);
                if bucket == next_bucket {
                    index.buckets.push(Vec::new());
                }
                index.buckets[bucket as usize].push(id);
                own_buckets.push(bucket);
            }

            index.by_length.entry(chars.len()).or_default().push(id);
            index.word_buckets.push(own_buckets);
            index.ids.insert(word.clone(), id);
            index.words.push(word);
        }

        index
    }

    /// Number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Unique normalized words in first-seen order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(&normalize(word))
    }

    /// Look up an already normalized word.
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id as usize]
    }

    /// Distinct word lengths present, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    pub fn words_of_length(&self, length: usize) -> impl Iterator<Item = &str> + '_ {
        self.by_length
            .get(&length)
            .into_iter()
            .flatten()
            .map(move |&id| self.word(id))
    }

    /// Dictionary words one substitution away from `word`.
    ///
    /// The query does not need to be a dictionary member. Results are ordered by
    /// masked position first, then by dictionary order within each bucket.
    pub fn neighbors(&self, word: &str) -> Vec<&str> {
        let word = normalize(word);
        if let Some(id) = self.id_of(&word) {
            return self.neighbor_ids(id).map(|n| self.word(n)).collect();
        }

        let chars: Vec<char> = word.chars().collect();
        (0..chars.len())
            .filter_map(|position| self.patterns.get(&Pattern::masking(&chars, position)))
            .flat_map(|&bucket| self.buckets[bucket as usize].iter())
            .map(|&n| self.word(n))
            .collect()
    }

    /// Neighbor ids of a member word, without allocating.
    ///
    /// Two distinct words of equal length share at most one bucket, so each
    /// neighbor is yielded exactly once.
    pub fn neighbor_ids(&self, id: WordId) -> impl Iterator<Item = WordId> + '_ {
        self.word_buckets[id as usize]
            .iter()
            .flat_map(move |&bucket| self.buckets[bucket as usize].iter().copied())
            .filter(move |&n| n != id)
    }

    /// Number of neighbors of `word`, zero for words outside the dictionary.
    pub fn degree(&self, word: &str) -> usize {
        self.id_of(&normalize(word))
            .map(|id| self.neighbor_ids(id).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_masks_single_position() {
        let chars: Vec<char> = "cat".chars().collect();
        assert_eq!(
            Pattern::masking(&chars, 1),
            Pattern { position: 1, rest: "ct".to_string() }
        );
        assert_ne!(Pattern::masking(&chars, 0), Pattern::masking(&chars, 1));
    }

    #[test]
    fn test_bucket_count() {
        let index = WordIndex::build(["cat", "cot", "dog"]);
        // cat and cot share "c_t"
        assert_eq!(index.buckets.len(), 8);
        assert_eq!(index.word_buckets[0].len(), 3);
    }
}
