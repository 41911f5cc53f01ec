//! Shared dictionary with build-then-publish reloads.
//!
//! Readers take an `Arc` snapshot of the current index and keep it for as long as
//! they need it. A reload builds the replacement completely before taking the write
//! lock, so no reader ever observes a half-built index.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::DictionaryError;
use crate::index::WordIndex;
use crate::read_dictionary;

#[derive(Debug)]
pub struct DictionaryStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<WordIndex>>,
}

impl DictionaryStore {
    /// Wrap an already built index that has no backing file.
    pub fn new(index: WordIndex) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Load and index the word list at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref().to_path_buf();
        let index = Self::build_from(&path)?;
        Ok(Self {
            path: Some(path),
            current: RwLock::new(Arc::new(index)),
        })
    }

    fn build_from(path: &Path) -> Result<WordIndex, DictionaryError> {
        let words = read_dictionary(path)?;
        let index = WordIndex::build(&words);
        if index.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(
            path = %path.display(),
            words = index.len(),
            "indexed dictionary"
        );
        Ok(index)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The index as of now. Later reloads do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<WordIndex> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a fully built index.
    pub fn replace(&self, index: WordIndex) {
        let index = Arc::new(index);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = index;
    }

    /// Re-read the backing file and swap in the new index.
    ///
    /// On failure the current index stays in place. Returns the new word count.
    pub fn reload(&self) -> Result<usize, DictionaryError> {
        let Some(path) = &self.path else {
            return Ok(self.snapshot().len());
        };
        let index = Self::build_from(path).inspect_err(|err| {
            tracing::warn!(error = %err, "dictionary reload failed, keeping current index");
        })?;
        let len = index.len();
        self.replace(index);
        Ok(len)
    }
}
