use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use quiz_core::model::{QuestionBank, QuestionError};
use thiserror::Error;

use crate::files::open_source;
use crate::sheet::{Sheet, assemble_bank};

/// Errors surfaced while building a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("unsupported question file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("could not read {source_name}: {reason}")]
    Unreadable { source_name: String, reason: String },

    #[error("sheet {sheet:?} has a Question column but no {column:?} column")]
    MissingColumn { sheet: String, column: &'static str },

    #[error("sheet {sheet:?} row {row}: {source}")]
    InvalidRow {
        sheet: String,
        row: usize,
        #[source]
        source: QuestionError,
    },

    #[error("no questions found in {source_name}")]
    Empty { source_name: String },

    #[error("bank cache unavailable: {0}")]
    Cache(String),
}

/// Anything that can provide the raw sheets of a question bank.
pub trait QuestionSource: Send + Sync {
    /// Identifies the source for memoization and diagnostics.
    fn cache_key(&self) -> String;

    /// Read every sheet, in source order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the source is missing or cannot be parsed.
    fn read_sheets(&self) -> Result<Vec<Sheet>, LoadError>;

    /// Read and validate the full bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` for unreadable sources, malformed rows, or an empty result.
    fn load_bank(&self) -> Result<QuestionBank, LoadError> {
        assemble_bank(&self.cache_key(), self.read_sheets()?)
    }
}

/// Source backed by sheets already held in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    sheets: Vec<Sheet>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl QuestionSource for InMemorySource {
    fn cache_key(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn read_sheets(&self) -> Result<Vec<Sheet>, LoadError> {
        Ok(self.sheets.clone())
    }
}

/// Memoizes loaded banks by source key.
///
/// Loading is pure for a given file, so a bank is read at most once per cache. Failed
/// loads are not remembered. Each cache is independent; there is no process-wide state.
#[derive(Clone, Default)]
pub struct BankCache {
    banks: Arc<Mutex<HashMap<String, Arc<QuestionBank>>>>,
}

impl BankCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the bank stored at `path`, reusing an earlier result for the same path.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing, unsupported, unreadable or empty.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<QuestionBank>, LoadError> {
        let path = path.as_ref();
        if let Some(bank) = self.cached(&path_key(path))? {
            return Ok(bank);
        }
        let source = open_source(path)?;
        self.load_from(source.as_ref())
    }

    /// Load from an arbitrary source, keyed by [`QuestionSource::cache_key`].
    ///
    /// # Errors
    ///
    /// Returns the source's `LoadError` unchanged.
    pub fn load_from(&self, source: &dyn QuestionSource) -> Result<Arc<QuestionBank>, LoadError> {
        let key = source.cache_key();
        if let Some(bank) = self.cached(&key)? {
            tracing::debug!(%key, "question bank served from cache");
            return Ok(bank);
        }

        let bank = Arc::new(source.load_bank()?);
        tracing::info!(%key, questions = bank.len(), "question bank loaded");

        let mut guard = self
            .banks
            .lock()
            .map_err(|e| LoadError::Cache(e.to_string()))?;
        let entry = guard.entry(key).or_insert(bank);
        Ok(Arc::clone(entry))
    }

    /// Number of memoized banks.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Cache` if the cache lock is poisoned.
    pub fn len(&self) -> Result<usize, LoadError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| LoadError::Cache(e.to_string()))?;
        Ok(guard.len())
    }

    /// Forget every memoized bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Cache` if the cache lock is poisoned.
    pub fn clear(&self) -> Result<(), LoadError> {
        let mut guard = self
            .banks
            .lock()
            .map_err(|e| LoadError::Cache(e.to_string()))?;
        guard.clear();
        Ok(())
    }

    fn cached(&self, key: &str) -> Result<Option<Arc<QuestionBank>>, LoadError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| LoadError::Cache(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

pub(crate) fn path_key(path: &Path) -> String {
    format!("file:{}", path.display())
}
