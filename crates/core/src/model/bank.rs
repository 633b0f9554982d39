use std::ops::Index;

use thiserror::Error;

use crate::model::ids::QuestionIndex;
use crate::model::question::QuestionRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank cannot be empty")]
    Empty,
}

/// Immutable, ordered collection of questions.
///
/// Built once at load time and read-only afterwards, so it can sit behind an `Arc`
/// and be shared by any number of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` when no questions are given.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: QuestionIndex) -> Option<&QuestionRecord> {
        self.questions.get(index.value())
    }

    pub fn indices(&self) -> impl Iterator<Item = QuestionIndex> + use<> {
        (0..self.questions.len()).map(QuestionIndex::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionIndex, &QuestionRecord)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, question)| (QuestionIndex::new(i), question))
    }
}

/// Indices come from the bank itself (see [`QuestionBank::indices`]); a foreign index
/// is a caller bug and panics like slice indexing.
impl Index<QuestionIndex> for QuestionBank {
    type Output = QuestionRecord;

    fn index(&self, index: QuestionIndex) -> &Self::Output {
        &self.questions[index.value()]
    }
}
