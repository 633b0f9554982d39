//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::OptionLetter;
use storage::LoadError;

/// Errors emitted by a quiz session. Neither variant changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{selected:?} is not an option of the current question (expected one of {available:?})")]
    InvalidSelection {
        selected: String,
        available: Vec<OptionLetter>,
    },
    #[error("no answer has been submitted for the current question")]
    NoPendingFeedback,
}

/// Errors emitted while preparing the quiz service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Load(#[from] LoadError),
}
