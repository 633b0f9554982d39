use thiserror::Error;

use crate::model::{BankError, OptionLetterError, QuestionError};

/// Any domain failure, for callers that do not care which rule was broken.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    OptionLetter(#[from] OptionLetterError),
}
