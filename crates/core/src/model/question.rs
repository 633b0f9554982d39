use serde::Serialize;
use thiserror::Error;

use crate::model::letter::OptionLetter;

/// Shown when a question carries no explanation of its own.
pub const NO_EXPLANATION: &str = "No explanation provided.";

const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("at least two options are required, found {found}")]
    TooFewOptions { found: usize },

    #[error("options must be contiguous from A, option {missing} is missing")]
    NonContiguousOptions { missing: OptionLetter },

    #[error("correct answer is missing")]
    MissingCorrectAnswer,

    #[error("correct answer {raw:?} is not an option letter")]
    InvalidCorrectAnswer { raw: String },

    #[error("correct answer {letter} does not name a present option")]
    CorrectAnswerNotAnOption { letter: OptionLetter },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as read from a source row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [Option<String>; 5],
    pub correct_answer: String,
    pub explanation: Option<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_option(mut self, letter: OptionLetter, text: impl Into<String>) -> Self {
        self.options[letter.position()] = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Validate the draft into an immutable record.
    ///
    /// Blank cells count as absent. The correct answer is trimmed and upper-cased before
    /// it is matched against the present options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the row cannot be presented or graded.
    pub fn validate(self) -> Result<QuestionRecord, QuestionError> {
        let text = self.question.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }

        let mut options = Vec::with_capacity(OptionLetter::ALL.len());
        let mut first_gap = None;
        for (letter, cell) in OptionLetter::ALL.into_iter().zip(self.options) {
            match non_blank(cell) {
                Some(option) => {
                    if let Some(missing) = first_gap {
                        return Err(QuestionError::NonContiguousOptions { missing });
                    }
                    options.push((letter, option));
                }
                None if first_gap.is_none() => first_gap = Some(letter),
                None => {}
            }
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                found: options.len(),
            });
        }

        let raw = self.correct_answer.trim();
        if raw.is_empty() {
            return Err(QuestionError::MissingCorrectAnswer);
        }
        let correct: OptionLetter = raw
            .parse()
            .map_err(|_| QuestionError::InvalidCorrectAnswer {
                raw: raw.to_string(),
            })?;
        if !options.iter().any(|(letter, _)| *letter == correct) {
            return Err(QuestionError::CorrectAnswerNotAnOption { letter: correct });
        }

        Ok(QuestionRecord {
            text: text.to_string(),
            options,
            correct,
            explanation: non_blank(self.explanation),
        })
    }
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One validated multiple-choice question.
///
/// Options are contiguous from `A`, at least two are present, and the correct letter
/// always names one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    text: String,
    options: Vec<(OptionLetter, String)>,
    correct: OptionLetter,
    explanation: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Present options in letter order.
    pub fn options(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        self.options
            .iter()
            .map(|(letter, text)| (*letter, text.as_str()))
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn option_text(&self, letter: OptionLetter) -> Option<&str> {
        self.options
            .iter()
            .find(|(candidate, _)| *candidate == letter)
            .map(|(_, text)| text.as_str())
    }

    #[must_use]
    pub fn has_option(&self, letter: OptionLetter) -> bool {
        self.option_text(letter).is_some()
    }

    #[must_use]
    pub fn correct_letter(&self) -> OptionLetter {
        self.correct
    }

    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.option_text(self.correct).unwrap_or_default()
    }

    /// The stored explanation, or [`NO_EXPLANATION`].
    #[must_use]
    pub fn explanation(&self) -> &str {
        self.explanation.as_deref().unwrap_or(NO_EXPLANATION)
    }

    #[must_use]
    pub fn has_explanation(&self) -> bool {
        self.explanation.is_some()
    }
}
