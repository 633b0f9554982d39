use serde::{Deserialize, Serialize};

use crate::model::letter::OptionLetter;
use crate::model::question::QuestionRecord;

/// Result of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect {
        correct_letter: OptionLetter,
        correct_text: String,
        explanation: String,
    },
}

impl Outcome {
    /// Grade `selected` against the record's correct letter.
    #[must_use]
    pub fn evaluate(question: &QuestionRecord, selected: OptionLetter) -> Self {
        if selected == question.correct_letter() {
            return Self::Correct;
        }
        Self::Incorrect {
            correct_letter: question.correct_letter(),
            correct_text: question.correct_text().to_string(),
            explanation: question.explanation().to_string(),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}
