//! Format-neutral tables and the column contract shared by every source.

use quiz_core::model::{OptionLetter, QuestionBank, QuestionDraft};

use crate::repository::LoadError;

pub const QUESTION_COLUMN: &str = "Question";
pub const CORRECT_ANSWER_COLUMN: &str = "Correct Answer";
pub const EXPLANATION_COLUMN: &str = "Explanation";

/// Header of the option column for `letter`, e.g. `Option C`.
#[must_use]
pub fn option_column(letter: OptionLetter) -> String {
    format!("Option {letter}")
}

/// One table of string cells, header row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Position of the column whose trimmed header equals `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.trim() == name)
    }

    #[must_use]
    pub fn has_question_column(&self) -> bool {
        self.column(QUESTION_COLUMN).is_some()
    }
}

/// Column positions resolved once per sheet.
struct ColumnMap {
    question: usize,
    options: [Option<usize>; 5],
    correct_answer: usize,
    explanation: Option<usize>,
}

impl ColumnMap {
    fn resolve(sheet: &Sheet, question: usize) -> Result<Self, LoadError> {
        let correct_answer =
            sheet
                .column(CORRECT_ANSWER_COLUMN)
                .ok_or_else(|| LoadError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: CORRECT_ANSWER_COLUMN,
                })?;
        let options = OptionLetter::ALL.map(|letter| sheet.column(&option_column(letter)));

        Ok(Self {
            question,
            options,
            correct_answer,
            explanation: sheet.column(EXPLANATION_COLUMN),
        })
    }

    fn draft(&self, row: &[String]) -> QuestionDraft {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();
        QuestionDraft {
            question: cell(self.question),
            options: self.options.map(|column| column.map(cell)),
            correct_answer: cell(self.correct_answer),
            explanation: self.explanation.map(cell),
        }
    }
}

/// Concatenate every question sheet into a validated bank.
///
/// Sheets without a `Question` column, or without any non-blank row, are ignored. Fully
/// blank rows are skipped. Row order is preserved within and across sheets.
///
/// # Errors
///
/// Returns `LoadError::MissingColumn`, `LoadError::InvalidRow`, or `LoadError::Empty`
/// when nothing is left after filtering.
pub fn assemble_bank(source_name: &str, sheets: Vec<Sheet>) -> Result<QuestionBank, LoadError> {
    let mut questions = Vec::new();

    for sheet in &sheets {
        let Some(question) = sheet.column(QUESTION_COLUMN) else {
            tracing::debug!(sheet = %sheet.name, "skipping sheet without a Question column");
            continue;
        };
        if sheet.rows.iter().all(|row| is_blank(row)) {
            tracing::debug!(sheet = %sheet.name, "skipping question sheet with no rows");
            continue;
        }
        let columns = ColumnMap::resolve(sheet, question)?;

        let before = questions.len();
        for (offset, row) in sheet.rows.iter().enumerate() {
            if is_blank(row) {
                continue;
            }
            let record = columns
                .draft(row)
                .validate()
                .map_err(|source| LoadError::InvalidRow {
                    sheet: sheet.name.clone(),
                    // Header occupies row 1.
                    row: offset + 2,
                    source,
                })?;
            questions.push(record);
        }
        tracing::debug!(
            sheet = %sheet.name,
            questions = questions.len() - before,
            "sheet loaded"
        );
    }

    QuestionBank::new(questions).map_err(|_| LoadError::Empty {
        source_name: source_name.to_string(),
    })
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
