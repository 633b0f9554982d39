use quiz_core::model::{OptionLetter, Outcome};
use services::{
    Advance, QuestionView, QuizLoopService, QuizSession, SessionError, SessionProgress,
    Submission, SubmissionKind,
};

use crate::views::ViewError;

pub const COMPLETION_NOTICE: &str = "You've completed all questions in this session!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionLetter),
    Submit,
    Next,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: OptionLetter,
    /// `"A) text"`
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub headline: String,
    pub explanation: Option<String>,
    pub replayed: bool,
}

impl FeedbackVm {
    fn from_submission(submission: &Submission) -> Self {
        let replayed = submission.kind == SubmissionKind::Replayed;
        match &submission.outcome {
            Outcome::Correct => Self {
                correct: true,
                headline: "Correct!".to_string(),
                explanation: None,
                replayed,
            },
            Outcome::Incorrect {
                correct_letter,
                correct_text,
                explanation,
            } => Self {
                correct: false,
                headline: format!("Incorrect. Correct answer: {correct_letter}) {correct_text}"),
                explanation: Some(format!("Explanation: {explanation}")),
                replayed,
            },
        }
    }
}

/// Owned snapshot of everything the quiz page renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreen {
    pub heading: String,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub can_submit: bool,
    pub can_advance: bool,
    pub feedback: Option<FeedbackVm>,
    pub completion_notice: Option<&'static str>,
    pub score_label: String,
    pub lifetime_label: String,
    pub lifetime_answered: usize,
    pub bank_size: usize,
}

impl QuizScreen {
    fn build(
        view: &QuestionView,
        progress: SessionProgress,
        selected: Option<OptionLetter>,
        feedback: Option<&Submission>,
        completed_pass: bool,
    ) -> Self {
        let pending = view.feedback_pending();
        Self {
            heading: format!("Question {} of {}", view.number, view.total),
            question: view.text.clone(),
            options: view
                .options
                .iter()
                .map(|(letter, text)| OptionVm {
                    letter: *letter,
                    label: format!("{letter}) {text}"),
                    selected: selected == Some(*letter),
                })
                .collect(),
            can_submit: !pending && selected.is_some(),
            can_advance: pending,
            feedback: feedback.map(FeedbackVm::from_submission),
            completion_notice: completed_pass.then_some(COMPLETION_NOTICE),
            score_label: format!(
                "Session Score: {} / {}",
                progress.session_score, progress.session_attempted
            ),
            lifetime_label: format!(
                "Total Unique Questions Answered: {} / {}",
                progress.lifetime_unique_answered, progress.bank_size
            ),
            lifetime_answered: progress.lifetime_unique_answered,
            bank_size: progress.bank_size,
        }
    }
}

pub struct QuizVm {
    session: QuizSession,
    selected: Option<OptionLetter>,
    feedback: Option<Submission>,
    completed_pass: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            selected: None,
            feedback: None,
            completed_pass: false,
        }
    }

    #[must_use]
    pub fn start(quiz_loop: &QuizLoopService) -> Self {
        Self::new(quiz_loop.start_session())
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn selected(&self) -> Option<OptionLetter> {
        self.selected
    }

    /// Apply one user intent.
    ///
    /// Selection changes are ignored while feedback is showing.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoSelection` when submitting without a choice,
    /// `ViewError::InvalidSelection` for a letter the question lacks, and
    /// `ViewError::NotAnswered` when advancing before submitting.
    pub fn dispatch(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Result<(), ViewError> {
        match intent {
            QuizIntent::Select(letter) => {
                if !self.session.feedback_pending() {
                    self.selected = Some(letter);
                }
                Ok(())
            }
            QuizIntent::Submit => {
                let letter = self.selected.ok_or(ViewError::NoSelection)?;
                let submission = quiz_loop
                    .submit(&mut self.session, letter.as_str())
                    .map_err(map_session_error)?;
                self.feedback = Some(submission);
                self.completed_pass = false;
                Ok(())
            }
            QuizIntent::Next => {
                let advance = quiz_loop
                    .advance(&mut self.session)
                    .map_err(map_session_error)?;
                self.selected = None;
                self.feedback = None;
                self.completed_pass = matches!(advance, Advance::PassCompleted { .. });
                Ok(())
            }
            QuizIntent::Restart => {
                self.session = quiz_loop.restart_session(&self.session);
                self.selected = None;
                self.feedback = None;
                self.completed_pass = false;
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        QuizScreen::build(
            &self.session.view(),
            self.session.progress(),
            self.selected,
            self.feedback.as_ref(),
            self.completed_pass,
        )
    }
}

fn map_session_error(err: SessionError) -> ViewError {
    match err {
        SessionError::InvalidSelection { .. } => ViewError::InvalidSelection,
        SessionError::NoPendingFeedback => ViewError::NotAnswered,
        _ => ViewError::Unknown,
    }
}
