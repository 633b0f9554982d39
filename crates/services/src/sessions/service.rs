use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use quiz_core::model::{OptionLetter, Outcome, QuestionBank, QuestionIndex, QuestionRecord};

use super::order::shuffled_order;
use super::progress::SessionProgress;
use super::view::QuestionView;
use crate::error::SessionError;

//
// ─── SUBMISSION / ADVANCE RESULTS ──────────────────────────────────────────────
//

/// Whether a submission graded the slot or replayed an earlier grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Recorded,
    Replayed,
}

/// Outcome of `QuizSession::submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub index: QuestionIndex,
    pub outcome: Outcome,
    pub kind: SubmissionKind,
}

/// Result of moving to the next slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { position: usize },
    /// The cursor wrapped to the start of the same order. Emitted once per pass.
    PassCompleted { passes: u32 },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's walk through a shuffled question bank.
///
/// Each slot moves `Unanswered -> Answered -> Advanced`: `submit_answer` is the only way
/// into `Answered` and `advance` the only way out. A question is scored at most once per
/// session; submitting it again replays the recorded outcome.
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    order: Vec<QuestionIndex>,
    position: usize,
    score: usize,
    answered_this_session: HashMap<QuestionIndex, Outcome>,
    answered_all_time: HashSet<QuestionIndex>,
    feedback_pending: bool,
    passes_completed: u32,
}

impl QuizSession {
    /// Start a session over a fresh uniform permutation of the whole bank.
    pub fn start<R: Rng + ?Sized>(bank: Arc<QuestionBank>, rng: &mut R) -> Self {
        let order = shuffled_order(bank.len(), rng);
        Self {
            bank,
            order,
            position: 0,
            score: 0,
            answered_this_session: HashMap::new(),
            answered_all_time: HashSet::new(),
            feedback_pending: false,
            passes_completed: 0,
        }
    }

    /// Start over with a new permutation, keeping the lifetime answered set.
    pub fn restart<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = Self::start(Arc::clone(&self.bank), rng);
        next.answered_all_time.clone_from(&self.answered_all_time);
        next
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn order(&self) -> &[QuestionIndex] {
        &self.order
    }

    /// Zero-based cursor into `order`.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// One-based number of the current slot, for display.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.position + 1
    }

    #[must_use]
    pub fn current_index(&self) -> QuestionIndex {
        self.order[self.position]
    }

    #[must_use]
    pub fn current_question(&self) -> &QuestionRecord {
        &self.bank[self.current_index()]
    }

    #[must_use]
    pub fn feedback_pending(&self) -> bool {
        self.feedback_pending
    }

    #[must_use]
    pub fn passes_completed(&self) -> u32 {
        self.passes_completed
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Outcome recorded for the current question earlier in this session, if any.
    #[must_use]
    pub fn recorded_outcome(&self) -> Option<&Outcome> {
        self.answered_this_session.get(&self.current_index())
    }

    /// Grade `selected` against the current question.
    ///
    /// A question already answered in this session is not graded again: the recorded
    /// outcome is returned as `SubmissionKind::Replayed` and score and answer sets stay
    /// untouched. Either way feedback becomes pending so the slot can be advanced.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSelection` if `selected` is not a present option
    /// letter of the current question. State is unchanged in that case.
    pub fn submit_answer(&mut self, selected: &str) -> Result<Submission, SessionError> {
        let index = self.current_index();
        let question = &self.bank[index];
        let letter = selected
            .parse::<OptionLetter>()
            .ok()
            .filter(|letter| question.has_option(*letter))
            .ok_or_else(|| SessionError::InvalidSelection {
                selected: selected.to_string(),
                available: question.options().map(|(letter, _)| letter).collect(),
            })?;

        if let Some(prior) = self.answered_this_session.get(&index) {
            let outcome = prior.clone();
            self.feedback_pending = true;
            return Ok(Submission {
                index,
                outcome,
                kind: SubmissionKind::Replayed,
            });
        }

        let outcome = Outcome::evaluate(question, letter);
        if outcome.is_correct() {
            self.score += 1;
        }
        self.answered_this_session.insert(index, outcome.clone());
        self.answered_all_time.insert(index);
        self.feedback_pending = true;

        Ok(Submission {
            index,
            outcome,
            kind: SubmissionKind::Recorded,
        })
    }

    /// Move to the next slot, wrapping to the start of the same order after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoPendingFeedback` if the current slot has not been
    /// submitted yet.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if !self.feedback_pending {
            return Err(SessionError::NoPendingFeedback);
        }

        self.feedback_pending = false;
        self.position += 1;
        if self.position >= self.order.len() {
            self.position = 0;
            self.passes_completed += 1;
            return Ok(Advance::PassCompleted {
                passes: self.passes_completed,
            });
        }
        Ok(Advance::Next {
            position: self.position,
        })
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            session_score: self.score,
            session_attempted: self.answered_this_session.len(),
            lifetime_unique_answered: self.answered_all_time.len(),
            bank_size: self.bank.len(),
        }
    }

    /// Presentation-agnostic snapshot of the current slot.
    #[must_use]
    pub fn view(&self) -> QuestionView {
        let question = self.current_question();
        QuestionView {
            index: self.current_index(),
            number: self.question_number(),
            total: self.order.len(),
            text: question.text().to_string(),
            options: question
                .options()
                .map(|(letter, text)| (letter, text.to_string()))
                .collect(),
            feedback: self
                .feedback_pending
                .then(|| self.recorded_outcome().cloned())
                .flatten(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("bank_len", &self.bank.len())
            .field("position", &self.position)
            .field("score", &self.score)
            .field("answered_this_session", &self.answered_this_session.len())
            .field("answered_all_time", &self.answered_all_time.len())
            .field("feedback_pending", &self.feedback_pending)
            .field("passes_completed", &self.passes_completed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_question(id: usize, correct: &str) -> QuestionRecord {
        QuestionDraft::new(format!("Q{id}"), correct)
            .with_option(OptionLetter::A, format!("A{id}"))
            .with_option(OptionLetter::B, format!("B{id}"))
            .with_option(OptionLetter::C, format!("C{id}"))
            .validate()
            .unwrap()
    }

    fn build_bank(len: usize) -> Arc<QuestionBank> {
        let questions = (0..len).map(|id| build_question(id, "B")).collect();
        Arc::new(QuestionBank::new(questions).unwrap())
    }

    fn start(len: usize) -> QuizSession {
        QuizSession::start(build_bank(len), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn fresh_session_starts_clean() {
        let session = start(4);
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.feedback_pending());
        assert_eq!(
            session.progress(),
            SessionProgress {
                session_score: 0,
                session_attempted: 0,
                lifetime_unique_answered: 0,
                bank_size: 4,
            }
        );
        let mut order: Vec<_> = session.order().iter().map(|i| i.value()).collect();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn current_question_follows_order() {
        let mut session = start(5);
        for slot in 0..5 {
            let expected = &session.bank()[session.order()[slot]];
            assert_eq!(session.current_question(), expected);
            session.submit_answer("A").unwrap();
            session.advance().unwrap();
        }
    }

    #[test]
    fn correct_letter_grades_correct_and_scores() {
        let mut session = start(3);
        let submission = session.submit_answer("B").unwrap();
        assert_eq!(submission.outcome, Outcome::Correct);
        assert_eq!(submission.kind, SubmissionKind::Recorded);
        assert_eq!(submission.index, session.current_index());
        assert_eq!(session.score(), 1);
        assert!(session.feedback_pending());
    }

    #[test]
    fn other_letters_grade_incorrect_with_details() {
        for wrong in ["A", "C"] {
            let mut session = start(3);
            let id = session.current_index().value();
            let submission = session.submit_answer(wrong).unwrap();
            assert_eq!(
                submission.outcome,
                Outcome::Incorrect {
                    correct_letter: OptionLetter::B,
                    correct_text: format!("B{id}"),
                    explanation: quiz_core::model::NO_EXPLANATION.to_string(),
                }
            );
            assert_eq!(session.score(), 0);
            assert_eq!(session.progress().session_attempted, 1);
        }
    }

    #[test]
    fn second_submit_on_same_slot_changes_nothing() {
        let mut session = start(3);
        let first = session.submit_answer("A").unwrap();
        let progress = session.progress();

        let second = session.submit_answer("B").unwrap();

        assert_eq!(second.kind, SubmissionKind::Replayed);
        assert_eq!(second.outcome, first.outcome);
        assert_eq!(session.progress(), progress);
        assert_eq!(session.score(), 0);
        assert!(session.feedback_pending());
    }

    #[test]
    fn invalid_selection_is_rejected_without_state_change() {
        let mut session = start(2);
        for bad in ["D", "E", "", "Z", "AB"] {
            let err = session.submit_answer(bad).unwrap_err();
            assert_eq!(
                err,
                SessionError::InvalidSelection {
                    selected: bad.to_string(),
                    available: vec![OptionLetter::A, OptionLetter::B, OptionLetter::C],
                }
            );
        }
        assert!(!session.feedback_pending());
        assert_eq!(session.progress().session_attempted, 0);
        assert!(matches!(
            session.advance(),
            Err(SessionError::NoPendingFeedback)
        ));
    }

    #[test]
    fn two_option_question_rejects_c() {
        let question = QuestionDraft::new("Only two", "A")
            .with_option(OptionLetter::A, "yes")
            .with_option(OptionLetter::B, "no")
            .validate()
            .unwrap();
        let bank = Arc::new(QuestionBank::new(vec![question]).unwrap());
        let mut session = QuizSession::start(bank, &mut StdRng::seed_from_u64(3));

        assert_eq!(session.view().options.len(), 2);
        let err = session.submit_answer("C").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSelection { .. }));
        assert_eq!(session.progress().session_attempted, 0);
    }

    #[test]
    fn advance_requires_pending_feedback() {
        let mut session = start(3);
        assert_eq!(session.advance(), Err(SessionError::NoPendingFeedback));
        assert_eq!(session.position(), 0);

        session.submit_answer("A").unwrap();
        assert_eq!(session.advance(), Ok(Advance::Next { position: 1 }));
        assert!(!session.feedback_pending());
        assert_eq!(session.advance(), Err(SessionError::NoPendingFeedback));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn advance_wraps_to_same_order_once_per_pass() {
        let mut session = start(3);
        let order = session.order().to_vec();
        let mut completions = Vec::new();

        for step in 0..6 {
            let old = session.position();
            session.submit_answer("B").unwrap();
            let advance = session.advance().unwrap();
            assert_eq!(session.position(), (old + 1) % 3, "step {step}");
            assert!(!session.feedback_pending());
            if let Advance::PassCompleted { passes } = advance {
                completions.push((step, passes));
            }
        }

        assert_eq!(completions, vec![(2, 1), (5, 2)]);
        assert_eq!(session.order(), order.as_slice());
        assert_eq!(session.passes_completed(), 2);
    }

    #[test]
    fn later_passes_replay_without_rescoring() {
        let mut session = start(2);
        session.submit_answer("A").unwrap();
        session.advance().unwrap();
        session.submit_answer("B").unwrap();
        session.advance().unwrap();
        let after_first_pass = session.progress();
        assert_eq!(after_first_pass.session_score, 1);

        let replay = session.submit_answer("B").unwrap();
        assert_eq!(replay.kind, SubmissionKind::Replayed);
        assert!(!replay.outcome.is_correct());
        assert_eq!(session.progress(), after_first_pass);
        assert!(session.advance().is_ok());
    }

    #[test]
    fn score_never_exceeds_attempts_or_bank_size() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = start(6);
        let letters = ["A", "B", "C", "D"];
        for _ in 0..40 {
            let pick = letters[rng.random_range(0..letters.len())];
            let _ = session.submit_answer(pick);
            if rng.random_bool(0.7) {
                let _ = session.advance();
            }
            let progress = session.progress();
            assert!(progress.session_score <= progress.session_attempted);
            assert!(progress.session_attempted <= progress.bank_size);
            assert!(progress.lifetime_unique_answered <= progress.bank_size);
        }
    }

    #[test]
    fn scenario_three_questions() {
        let bank = Arc::new(
            QuestionBank::new(vec![
                build_question(0, "A"),
                build_question(1, "B"),
                build_question(2, "C"),
            ])
            .unwrap(),
        );
        let mut session = QuizSession::start(bank, &mut StdRng::seed_from_u64(11));

        let correct = session.current_question().correct_letter();
        session.submit_answer(correct.as_str()).unwrap();
        session.advance().unwrap();

        let correct = session.current_question().correct_letter();
        let wrong = OptionLetter::ALL
            .into_iter()
            .find(|letter| *letter != correct)
            .unwrap();
        session.submit_answer(wrong.as_str()).unwrap();
        session.advance().unwrap();

        assert_eq!(session.question_number(), 3);
        assert_eq!(
            session.progress(),
            SessionProgress {
                session_score: 1,
                session_attempted: 2,
                lifetime_unique_answered: 2,
                bank_size: 3,
            }
        );
        assert_eq!(session.advance(), Err(SessionError::NoPendingFeedback));
        assert_eq!(session.question_number(), 3);
    }

    #[test]
    fn restart_reshuffles_and_keeps_lifetime() {
        let mut session = start(4);
        session.submit_answer("B").unwrap();
        session.advance().unwrap();
        session.submit_answer("A").unwrap();

        let next = session.restart(&mut StdRng::seed_from_u64(99));
        assert_eq!(next.position(), 0);
        assert!(!next.feedback_pending());
        assert_eq!(
            next.progress(),
            SessionProgress {
                session_score: 0,
                session_attempted: 0,
                lifetime_unique_answered: 2,
                bank_size: 4,
            }
        );
    }

    #[test]
    fn view_shows_feedback_only_while_pending() {
        let mut session = start(2);
        let view = session.view();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 2);
        assert!(view.feedback.is_none());

        session.submit_answer("B").unwrap();
        assert_eq!(session.view().feedback, Some(Outcome::Correct));

        session.advance().unwrap();
        assert!(session.view().feedback.is_none());
    }
}
