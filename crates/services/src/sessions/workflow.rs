use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use quiz_core::model::QuestionBank;
use storage::BankCache;

use super::service::{Advance, QuizSession, Submission};
use crate::error::{QuizServiceError, SessionError};

/// Owns the loaded bank and hands out sessions over it.
///
/// With a seed, the n-th session started by this service shuffles with `seed + n`,
/// so a run is reproducible end to end.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<QuestionBank>,
    seed: Option<u64>,
    started: Arc<AtomicU64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            seed: None,
            started: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Load the bank at `path` through `cache` and wrap it in a service.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Load` when the file cannot be turned into a bank.
    pub fn load(cache: &BankCache, path: &Path) -> Result<Self, QuizServiceError> {
        let bank = cache.load(path)?;
        info!(path = %path.display(), questions = bank.len(), "question bank ready");
        Ok(Self::new(bank))
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    /// Start a session with a fresh shuffle and empty answer sets.
    #[must_use]
    pub fn start_session(&self) -> QuizSession {
        let session = QuizSession::start(Arc::clone(&self.bank), &mut self.next_rng());
        debug!(questions = session.order().len(), "quiz session started");
        session
    }

    /// Reshuffle for a new session, carrying the lifetime answered set over.
    #[must_use]
    pub fn restart_session(&self, previous: &QuizSession) -> QuizSession {
        let session = previous.restart(&mut self.next_rng());
        debug!(
            lifetime = session.progress().lifetime_unique_answered,
            "quiz session restarted"
        );
        session
    }

    /// Submit `selected` for the current question of `session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSelection` when `selected` is not an option.
    pub fn submit(
        &self,
        session: &mut QuizSession,
        selected: &str,
    ) -> Result<Submission, SessionError> {
        let submission = session.submit_answer(selected)?;
        debug!(
            question = %submission.index,
            correct = submission.outcome.is_correct(),
            kind = ?submission.kind,
            "answer submitted"
        );
        Ok(submission)
    }

    /// Move `session` to its next slot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoPendingFeedback` when nothing was submitted yet.
    pub fn advance(&self, session: &mut QuizSession) -> Result<Advance, SessionError> {
        let advance = session.advance()?;
        if let Advance::PassCompleted { passes } = advance {
            let progress = session.progress();
            info!(
                passes,
                score = progress.session_score,
                attempted = progress.session_attempted,
                "completed all questions in session"
            );
        }
        Ok(advance)
    }

    fn next_rng(&self) -> StdRng {
        let started = self.started.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(started)),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
