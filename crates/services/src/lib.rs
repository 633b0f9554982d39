#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::{QuizServiceError, SessionError};

pub use sessions::{
    Advance, QuestionView, QuizLoopService, QuizSession, SessionProgress, Submission,
    SubmissionKind, shuffled_order,
};
