mod order;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use order::shuffled_order;
pub use progress::SessionProgress;
pub use service::{Advance, QuizSession, Submission, SubmissionKind};
pub use view::QuestionView;
pub use workflow::QuizLoopService;
