mod bank;
mod ids;
mod letter;
mod outcome;
mod question;

pub use bank::{BankError, QuestionBank};
pub use ids::QuestionIndex;
pub use letter::{OptionLetter, OptionLetterError};
pub use outcome::Outcome;
pub use question::{NO_EXPLANATION, QuestionDraft, QuestionError, QuestionRecord};
