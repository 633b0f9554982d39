use quiz_core::model::{OptionLetter, Outcome, QuestionIndex};

/// Presentation-agnostic snapshot of the slot a session is showing.
///
/// No pre-formatted strings: the UI decides how letters, counters and feedback look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: QuestionIndex,
    /// One-based slot number within the session order.
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<(OptionLetter, String)>,
    /// Set while feedback is pending for this slot.
    pub feedback: Option<Outcome>,
}

impl QuestionView {
    #[must_use]
    pub fn feedback_pending(&self) -> bool {
        self.feedback.is_some()
    }

    #[must_use]
    pub fn option_text(&self, letter: OptionLetter) -> Option<&str> {
        self.options
            .iter()
            .find(|(candidate, _)| *candidate == letter)
            .map(|(_, text)| text.as_str())
    }
}
