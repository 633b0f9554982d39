#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NoSelection,
    InvalidSelection,
    NotAnswered,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoSelection => "Select an answer first.",
            Self::InvalidSelection => "That option is not available for this question.",
            Self::NotAnswered => "Submit an answer before moving on.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}
