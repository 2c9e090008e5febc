#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    FetchFailed,
    NoQuestions,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::FetchFailed => "Could not load questions. Check your connection and try again.",
            ViewError::NoQuestions => "No questions are available right now. Please try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
