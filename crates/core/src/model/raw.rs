use serde::{Deserialize, Serialize};

/// Trivia item exactly as the question source delivers it.
///
/// Text fields may carry HTML entities (`&quot;`, `&#039;`). They are kept
/// verbatim here; decoding happens only when the view renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

impl RawQuestion {
    /// Convenience constructor for a record without metadata.
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            category: String::new(),
            kind: String::new(),
            difficulty: String::new(),
            question: question.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of answers a built question will carry.
    #[must_use]
    pub fn answer_count(&self) -> usize {
        1 + self.incorrect_answers.len()
    }
}

/// Envelope returned by the trivia API.
///
/// `response_code` is 0 on success; a missing code is treated as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaResponse {
    #[serde(default)]
    pub response_code: u8,
    pub results: Vec<RawQuestion>,
}
