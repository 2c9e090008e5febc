#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_service;
pub mod trivia_client;

pub use error::{ConfigError, QuizServiceError, TriviaApiError};
pub use quiz_service::{FetchedBatch, QuizService};
pub use trivia_client::{
    DEFAULT_AMOUNT, DEFAULT_BASE_URL, MAX_AMOUNT, QuestionSource, TriviaApiConfig, TriviaClient,
    parse_response,
};
