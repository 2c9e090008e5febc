//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::{SelectionError, SessionError};

/// Errors emitted while reading trivia API configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid trivia api url: {raw}")]
    InvalidUrl { raw: String },
    #[error("trivia api url must use http or https: {raw}")]
    UnsupportedScheme { raw: String },
    #[error("question amount must be between 1 and {max}, got {raw}")]
    InvalidAmount { raw: String, max: u8 },
    #[error("invalid category id: {raw}")]
    InvalidCategory { raw: String },
    #[error("difficulty must be easy, medium or hard, got {raw}")]
    InvalidDifficulty { raw: String },
}

/// Errors emitted by `TriviaClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaApiError {
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia api returned code {code}: {reason}")]
    ResponseCode { code: u8, reason: &'static str },
    #[error("malformed trivia payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Api(#[from] TriviaApiError),
    #[error(transparent)]
    Quiz(#[from] quiz_core::Error),
}

impl From<SelectionError> for QuizServiceError {
    fn from(err: SelectionError) -> Self {
        Self::Quiz(err.into())
    }
}

impl From<SessionError> for QuizServiceError {
    fn from(err: SessionError) -> Self {
        Self::Quiz(err.into())
    }
}
