use std::env;

use async_trait::async_trait;
use quiz_core::{RawQuestion, TriviaResponse};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::{ConfigError, TriviaApiError};

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_AMOUNT: u8 = 5;
pub const MAX_AMOUNT: u8 = 50;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaApiConfig {
    pub base_url: Url,
    pub amount: u8,
    pub category: Option<u32>,
    pub difficulty: Option<String>,
}

impl Default for TriviaApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default trivia url is valid"),
            amount: DEFAULT_AMOUNT,
            category: None,
            difficulty: None,
        }
    }
}

impl TriviaApiConfig {
    /// Reads `QUIZ_API_URL`, `QUIZ_AMOUNT`, `QUIZ_CATEGORY` and
    /// `QUIZ_DIFFICULTY`, falling back to defaults for unset values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a present value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = present("QUIZ_API_URL") {
            config = config.with_base_url(&raw)?;
        }
        if let Some(raw) = present("QUIZ_AMOUNT") {
            config = config.with_amount(&raw)?;
        }
        if let Some(raw) = present("QUIZ_CATEGORY") {
            let category = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidCategory { raw: raw.clone() })?;
            config.category = Some(category);
        }
        if let Some(raw) = present("QUIZ_DIFFICULTY") {
            config = config.with_difficulty(&raw)?;
        }

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for unparsable or non-http(s) URLs.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
            raw: raw.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                raw: raw.to_string(),
            });
        }
        self.base_url = url;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAmount` outside `1..=MAX_AMOUNT`.
    pub fn with_amount(mut self, raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidAmount {
            raw: raw.to_string(),
            max: MAX_AMOUNT,
        };
        let amount = raw.trim().parse::<u8>().map_err(|_| invalid())?;
        if amount == 0 || amount > MAX_AMOUNT {
            return Err(invalid());
        }
        self.amount = amount;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDifficulty` for anything but easy/medium/hard.
    pub fn with_difficulty(mut self, raw: &str) -> Result<Self, ConfigError> {
        let value = raw.trim().to_ascii_lowercase();
        if !matches!(value.as_str(), "easy" | "medium" | "hard") {
            return Err(ConfigError::InvalidDifficulty {
                raw: raw.to_string(),
            });
        }
        self.difficulty = Some(value);
        Ok(self)
    }

    fn query(&self) -> TriviaQuery<'_> {
        TriviaQuery {
            amount: self.amount,
            category: self.category,
            difficulty: self.difficulty.as_deref(),
        }
    }
}

//
// ─── SOURCE ────────────────────────────────────────────────────────────────────
//

/// Anything that can hand out a batch of raw trivia questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_batch(&self) -> Result<Vec<RawQuestion>, TriviaApiError>;
}

/// HTTP client for the Open Trivia DB API.
#[derive(Clone)]
pub struct TriviaClient {
    client: Client,
    config: TriviaApiConfig,
}

impl TriviaClient {
    #[must_use]
    pub fn new(config: TriviaApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TriviaApiConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionSource for TriviaClient {
    async fn fetch_batch(&self) -> Result<Vec<RawQuestion>, TriviaApiError> {
        let response = self
            .client
            .get(self.config.base_url.clone())
            .query(&self.config.query())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TriviaApiError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Decodes an API body and unwraps its `results`.
///
/// # Errors
///
/// Returns `TriviaApiError::Decode` for malformed JSON and
/// `TriviaApiError::ResponseCode` when the API reports a failure.
pub fn parse_response(body: &str) -> Result<Vec<RawQuestion>, TriviaApiError> {
    let response: TriviaResponse = serde_json::from_str(body)?;
    if response.response_code != 0 {
        return Err(TriviaApiError::ResponseCode {
            code: response.response_code,
            reason: response_code_reason(response.response_code),
        });
    }
    Ok(response.results)
}

#[must_use]
pub fn response_code_reason(code: u8) -> &'static str {
    match code {
        0 => "success",
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

#[derive(Debug, Serialize)]
struct TriviaQuery<'a> {
    amount: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<&'a str>,
}
