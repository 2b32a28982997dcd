/*
[INPUT]:  Error sources (HTTP, API status, serialization, URL)
[OUTPUT]: Structured error types surfaced as user-visible fetch messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the todo adapter
#[derive(Error, Debug)]
pub enum TodoError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TodoError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TodoError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Status code for API errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TodoError::Api { code, .. } => Some(*code),
            TodoError::Http(err) => err.status().map(|status| status.as_u16()),
            TodoError::Serialization(_) | TodoError::UrlParse(_) => None,
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, TodoError>;
