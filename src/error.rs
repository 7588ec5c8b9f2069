//! Custom error types for scholarsurvey.
//!
//! All fallible functions return `Result<T, SurveyError>` instead of using `unwrap()`.

use thiserror::Error;

/// Error string SerpApi reports when a query matched nothing.
///
/// This is the only provider error that does not abort an accumulation.
pub const EMPTY_RESULT_SENTINEL: &str = "Google hasn't returned any results for this query.";

/// Main error type for scholarsurvey operations.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Provider reported an error in the response body
    #[error("Provider error for {query}: {message}")]
    Provider {
        /// Query that produced the error, rendered as `key=value` pairs
        query: String,
        /// Value of the provider's `error` field
        message: String,
        /// Raw response body, kept for diagnosis
        payload: String,
    },

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status without a provider error body
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// Rate limited by the provider
    #[error("Rate limited, retry after {0}s")]
    RateLimited(u64),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// A result record lacks a field the survey cannot do without
    #[error("Result {result_id} is missing field '{field}'")]
    MissingField {
        /// Provider result id of the offending record
        result_id: String,
        /// Dotted path of the missing field
        field: &'static str,
    },
}

impl SurveyError {
    /// True for the provider's "no results" response, which ends pagination cleanly.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, SurveyError::Provider { message, .. } if message == EMPTY_RESULT_SENTINEL)
    }
}

/// Result type alias using `SurveyError`
pub type Result<T> = std::result::Result<T, SurveyError>;
