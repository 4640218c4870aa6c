//! Custom error types for XTM API operations

use std::fmt;

use thiserror::Error;

/// Message attached to an API error.
///
/// The XTM API reports failures as a JSON payload on most statuses, but a
/// 404 with an empty body only yields the HTTP reason phrase.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// Decoded JSON error body
    Json(serde_json::Value),
    /// Plain reason text (empty-body 404, poll exhaustion)
    Reason(String),
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{}", value),
            ErrorPayload::Reason(reason) => write!(f, "{}", reason),
        }
    }
}

/// XTM client errors
#[derive(Error, Debug)]
pub enum XtmError {
    /// Non-success response from the API, or an exhausted poll loop
    #[error("API error: {message}")]
    ApiError {
        /// Decoded error body or reason text
        message: ErrorPayload,
    },

    /// Response was missing a required field
    #[error("Missing required field: {field}")]
    MissingFieldError {
        /// Name of the absent field
        field: String,
    },

    /// Response had an unexpected shape or content type
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was expected vs. received
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is missing or malformed
        message: String,
    },

    /// Reqwest error (network failure or timeout)
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl XtmError {
    /// Build an API error carrying a decoded JSON body
    pub(crate) fn api_json(value: serde_json::Value) -> Self {
        XtmError::ApiError {
            message: ErrorPayload::Json(value),
        }
    }

    /// Build an API error carrying plain reason text
    pub(crate) fn api_reason(reason: impl Into<String>) -> Self {
        XtmError::ApiError {
            message: ErrorPayload::Reason(reason.into()),
        }
    }
}

/// Result type for XTM client operations
pub type Result<T> = std::result::Result<T, XtmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_display() {
        let json = ErrorPayload::Json(serde_json::json!({"reason": "denied"}));
        assert_eq!(json.to_string(), r#"{"reason":"denied"}"#);

        let reason = ErrorPayload::Reason("Not Found".to_string());
        assert_eq!(reason.to_string(), "Not Found");
    }

    #[test]
    fn test_error_display_includes_payload() {
        let err = XtmError::api_reason("Not Found");
        assert_eq!(err.to_string(), "API error: Not Found");
    }
}
