//! Error types for Marci.
//!
//! Every step of the request pipeline returns [`MarciResult`]. The variant of
//! [`MarciError`] decides how the failure is rendered:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Http` | its own status (default 400) | its message, as text or JSON |
//! | `Validation` | 400 | canonical validation JSON, no `where` |
//! | `Internal` | 500 | `Internal Server Error` |

use http::StatusCode;
use marci_schema::{validation_error_body, FieldError};
use thiserror::Error;

/// Result type alias using [`MarciError`].
pub type MarciResult<T> = Result<T, MarciError>;

/// An error that carries its own HTTP status and message.
///
/// Handlers and hooks return this to answer with a specific status.
///
/// # Example
///
/// ```
/// use marci_core::HttpError;
/// use http::StatusCode;
///
/// let err = HttpError::with_status("user not found", StatusCode::NOT_FOUND);
/// assert_eq!(err.status(), StatusCode::NOT_FOUND);
/// assert!(!err.is_json());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpError {
    message: String,
    status: StatusCode,
    is_json: bool,
}

impl HttpError {
    /// Creates a plain-text error with status 400.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(message, StatusCode::BAD_REQUEST)
    }

    /// Creates a plain-text error with the given status.
    pub fn with_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
            is_json: false,
        }
    }

    /// Creates an error whose message is already a JSON document.
    pub fn json(body: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: body.into(),
            status,
            is_json: true,
        }
    }

    /// Builds the error for a request body that failed its schema.
    #[must_use]
    pub fn body_validation(error: &FieldError) -> Self {
        Self::json(
            validation_error_body(error, Some("body")),
            StatusCode::BAD_REQUEST,
        )
    }

    /// Returns the message, which is the response body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns true if the message is a JSON document.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.is_json
    }
}

/// Standard error type for the Marci pipeline.
#[derive(Error, Debug)]
pub enum MarciError {
    /// A failure with an explicit status, returned by user code or the pipeline.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Path params or query string did not match the route schema.
    #[error(transparent)]
    Validation(#[from] FieldError),

    /// Anything else. The detail is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl MarciError {
    /// Shorthand for a 400 [`HttpError`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Http(HttpError::new(message))
    }

    /// Wraps any error as an internal failure.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::Internal(source.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Http(err) => err.status(),
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for failures caused by the client.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_defaults_to_bad_request() {
        let err = HttpError::new("nope");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "nope");
        assert!(!err.is_json());
    }

    #[test]
    fn test_body_validation_error_is_json() {
        let err = HttpError::body_validation(&FieldError::new("/name", "Expected string"));
        assert!(err.is_json());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains(r#""where":"body""#));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            MarciError::from(HttpError::with_status("x", StatusCode::CONFLICT)).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            MarciError::from(FieldError::new("/id", "Expected number")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MarciError::internal(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(MarciError::bad_request("x").is_client_error());
        assert!(!MarciError::internal(std::io::Error::other("disk")).is_client_error());
    }
}
