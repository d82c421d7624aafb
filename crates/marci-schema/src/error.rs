//! Schema errors and the validation error wire format.

use indexmap::IndexMap;
use serde::Serialize;

/// A descriptor that cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A `type` name outside the supported set.
    #[error("unknown schema type `{name}` at '{path}'")]
    UnknownType {
        /// Location inside the descriptor.
        path: String,
        /// The offending type name.
        name: String,
    },

    /// A descriptor whose shape does not fit the grammar.
    #[error("invalid schema at '{path}': {reason}")]
    Invalid {
        /// Location inside the descriptor.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `pattern` that is not a valid regular expression.
    #[error("invalid pattern at '{path}'")]
    Pattern {
        /// Location inside the descriptor.
        path: String,
        /// Regex compilation failure.
        #[source]
        source: regex::Error,
    },
}

impl SchemaError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: display_path(path),
            reason: reason.into(),
        }
    }
}

pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// The first failing field of a value checked against a schema.
///
/// `path` is a JSON pointer into the checked value (`/name`, `/tags/0`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation error at '{path}': {message}")]
pub struct FieldError {
    /// JSON pointer of the failing value.
    pub path: String,
    /// What was expected.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The field name as reported to clients: the pointer without its leading `/`.
    #[must_use]
    pub fn field(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}

#[derive(Serialize)]
struct FieldMessage<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    cause: &'static str,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    step: Option<&'a str>,
    fields: IndexMap<&'a str, FieldMessage<'a>>,
}

/// Renders the canonical validation error body.
///
/// ```rust
/// use marci_schema::{validation_error_body, FieldError};
///
/// let err = FieldError::new("/name", "Expected string");
/// assert_eq!(
///     validation_error_body(&err, Some("body")),
///     r#"{"cause":"Validation error","where":"body","fields":{"name":{"message":"Expected string"}}}"#
/// );
/// ```
#[must_use]
pub fn validation_error_body(error: &FieldError, step: Option<&str>) -> String {
    let mut fields = IndexMap::with_capacity(1);
    fields.insert(
        error.field(),
        FieldMessage {
            message: &error.message,
        },
    );
    let body = ValidationBody {
        cause: "Validation error",
        step,
        fields,
    };
    // Only string keys and values; serialization cannot fail.
    serde_json::to_string(&body).unwrap_or_default()
}
