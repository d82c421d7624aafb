//! Handler return values and their normalization into responses.
//!
//! Whatever a handler returns is turned into a [`Reply`]:
//!
//! - nothing (`()`, `None`) becomes an empty 200
//! - a full [`HttpResponse`] is sent unchanged
//! - any other value is serialized as a JSON 200

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::error::MarciError;
use crate::response::{self, HttpResponse};

/// A normalized handler result.
#[derive(Debug)]
pub enum Reply {
    /// Empty 200 response.
    Empty,
    /// JSON 200 response.
    Json(Value),
    /// A response built by the handler, sent as-is.
    Response(HttpResponse),
}

impl Reply {
    /// Converts the reply into a transport response.
    pub fn into_response(self) -> Result<HttpResponse, MarciError> {
        match self {
            Self::Empty => Ok(response::empty()),
            Self::Json(value) => {
                let body = serde_json::to_vec(&value).map_err(MarciError::internal)?;
                Ok(response::json_bytes(StatusCode::OK, body))
            }
            Self::Response(response) => Ok(response),
        }
    }
}

/// Wraps a serializable value to be sent as JSON.
///
/// ```
/// use marci_core::{IntoReply, Json, Reply};
///
/// #[derive(serde::Serialize)]
/// struct User { id: u64 }
///
/// let reply = Json(User { id: 42 }).into_reply().unwrap();
/// assert!(matches!(reply, Reply::Json(v) if v["id"] == 42));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Values a handler may return.
pub trait IntoReply {
    /// Normalizes `self` into a [`Reply`].
    fn into_reply(self) -> Result<Reply, MarciError>;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(self)
    }
}

impl IntoReply for () {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(Reply::Empty)
    }
}

impl IntoReply for HttpResponse {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(Reply::Response(self))
    }
}

impl IntoReply for Value {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(Reply::Json(self))
    }
}

impl IntoReply for String {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(Reply::Json(Value::String(self)))
    }
}

impl IntoReply for &'static str {
    fn into_reply(self) -> Result<Reply, MarciError> {
        Ok(Reply::Json(Value::from(self)))
    }
}

impl<T: Serialize> IntoReply for Json<T> {
    fn into_reply(self) -> Result<Reply, MarciError> {
        serde_json::to_value(self.0)
            .map(Reply::Json)
            .map_err(MarciError::internal)
    }
}

impl<T: IntoReply> IntoReply for Option<T> {
    fn into_reply(self) -> Result<Reply, MarciError> {
        match self {
            Some(inner) => inner.into_reply(),
            None => Ok(Reply::Empty),
        }
    }
}
