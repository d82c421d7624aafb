//! Request context types.
//!
//! A [`RequestContext`] is created fresh for every dispatched request. It
//! carries the raw request, the parsed params, query and body, and a
//! caller-defined extension value that hooks fill in for handlers.

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::HttpError;
use crate::request::RawRequest;

/// A unique identifier for each request, using UUID v7.
///
/// # Example
///
/// ```
/// use marci_core::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(id.to_string().len(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new time-ordered request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-request state passed through hooks into the handler.
///
/// `C` is the caller-defined context. The request context dereferences to
/// it, so a hook can write `ctx.user = ...` and the handler reads `ctx.user`.
///
/// # Example
///
/// ```
/// use marci_core::{RawRequest, RequestContext};
/// use serde_json::json;
///
/// #[derive(Default)]
/// struct Auth {
///     user: Option<String>,
/// }
///
/// let raw = RawRequest::new(
///     http::Method::GET,
///     "/users/42".parse().unwrap(),
///     http::HeaderMap::new(),
///     marci_router::Params::new(),
///     bytes::Bytes::new(),
/// );
/// let mut ctx: RequestContext<Auth> = RequestContext::new(raw, json!({ "userId": 42 }), None);
/// ctx.user = Some("test".into());
///
/// assert_eq!(ctx.user.as_deref(), Some("test"));
/// assert_eq!(ctx.params()["userId"], 42);
/// ```
#[derive(Debug)]
pub struct RequestContext<C = ()> {
    request_id: RequestId,
    raw: RawRequest,
    params: Value,
    query: Option<Value>,
    body: Option<Value>,
    ext: C,
    started_at: Instant,
}

impl<C: Default> RequestContext<C> {
    /// Creates a context with a default extension value and no body yet.
    #[must_use]
    pub fn new(raw: RawRequest, params: Value, query: Option<Value>) -> Self {
        Self {
            request_id: RequestId::new(),
            raw,
            params,
            query,
            body: None,
            ext: C::default(),
            started_at: Instant::now(),
        }
    }
}

impl<C> RequestContext<C> {
    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the raw transport request.
    #[must_use]
    pub fn raw(&self) -> &RawRequest {
        &self.raw
    }

    /// Returns the path params, coerced if the route has a params schema.
    #[must_use]
    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Returns the query object, or `None` when the URL has no query string.
    #[must_use]
    pub fn query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    /// Returns the validated body, once body validation has run.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Stores the validated body.
    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// Deserializes the params into `T`.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        from_value(&self.params, "params")
    }

    /// Deserializes the query into `T`; a missing query reads as `{}`.
    pub fn query_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        match &self.query {
            Some(query) => from_value(query, "query"),
            None => from_value(&Value::Object(serde_json::Map::new()), "query"),
        }
    }

    /// Deserializes the body into `T`; a missing body reads as `null`.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        from_value(self.body.as_ref().unwrap_or(&Value::Null), "body")
    }

    /// Returns the caller-defined extension.
    #[must_use]
    pub fn ext(&self) -> &C {
        &self.ext
    }

    /// Returns the caller-defined extension mutably.
    pub fn ext_mut(&mut self) -> &mut C {
        &mut self.ext
    }

    /// Returns the elapsed time since the context was created.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

fn from_value<T: DeserializeOwned>(value: &Value, step: &str) -> Result<T, HttpError> {
    T::deserialize(value).map_err(|e| HttpError::new(format!("Error on reading {step} ({e})")))
}

impl<C> Deref for RequestContext<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.ext
    }
}

impl<C> DerefMut for RequestContext<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.ext
    }
}
