//! Request builder.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request};
use serde::Serialize;

use crate::error::TestError;

/// Accumulates a buffered request.
#[derive(Debug, Clone)]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    json_error: Option<String>,
}

impl TestRequestBuilder {
    /// Starts a request.
    #[must_use]
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_owned(),
            headers: Vec::new(),
            body: Bytes::new(),
            json_error: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.headers
            .push((name.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    #[must_use]
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.body = Bytes::from(bytes),
            Err(e) => self.json_error = Some(e.to_string()),
        }
        self.header(CONTENT_TYPE.as_str(), "application/json")
    }

    /// Builds the request.
    pub fn build(self) -> Result<Request<Bytes>, TestError> {
        if let Some(error) = self.json_error {
            return Err(TestError::BodyRead(error));
        }
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        Ok(builder.body(self.body)?)
    }
}
