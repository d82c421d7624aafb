//! Response wrapper with assertion helpers.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};
use http_body_util::BodyExt;
use marci_core::HttpResponse;
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Buffers an endpoint response.
    pub async fn from_http(response: HttpResponse) -> Result<Self, TestError> {
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| TestError::BodyRead(e.to_string()))?
            .to_bytes();
        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status code as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header by name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers.get(name.as_ref())
    }

    /// The `Content-Type` header, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
            .and_then(|v| v.to_str().ok())
    }

    /// Raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| TestError::BodyRead(format!("invalid UTF-8: {e}")))
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as a JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, TestError> {
        self.json()
    }

    /// Panics unless the status matches.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "expected status {expected}, got {} with body {:?}",
            self.status, self.body
        );
        self
    }

    /// Panics unless the numeric status matches.
    pub fn assert_status_code(&self, expected: u16) -> &Self {
        match StatusCode::from_u16(expected) {
            Ok(status) => self.assert_status(status),
            Err(_) => panic!("{expected} is not a valid status code"),
        }
    }

    /// Panics unless the header is present with the given value.
    pub fn assert_header(&self, name: impl AsRef<str>, expected: impl AsRef<str>) -> &Self {
        let name = name.as_ref();
        let actual = self.header(name).and_then(|v| v.to_str().ok());
        assert_eq!(
            actual,
            Some(expected.as_ref()),
            "unexpected value for header {name}"
        );
        self
    }

    /// Panics unless the body is exactly `expected`.
    pub fn assert_text(&self, expected: impl AsRef<str>) -> &Self {
        assert_eq!(self.body.as_ref(), expected.as_ref().as_bytes());
        self
    }

    /// Panics unless the body is empty.
    pub fn assert_empty(&self) -> &Self {
        assert!(self.body.is_empty(), "expected empty body, got {:?}", self.body);
        self
    }

    /// Panics unless the body is JSON equal to `expected`.
    pub fn assert_json(&self, expected: &serde_json::Value) -> &Self {
        let actual = self.json_value();
        assert!(
            matches!(&actual, Ok(value) if value == expected),
            "expected JSON {expected}, got {actual:?}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marci_core::response::{json_bytes, text};
    use serde_json::json;

    #[tokio::test]
    async fn test_json_response() {
        let response = TestResponse::from_http(json_bytes(StatusCode::OK, r#"{"id":42}"#))
            .await
            .unwrap();
        response
            .assert_status_code(200)
            .assert_header("content-type", "application/json")
            .assert_json(&json!({ "id": 42 }));
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = TestResponse::from_http(text(StatusCode::NOT_FOUND, "Route /x not Found"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.text().unwrap(), "Route /x not Found");
        assert!(response.json_value().is_err());
    }

    #[test]
    #[should_panic(expected = "expected status")]
    fn test_assert_status_panics() {
        let response = TestResponse {
            status: StatusCode::BAD_REQUEST,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        response.assert_status(StatusCode::OK);
    }
}
