//! The transport-level request handed to a route endpoint.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use marci_router::Params;
use serde_json::{Map, Value};

use crate::error::HttpError;

/// A fully buffered request, as delivered by the transport.
///
/// The transport has already matched the route, so `params` holds the raw
/// path captures.
#[derive(Debug, Clone)]
pub struct RawRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: Params,
    body: Bytes,
}

impl RawRequest {
    /// Creates a raw request.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, params: Params, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            params,
            body,
        }
    }

    /// Builds a raw request from `http` parts and a buffered body.
    #[must_use]
    pub fn from_parts(parts: http::request::Parts, params: Params, body: Bytes) -> Self {
        Self::new(parts.method, parts.uri, parts.headers, params, body)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw path captures.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the query string if the URI has one (possibly empty).
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Path captures as a JSON object of strings.
    #[must_use]
    pub fn params_value(&self) -> Value {
        let map: Map<String, Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Value::Object(map)
    }

    /// Query pairs as a JSON object of strings, or `None` without a query string.
    ///
    /// A repeated key keeps its last value.
    pub fn query_value(&self) -> Result<Option<Value>, HttpError> {
        let Some(query) = self.query_string() else {
            return Ok(None);
        };
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| HttpError::new(format!("Error on parsing query ({e})")))?;
        let map: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Ok(Some(Value::Object(map)))
    }

    /// Parses the body as JSON.
    ///
    /// A body that is not JSON becomes a 400 plain-text error naming the
    /// parse failure.
    pub fn json(&self) -> Result<Value, HttpError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| HttpError::new(format!("Error on parsing body ({e})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(uri: &str, body: &'static [u8]) -> RawRequest {
        let mut params = Params::new();
        params.push("userId", "42");
        RawRequest::new(
            Method::POST,
            uri.parse().unwrap(),
            HeaderMap::new(),
            params,
            Bytes::from_static(body),
        )
    }

    #[test]
    fn test_params_value_is_strings() {
        let req = request("/users/42", b"");
        assert_eq!(req.params_value(), json!({ "userId": "42" }));
    }

    #[test]
    fn test_query_absent_without_question_mark() {
        let req = request("/users/42", b"");
        assert_eq!(req.query_value().unwrap(), None);
    }

    #[test]
    fn test_query_empty_after_question_mark() {
        let req = request("/users/42?", b"");
        assert_eq!(req.query_value().unwrap(), Some(json!({})));
    }

    #[test]
    fn test_query_last_value_wins_and_decodes() {
        let req = request("/search?q=a&q=hello%20world&page=2", b"");
        assert_eq!(
            req.query_value().unwrap(),
            Some(json!({ "q": "hello world", "page": "2" }))
        );
    }

    #[test]
    fn test_json_body_parse_error_is_plain_400() {
        let req = request("/users/42", b"not json");
        let err = req.json().unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert!(!err.is_json());
        assert!(err.message().starts_with("Error on parsing body ("));
    }

    #[test]
    fn test_json_body() {
        let req = request("/users/42", br#"{"name":"Ann"}"#);
        assert_eq!(req.json().unwrap(), json!({ "name": "Ann" }));
    }
}
