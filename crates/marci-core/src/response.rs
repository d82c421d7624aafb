//! Response construction helpers.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use http_body_util::Full;

/// The response type produced by every endpoint.
pub type HttpResponse = Response<Full<Bytes>>;

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

fn with_body(status: StatusCode, content_type: Option<&'static str>, body: Bytes) -> HttpResponse {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

/// An empty 200 response.
#[must_use]
pub fn empty() -> HttpResponse {
    with_body(StatusCode::OK, None, Bytes::new())
}

/// A JSON response from an already serialized document.
#[must_use]
pub fn json_bytes(status: StatusCode, body: impl Into<Bytes>) -> HttpResponse {
    with_body(status, Some(APPLICATION_JSON), body.into())
}

/// A plain-text response.
#[must_use]
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> HttpResponse {
    with_body(status, Some(TEXT_PLAIN), body.into())
}
