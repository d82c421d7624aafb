//! In-memory client.

use std::sync::Arc;

use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::Method;
use marci_core::RouteTable;
use marci_server::Dispatcher;

use crate::error::TestError;
use crate::request::TestRequestBuilder;
use crate::response::TestResponse;

/// Sends requests straight to a [`Dispatcher`].
///
/// Unmatched routes get the same 404 and errors the same mapping as over
/// a real socket.
#[must_use]
#[derive(Debug, Clone)]
pub struct TestClient {
    dispatcher: Dispatcher,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Creates a client for a frozen route table.
    pub fn new(table: RouteTable) -> Self {
        Self::from_dispatcher(Dispatcher::new(Arc::new(table)))
    }

    /// Creates a client around an existing dispatcher.
    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// `GET` request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// `POST` request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// `PUT` request.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// `PATCH` request.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PATCH, uri)
    }

    /// `DELETE` request.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let builder = self
            .default_headers
            .iter()
            .fold(TestRequestBuilder::new(method, uri), |b, (name, value)| {
                b.header(name, value)
            });
        TestClientRequest {
            client: self,
            builder,
        }
    }
}

/// A request bound to a [`TestClient`].
#[derive(Debug)]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header(AUTHORIZATION.as_str(), value)
    }

    /// Sets the raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request, panicking if it cannot be built.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("test request failed: {e}"),
        }
    }

    /// Sends the request.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        let response = self.client.dispatcher.dispatch(request).await;
        TestResponse::from_http(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use http::StatusCode;
    use marci_core::response::text;
    use marci_core::{Endpoint, RawRequest};

    fn header_echo() -> RouteTable {
        let endpoint: Endpoint = Arc::new(|raw: RawRequest| {
            let auth = raw.header("authorization").unwrap_or("none").to_owned();
            async move { Ok(text(StatusCode::OK, auth)) }.boxed()
        });
        let mut table = RouteTable::new();
        table.route(&Method::GET, "/whoami", endpoint).unwrap();
        table
    }

    #[tokio::test]
    async fn test_bearer_token() {
        let client = TestClient::new(header_echo());
        client
            .get("/whoami")
            .bearer_token("abc")
            .send()
            .await
            .assert_text("Bearer abc");
    }

    #[tokio::test]
    async fn test_default_header() {
        let client = TestClient::new(header_echo()).with_default_header("Authorization", "Basic x");
        client.get("/whoami").send().await.assert_text("Basic x");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let client = TestClient::new(header_echo());
        client
            .post("/whoami")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND)
            .assert_text("Route /whoami not Found");
    }
}
