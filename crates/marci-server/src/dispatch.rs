//! Request dispatch over a frozen route table.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::Request;
use marci_core::{HttpResponse, RawRequest, RouteTable};

use crate::responder::{error_response, not_found_response};

/// Resolves requests against a [`RouteTable`] and runs the matched endpoint.
///
/// Every request gets exactly one response: the endpoint's, the mapped error,
/// or the 404 fallback.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    /// Creates a dispatcher over a frozen table.
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    /// Returns the route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Dispatches a buffered request.
    pub async fn dispatch(&self, request: Request<Bytes>) -> HttpResponse {
        let (parts, body) = request.into_parts();
        let started = Instant::now();
        let method = parts.method.clone();
        let path = parts.uri.path().to_owned();

        let Some(matched) = self.table.match_route(&method, &path) else {
            tracing::debug!(http.method = %method, http.path = %path, "no route matched");
            return not_found_response(&path);
        };

        let endpoint = Arc::clone(matched.value);
        let raw = RawRequest::from_parts(parts, matched.params, body);

        let response = match endpoint(raw).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_client_error() {
                    tracing::warn!(http.method = %method, http.path = %path, error = %err, "request rejected");
                }
                error_response(&err)
            }
        };

        tracing::debug!(
            http.method = %method,
            http.path = %path,
            http.status_code = response.status().as_u16(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request completed"
        );
        response
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::FutureExt;
    use http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use marci_core::response::text;
    use marci_core::{Endpoint, HttpError, MarciError};

    fn echo_param(name: &'static str) -> Endpoint {
        Arc::new(move |raw: RawRequest| {
            let value = raw.params().get(name).unwrap_or_default().to_owned();
            async move { Ok(text(StatusCode::OK, value)) }.boxed()
        })
    }

    fn request(method: Method, uri: &str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_passes_params() {
        let mut table = RouteTable::new();
        table.route(&Method::GET, "/users/:id", echo_param("id")).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(table));

        let response = dispatcher.dispatch(request(Method::GET, "/users/42?x=1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "42");
    }

    #[tokio::test]
    async fn test_unmatched_method_is_404_and_handler_not_called() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let endpoint: Endpoint = Arc::new(move |_raw: RawRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(marci_core::response::empty()) }.boxed()
        });

        let mut table = RouteTable::new();
        table.route(&Method::GET, "/users", endpoint).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(table));

        let response = dispatcher.dispatch(request(Method::DELETE, "/users")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Route /users not Found");

        let response = dispatcher.dispatch(request(Method::GET, "/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_endpoint_error_is_mapped() {
        let endpoint: Endpoint = Arc::new(|_raw: RawRequest| {
            async { Err(MarciError::from(HttpError::with_status("teapot", StatusCode::IM_A_TEAPOT))) }
                .boxed()
        });
        let mut table = RouteTable::new();
        table.route(&Method::POST, "/brew", endpoint).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(table));

        let response = dispatcher.dispatch(request(Method::POST, "/brew")).await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(body_string(response).await, "teapot");
    }
}
