//! Global error responder and 404 fallback.

use http::StatusCode;
use marci_core::response::{json_bytes, text};
use marci_core::{HttpResponse, MarciError};
use marci_schema::validation_error_body;

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Maps a pipeline error to the response sent to the client.
///
/// Internal errors are logged with their detail and answered with a generic
/// 500 body.
pub fn error_response(err: &MarciError) -> HttpResponse {
    match err {
        MarciError::Http(http) if http.is_json() => {
            json_bytes(http.status(), http.message().to_owned())
        }
        MarciError::Http(http) => text(http.status(), http.message().to_owned()),
        MarciError::Validation(field) => json_bytes(
            StatusCode::BAD_REQUEST,
            validation_error_body(field, None),
        ),
        MarciError::Internal(source) => {
            tracing::error!(error = ?source, "unhandled error in request pipeline");
            text(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
        }
    }
}

/// The response for a path or method with no route.
pub fn not_found_response(path: &str) -> HttpResponse {
    text(StatusCode::NOT_FOUND, format!("Route {path} not Found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;
    use marci_core::HttpError;
    use marci_schema::FieldError;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_plain_http_error() {
        let err = MarciError::from(HttpError::with_status("nope", StatusCode::FORBIDDEN));
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_string(response).await, "nope");
    }

    #[tokio::test]
    async fn test_json_http_error_is_verbatim() {
        let err = MarciError::from(HttpError::json(r#"{"a":1}"#, StatusCode::CONFLICT));
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_string(response).await, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_validation_error_has_no_where() {
        let err = MarciError::from(FieldError::new("/userId", "Expected number"));
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["cause"], "Validation error");
        assert!(body.get("where").is_none());
        assert_eq!(body["fields"]["userId"]["message"], "Expected number");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = MarciError::internal(std::io::Error::other("disk on fire"));
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, INTERNAL_ERROR_BODY);
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = not_found_response("/missing");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Route /missing not Found");
    }
}
