//! Canned responses.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;

/// Response replayed by the mock backend.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

impl MockResponse {
    /// JSON response with the given status.
    ///
    /// Unknown status codes fall back to `500`.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type: Some("application/json"),
            body: Bytes::from(body.to_string()),
        }
    }

    /// `200 OK` JSON response.
    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    /// Plain-text response, used to exercise non-JSON bodies.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type: Some("text/plain"),
            body: Bytes::from(body.into()),
        }
    }

    /// Default answer for unprimed routes.
    pub fn not_found() -> Self {
        Self::json(404, serde_json::json!({ "error": "Not found" }))
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }
}
