//! Per-request options for the generic request method.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Method, body and extra headers of a single request.
///
/// Headers given here override the client defaults, except `Authorization`
/// which always reflects the stored session token when one exists.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Pre-serialized request body.
    pub body: Option<Vec<u8>>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
