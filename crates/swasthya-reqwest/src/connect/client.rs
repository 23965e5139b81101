//! Reqwest-based API client.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use swasthya_core::{Error, ErrorKind, Result, SessionStorage};

use super::{ApiConfig, RequestOptions};
use crate::error::TransportError;

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "swasthya_reqwest::client";

/// Inner client that holds the HTTP client, configuration and session.
struct ApiClientInner {
    http: Client,
    config: ApiConfig,
    session: SessionStorage,
}

/// Client for the Swasthya backend API.
///
/// Every call reads the bearer token from the injected [`SessionStorage`] and
/// sends it as `Authorization: Bearer <token>` when present. Responses are
/// parsed as JSON whatever their status; non-success statuses become an
/// [`Error`] carrying the status and the parsed body.
///
/// Cloning is cheap and clones share the connection pool and the session.
///
/// # Examples
///
/// ```rust,ignore
/// use swasthya_reqwest::{ApiClient, ApiConfig};
///
/// let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:3000"))?;
/// let envelope = client.login("a@b.com", "password1").await?;
/// assert!(client.is_authenticated().await?);
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client with an in-memory session.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::with_session(config, SessionStorage::default())
    }

    /// Creates a client configured from the environment with an in-memory session.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// Creates a client bound to the given session storage.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn with_session(config: ApiConfig, session: SessionStorage) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            api_url = %config.base_url(),
            timeout_secs = ?config.timeout().map(|t| t.as_secs()),
            "Creating API client"
        );

        let mut builder = Client::builder().user_agent(config.effective_user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(|err| {
            Error::from_source(ErrorKind::Configuration, err)
                .with_message("failed to create HTTP client")
        })?;

        let inner = ApiClientInner {
            http,
            config,
            session,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Gets the session storage.
    pub fn session(&self) -> &SessionStorage {
        &self.inner.session
    }

    /// Resolves an endpoint against the base URL.
    ///
    /// Endpoints starting with `http` are treated as absolute and returned
    /// unchanged.
    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            return endpoint.to_owned();
        }

        let base = self.config().base_url();
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }

    /// Sends a request and decodes the JSON response into `T`.
    ///
    /// `Content-Type: application/json` is sent unless `options` overrides
    /// it. The body, if any, must already be serialized.
    ///
    /// # Errors
    ///
    /// - non-success status: the body's `error` field as message, the status
    ///   as code and the body as payload;
    /// - transport or JSON failure: the underlying message and the default code.
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve_url(endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(authorization) = self.authorization().await? {
            headers.insert(AUTHORIZATION, authorization);
        }

        let mut builder = self.http().request(options.method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        self.execute(options.method, &url, builder).await
    }

    /// Sends a `GET` request.
    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    /// Serializes `body` as JSON and sends a `POST` request.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(TransportError::from)?;
        self.request(endpoint, RequestOptions::new(Method::POST).with_body(body))
            .await
    }

    /// Serializes `body` as JSON and sends a `PUT` request.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(TransportError::from)?;
        self.request(endpoint, RequestOptions::new(Method::PUT).with_body(body))
            .await
    }

    /// Sends a `DELETE` request.
    pub async fn delete<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request(endpoint, RequestOptions::new(Method::DELETE))
            .await
    }

    /// Sends a multipart `POST` request.
    ///
    /// No `Content-Type` is set here; the transport generates it together
    /// with the multipart boundary. The bearer token is still attached.
    pub async fn post_multipart<T>(&self, endpoint: &str, form: Form) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve_url(endpoint);

        let mut builder = self.http().post(&url).multipart(form);
        if let Some(authorization) = self.authorization().await? {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        self.execute(Method::POST, &url, builder).await
    }

    /// Returns the `Authorization` value for the stored token, if any.
    ///
    /// An empty stored token sends no header.
    async fn authorization(&self) -> Result<Option<HeaderValue>> {
        match self.session().token().await? {
            Some(token) if !token.is_empty() => bearer(&token).map(Some),
            _ => Ok(None),
        }
    }

    async fn execute<T>(&self, method: Method, url: &str, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            %method,
            %url,
            "Sending request"
        );

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET,
                %method,
                %url,
                error = %err,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Request failed before a response was received"
            );
            Error::from(TransportError::from(err))
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::from(TransportError::from(err)))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(TransportError::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            %method,
            %url,
            status_code = status.as_u16(),
            success = status.is_success(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Request completed"
        );

        if !status.is_success() {
            return Err(Error::from_response(status.as_u16(), body));
        }

        Ok(serde_json::from_value(body).map_err(TransportError::from)?)
    }
}

/// Builds a sensitive `Bearer` header value.
pub(crate) fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
        Error::from_source(ErrorKind::Storage, err)
            .with_message("stored token is not a valid header value")
    })?;
    value.set_sensitive(true);
    Ok(value)
}
