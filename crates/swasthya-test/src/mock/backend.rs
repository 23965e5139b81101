//! In-process mock server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::IntoResponse;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{MockResponse, RecordedRequest};
use crate::TRACING_TARGET;

type RouteKey = (Method, String);

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<RouteKey, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock backend bound to an ephemeral local port.
///
/// The server task is aborted when the backend is dropped.
pub struct MockBackend {
    address: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Starts a backend on `127.0.0.1:0`.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let state = MockState::default();

        let router = Router::new().fallback(record_and_reply).with_state(state.clone());

        // Run the backend in a separate task so the test can drive the client.
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                tracing::warn!(target: TRACING_TARGET, error = %err, "Mock backend stopped");
            }
        });

        tracing::debug!(target: TRACING_TARGET, %address, "Mock backend started");

        Ok(Self {
            address,
            state,
            handle,
        })
    }

    /// Base URL of the backend, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Socket address the backend listens on.
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Primes `method path` to answer with `response`.
    ///
    /// `path` is matched without the query string.
    pub async fn mock(&self, method: Method, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .await
            .insert((method, path.to_owned()), response);
    }

    /// Returns every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Returns the most recent request.
    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().await.last().cloned()
    }

    /// Returns the requests received on `path`.
    pub async fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_reply(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_owned();
    let key = (method.clone(), path.clone());

    state.requests.lock().await.push(RecordedRequest {
        method,
        path,
        query: uri.query().map(str::to_owned),
        headers,
        body,
    });

    state
        .routes
        .lock()
        .await
        .get(&key)
        .cloned()
        .unwrap_or_else(MockResponse::not_found)
}

/// Returns a URL on which nothing listens.
///
/// A port is bound and released immediately, so connecting is refused.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub async fn unreachable_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{address}"))
}
