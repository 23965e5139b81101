//! Authentication endpoints and session lifecycle.

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use swasthya_core::types::{LoginRequest, RegisterRequest};
use swasthya_core::{ApiEnvelope, AuthResponse, Result};

use super::TRACING_TARGET;
use crate::connect::{ApiClient, RequestOptions, bearer};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const CURRENT_USER_PATH: &str = "/api/auth/me";

impl ApiClient {
    /// Signs in and persists the returned session.
    ///
    /// The full response envelope is returned unchanged.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AuthResponse> {
        let request = LoginRequest::new(email, password);
        let response: AuthResponse = self.post(LOGIN_PATH, &request).await?;
        self.persist_session(&response).await?;

        tracing::info!(
            target: TRACING_TARGET,
            authenticated = response.session_token().is_some(),
            "Login completed"
        );

        Ok(response)
    }

    /// Creates an account and persists the returned session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.post(REGISTER_PATH, request).await?;
        self.persist_session(&response).await?;

        tracing::info!(
            target: TRACING_TARGET,
            authenticated = response.session_token().is_some(),
            "Registration completed"
        );

        Ok(response)
    }

    /// Ends the session.
    ///
    /// Local state is cleared first, so the client is signed out even when
    /// the server cannot be reached. The server is then notified with the
    /// token that was stored; a failed notification is logged and ignored.
    pub async fn logout(&self) -> Result<()> {
        let token = self.session().token().await?;
        self.clear_auth().await?;

        let mut options = RequestOptions::new(Method::POST).with_body(b"{}".to_vec());
        if let Some(token) = token.as_deref() {
            options = options.with_header(AUTHORIZATION, bearer(token)?);
        }

        match self.request::<Value>(LOGOUT_PATH, options).await {
            Ok(_) => {
                tracing::info!(target: TRACING_TARGET, "Logged out");
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    status_code = error.status_code,
                    "Logout notification failed, local session already cleared"
                );
            }
        }

        Ok(())
    }

    /// Fetches the signed-in user's profile.
    pub async fn current_user(&self) -> Result<ApiEnvelope> {
        self.get(CURRENT_USER_PATH).await
    }

    /// Removes the stored token and user profile.
    pub async fn clear_auth(&self) -> Result<()> {
        self.session().clear().await
    }

    /// Returns true when a token is stored.
    pub async fn is_authenticated(&self) -> Result<bool> {
        self.session().is_authenticated().await
    }

    /// Returns the cached user profile.
    pub async fn stored_user(&self) -> Result<Option<Value>> {
        self.session().user().await
    }

    async fn persist_session(&self, response: &AuthResponse) -> Result<()> {
        let Some(token) = response.session_token() else {
            return Ok(());
        };

        self.session().set_token(token).await?;
        if let Some(user) = response.user.as_ref().filter(|u| !u.is_null()) {
            self.session().set_user(user).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use swasthya_core::{ErrorKind, MemoryStore, SessionStorage};
    use swasthya_test::{MockBackend, MockResponse, fixtures, unreachable_url};

    use super::*;
    use crate::ApiConfig;

    fn client_for(url: String) -> ApiClient {
        ApiClient::new(ApiConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let backend = MockBackend::start().await.unwrap();
        let body = fixtures::auth_envelope("a@b.com", "tok123");
        backend
            .mock(Method::POST, LOGIN_PATH, MockResponse::ok(body.clone()))
            .await;

        let client = client_for(backend.url());
        let response = client.login("a@b.com", "pw").await.unwrap();

        assert_eq!(serde_json::to_value(&response).unwrap(), body);
        assert_eq!(client.session().token().await.unwrap().as_deref(), Some("tok123"));
        assert_eq!(
            client.stored_user().await.unwrap(),
            Some(json!({ "email": "a@b.com" }))
        );

        let request = backend.last_request().await.unwrap();
        assert_eq!(request.json(), Some(json!({ "email": "a@b.com", "password": "pw" })));
        assert!(request.authorization().is_none());
    }

    #[tokio::test]
    async fn test_login_without_token_keeps_session_empty() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                LOGIN_PATH,
                MockResponse::ok(json!({ "message": "Check your email", "user": { "id": 1 } })),
            )
            .await;

        let client = client_for(backend.url());
        client.login("a@b.com", "pw").await.unwrap();

        assert!(!client.is_authenticated().await.unwrap());
        assert!(client.stored_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_with_null_user_stores_only_token() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                LOGIN_PATH,
                MockResponse::ok(json!({ "token": "tok123", "user": null })),
            )
            .await;

        let client = client_for(backend.url());
        client.login("a@b.com", "pw").await.unwrap();

        assert!(client.is_authenticated().await.unwrap());
        assert!(client.stored_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                LOGIN_PATH,
                MockResponse::json(401, fixtures::error_envelope("Invalid credentials")),
            )
            .await;

        let client = client_for(backend.url());
        let error = client.login("a@b.com", "wrong").await.unwrap_err();

        assert_eq!(error.message(), "Invalid credentials");
        assert_eq!(error.status_code, 401);
        assert_eq!(error.kind, ErrorKind::Authentication);
        assert!(!client.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_register_sends_camel_case_and_persists() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                REGISTER_PATH,
                MockResponse::json(201, fixtures::auth_envelope("a@b.com", "tok789")),
            )
            .await;

        let client = client_for(backend.url());
        let request = RegisterRequest::from_full_name("Asha Rao", "a@b.com", "password1");
        client.register(&request).await.unwrap();

        assert_eq!(client.session().token().await.unwrap().as_deref(), Some("tok789"));
        assert_eq!(
            client.stored_user().await.unwrap(),
            Some(json!({ "email": "a@b.com" }))
        );

        let recorded = backend.last_request().await.unwrap();
        let body = recorded.json().unwrap();
        assert_eq!(body["firstName"], "Asha");
        assert_eq!(body["lastName"], "Rao");
        assert_eq!(body["role"], "patient");
        assert!(body.get("gender").is_none());
    }

    #[tokio::test]
    async fn test_logout_notifies_with_previous_token() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                LOGOUT_PATH,
                MockResponse::ok(json!({ "message": "Logged out" })),
            )
            .await;

        let client = client_for(backend.url());
        client.session().set_token("tok123").await.unwrap();
        client.session().set_user(&json!({ "email": "a@b.com" })).await.unwrap();

        client.logout().await.unwrap();

        assert!(!client.is_authenticated().await.unwrap());
        assert!(client.stored_user().await.unwrap().is_none());

        let request = backend.last_request().await.unwrap();
        assert_eq!(request.path, LOGOUT_PATH);
        assert_eq!(request.authorization(), Some("Bearer tok123"));
        assert_eq!(request.json(), Some(json!({})));
    }

    #[tokio::test]
    async fn test_logout_clears_session_when_server_unreachable() {
        let store = MemoryStore::new();
        let session = SessionStorage::new(store.clone());
        let url = unreachable_url().await.unwrap();
        let client = ApiClient::with_session(ApiConfig::new(url), session).unwrap();

        client.session().set_token("tok123").await.unwrap();
        client.session().set_user(&json!({ "email": "a@b.com" })).await.unwrap();

        client.logout().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_logout_ignores_server_error() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                LOGOUT_PATH,
                MockResponse::json(500, fixtures::error_envelope("boom")),
            )
            .await;

        let client = client_for(backend.url());
        client.session().set_token("tok123").await.unwrap();

        assert!(client.logout().await.is_ok());
        assert!(!client.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_without_session_sends_no_token() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(Method::POST, LOGOUT_PATH, MockResponse::ok(json!({})))
            .await;

        let client = client_for(backend.url());
        client.logout().await.unwrap();

        let request = backend.last_request().await.unwrap();
        assert!(request.authorization().is_none());
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::GET,
                CURRENT_USER_PATH,
                MockResponse::ok(json!({ "user": { "email": "a@b.com", "role": "patient" } })),
            )
            .await;

        let client = client_for(backend.url());
        client.session().set_token("tok123").await.unwrap();
        let envelope = client.current_user().await.unwrap();

        assert_eq!(envelope.user.unwrap()["role"], "patient");
        let request = backend.last_request().await.unwrap();
        assert_eq!(request.authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_unauthenticated_current_user() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::GET,
                CURRENT_USER_PATH,
                MockResponse::json(401, fixtures::error_envelope("Authentication required")),
            )
            .await;

        let client = client_for(backend.url());
        let error = client.current_user().await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.payload, Some(json!({ "error": "Authentication required" })));
    }
}
