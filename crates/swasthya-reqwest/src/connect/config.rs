//! API client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SWASTHYA_API_URL";

/// Base URL used when [`API_URL_ENV`] is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Configuration for the Swasthya API client.
///
/// Only the base URL is required. The timeout is unset by default, leaving
/// requests bound only by the transport's own limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ApiConfig {
    /// Base URL of the Swasthya backend
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "SWASTHYA_API_URL", default_value = DEFAULT_API_URL)
    )]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP request timeout in seconds (unset or 0 disables it)
    #[cfg_attr(feature = "config", arg(long = "http-timeout", env = "HTTP_TIMEOUT"))]
    #[serde(default)]
    pub http_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            http_timeout: None,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Resolves the base URL from [`API_URL_ENV`], falling back to
    /// [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(default_api_url);
        Self::new(api_url)
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    /// Returns the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("swasthya/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Validates the base URL.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error unless the base URL is an absolute
    /// `http` or `https` URL.
    pub fn validate(&self) -> swasthya_core::Result<()> {
        let url = Url::parse(self.base_url()).map_err(|err| {
            swasthya_core::Error::configuration()
                .with_message(format!("invalid API URL {:?}: {err}", self.api_url))
                .with_source(err)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(swasthya_core::Error::configuration().with_message(format!(
                "API URL must use http or https, got {:?}",
                url.scheme()
            )));
        }

        Ok(())
    }
}
