//! API client module.
//!
//! This module provides the transport half of the client: configuration,
//! request construction and response classification. Endpoint-specific
//! operations live in [`crate::api`].

mod client;
mod config;
mod options;

pub(crate) use client::bearer;
pub use client::{ApiClient, TRACING_TARGET};
pub use config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL};
pub use options::RequestOptions;
