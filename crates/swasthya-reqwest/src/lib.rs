//! Reqwest-based client for the Swasthya backend API.
//!
//! [`ApiClient`] wraps a `reqwest` client together with the session storage
//! it reads the bearer token from. Generic verbs (`get`, `post`, `put`,
//! `delete`, `post_multipart`) normalize every failure into
//! [`swasthya_core::Error`]; the endpoint operations in [`api`] build on them.
//!
//! # Example
//!
//! ```rust,ignore
//! use swasthya_core::{FileStore, SessionStorage};
//! use swasthya_reqwest::{ApiClient, ApiConfig};
//!
//! let session = SessionStorage::new(FileStore::new(".swasthya/session.json"));
//! let client = ApiClient::with_session(ApiConfig::from_env(), session)?;
//!
//! client.login("a@b.com", "password1").await?;
//! let diagnosis = client.diagnose(&["headache", "fever"], None).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
mod connect;
mod error;

pub use swasthya_core::{Error, ErrorKind, Result};

pub use crate::connect::{
    API_URL_ENV, ApiClient, ApiConfig, DEFAULT_API_URL, RequestOptions, TRACING_TARGET,
};
