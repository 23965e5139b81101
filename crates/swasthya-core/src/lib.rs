#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for session storage operations.
pub const TRACING_TARGET_SESSION: &str = "swasthya_core::session";

mod envelope;
mod error;

pub mod session;
pub mod types;

pub use envelope::{ApiEnvelope, AuthResponse};
pub use error::{
    BoxedError, DEFAULT_NETWORK_MESSAGE, DEFAULT_SERVER_MESSAGE, DEFAULT_STATUS_CODE, Error,
    ErrorKind, Result,
};
pub use session::{FileStore, KeyValueStore, MemoryStore, SessionStorage, StorageKey};
