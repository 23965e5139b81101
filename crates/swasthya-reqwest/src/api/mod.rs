//! Endpoint operations of the Swasthya backend.
//!
//! Each submodule extends [`ApiClient`](crate::ApiClient) with the calls of
//! one backend area and decodes responses into the types of
//! [`swasthya_core::types`].

mod ai;
mod auth;
mod records;

pub use ai::{ANALYZE_IMAGE_PATH, ANALYZE_SYMPTOMS_PATH, DIAGNOSE_PATH};
pub use auth::{CURRENT_USER_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};
pub use records::{PATIENT_RECORDS_PATH, STORE_RECORD_PATH, VERIFY_RECORD_PATH};

/// Tracing target for endpoint operations.
pub const TRACING_TARGET: &str = "swasthya_reqwest::api";
