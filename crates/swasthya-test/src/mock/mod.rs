//! Mock implementation of the Swasthya backend for testing.
//!
//! The backend answers every route it has been primed with and records the
//! requests it receives. Unprimed routes answer `404 {"error": "Not found"}`.

mod backend;
mod recorded;
mod response;

pub mod fixtures;

pub use backend::{MockBackend, unreachable_url};
pub use recorded::RecordedRequest;
pub use response::MockResponse;
