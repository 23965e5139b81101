#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub use mock::{MockBackend, MockResponse, RecordedRequest, fixtures, unreachable_url};

/// Tracing target for mock backend operations.
pub const TRACING_TARGET: &str = "swasthya_test::mock";
