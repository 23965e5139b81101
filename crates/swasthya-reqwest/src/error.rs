//! Transport error types and their mapping onto the public error.

use swasthya_core::DEFAULT_NETWORK_MESSAGE;
use thiserror::Error;

/// Failure raised below the client's public surface.
#[derive(Debug, Error)]
pub(crate) enum TransportError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<TransportError> for swasthya_core::Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Reqwest(e) => {
                let message = failure_message(&e);
                if e.is_timeout() {
                    swasthya_core::Error::timeout()
                        .with_message(message)
                        .with_source(e)
                } else if e.is_decode() {
                    swasthya_core::Error::serialization()
                        .with_message(message)
                        .with_source(e)
                } else {
                    swasthya_core::Error::network_error()
                        .with_message(message)
                        .with_source(e)
                }
            }
            TransportError::Serde(e) => swasthya_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}

fn failure_message(err: &reqwest::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        DEFAULT_NETWORK_MESSAGE.to_owned()
    } else {
        message
    }
}
