//! Key-value store trait.

use crate::Result;

/// Async string key-value store backing the session.
///
/// Implementations guard single operations only; there are no multi-key
/// transactions, so concurrent writers follow last-write-wins.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
