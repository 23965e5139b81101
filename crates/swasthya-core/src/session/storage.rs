//! Session facade over a key-value store.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use super::{KeyValueStore, MemoryStore, StorageKey};
use crate::{Error, ErrorKind, Result, TRACING_TARGET_SESSION};

/// Owner of the bearer token and the cached user profile.
///
/// Token and profile share a lifecycle: both are written after a successful
/// login or registration and both are removed by [`SessionStorage::clear`].
/// Cloning is cheap and clones share the underlying store.
#[derive(Clone)]
pub struct SessionStorage {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStorage").finish_non_exhaustive()
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl SessionStorage {
    /// Creates a session facade over the given store.
    pub fn new<S>(store: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the stored bearer token.
    pub async fn token(&self) -> Result<Option<String>> {
        self.store.get(StorageKey::AuthToken.as_ref()).await
    }

    /// Stores the bearer token, replacing any previous one.
    #[instrument(skip_all, target = TRACING_TARGET_SESSION)]
    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(StorageKey::AuthToken.as_ref(), token).await?;
        debug!(target: TRACING_TARGET_SESSION, "Stored auth token");
        Ok(())
    }

    /// Removes the bearer token.
    pub async fn remove_token(&self) -> Result<()> {
        self.store.remove(StorageKey::AuthToken.as_ref()).await
    }

    /// Returns the cached user profile.
    pub async fn user(&self) -> Result<Option<Value>> {
        let Some(raw) = self.store.get(StorageKey::User.as_ref()).await? else {
            return Ok(None);
        };

        let user = serde_json::from_str(&raw).map_err(|err| {
            Error::from_source(ErrorKind::Storage, err).with_message("stored user is not valid JSON")
        })?;
        Ok(Some(user))
    }

    /// Caches the user profile, replacing any previous one.
    #[instrument(skip_all, target = TRACING_TARGET_SESSION)]
    pub async fn set_user(&self, user: &Value) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(StorageKey::User.as_ref(), &raw).await?;
        debug!(
            target: TRACING_TARGET_SESSION,
            size_bytes = raw.len(),
            "Stored user profile"
        );
        Ok(())
    }

    /// Removes the cached user profile.
    pub async fn remove_user(&self) -> Result<()> {
        self.store.remove(StorageKey::User.as_ref()).await
    }

    /// Removes both the token and the user profile.
    #[instrument(skip_all, target = TRACING_TARGET_SESSION)]
    pub async fn clear(&self) -> Result<()> {
        self.remove_token().await?;
        self.remove_user().await?;
        debug!(target: TRACING_TARGET_SESSION, "Cleared session");
        Ok(())
    }

    /// Returns true when a token is stored.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }
}
