//! Local session storage.
//!
//! This module provides the persistence layer for the authenticated session:
//! - [`KeyValueStore`]: async string key-value trait backing the session
//! - [`MemoryStore`]: process-local store, the client default
//! - [`FileStore`]: JSON file store that survives restarts
//! - [`SessionStorage`]: facade owning the bearer token and the cached user
//!
//! # Example
//!
//! ```ignore
//! let storage = SessionStorage::new(FileStore::new(".swasthya/session.json"));
//!
//! storage.set_token("tok123").await?;
//! assert!(storage.is_authenticated().await?);
//!
//! storage.clear().await?;
//! assert!(storage.token().await?.is_none());
//! ```

mod file;
mod key;
mod memory;
mod storage;
mod store;

pub use file::FileStore;
pub use key::StorageKey;
pub use memory::MemoryStore;
pub use storage::SessionStorage;
pub use store::KeyValueStore;
