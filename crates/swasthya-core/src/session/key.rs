//! Fixed keys of the session storage.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Keys under which the session is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum StorageKey {
    /// Raw bearer token string.
    #[strum(serialize = "@swasthya_auth_token")]
    AuthToken,
    /// JSON-serialized last known user profile.
    #[strum(serialize = "@swasthya_user")]
    User,
}
