//! Session vault port - durable client-side session storage

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::User;

/// Token and profile as kept between runs. Written on login, removed on
/// logout, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: String,
    pub user: User,
}

/// Durable session storage abstraction
///
/// The gateway also reads the token from here at request time, so a
/// session written by one component is immediately visible to the others.
pub trait SessionVault: Send + Sync {
    /// Load the persisted session. Unreadable or corrupt contents load as
    /// `None` - a broken vault means logged out, never an error at startup.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Persist token and user together
    fn store(&self, access_token: &str, user: &User) -> Result<()>;

    /// Remove any persisted session
    fn clear(&self) -> Result<()>;

    /// The bearer token, if a session is stored
    fn access_token(&self) -> Option<String> {
        self.load().ok().flatten().map(|s| s.access_token)
    }
}
