//! Session store - the authentication state machine

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::result::{Error, Result};
use crate::domain::{Registration, User};
use crate::ports::{NewsGateway, SessionVault};

/// Authentication state
///
/// Token and user live in one variant, so they are set and cleared
/// together. A half-authenticated state cannot be represented.
#[derive(Debug, Clone)]
pub enum Session {
    Anonymous,
    Authenticated { token: String, user: User },
}

/// Holds the session and drives its transitions
///
/// The vault is written through on login and cleared on logout, so the
/// persisted session always mirrors the in-memory one.
pub struct SessionStore {
    state: RwLock<Session>,
    gateway: Arc<dyn NewsGateway>,
    vault: Arc<dyn SessionVault>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn NewsGateway>, vault: Arc<dyn SessionVault>) -> Self {
        Self {
            state: RwLock::new(Session::Anonymous),
            gateway,
            vault,
        }
    }

    // === Transitions ===

    /// Exchange credentials for a session
    ///
    /// On success the session is persisted and the state becomes
    /// Authenticated. On any failure (rejected credentials, network,
    /// vault write) the current state is untouched and the error
    /// propagates unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let session = self.gateway.authenticate(email, password).await?;
        self.vault
            .store(&session.access_token, &session.user)
            .map_err(|e| Error::storage(format!("could not persist session: {}", e)))?;
        *self.write_state() = Session::Authenticated {
            token: session.access_token,
            user: session.user.clone(),
        };
        Ok(session.user)
    }

    /// Drop the session unconditionally
    ///
    /// The state is Anonymous even when removing the vault entry fails.
    pub fn logout(&self) -> Result<()> {
        *self.write_state() = Session::Anonymous;
        self.vault.clear()
    }

    /// Rehydrate a previously persisted session without a network call
    pub fn restore(&self, token: &str, user: User) {
        *self.write_state() = Session::Authenticated {
            token: token.to_string(),
            user,
        };
    }

    /// Create a new account. A side channel: session state never changes,
    /// the caller logs in separately.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate().map_err(Error::validation)?;
        self.gateway.register(registration).await
    }

    // === Derived queries ===

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.read_state(), Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<String> {
        match &*self.read_state() {
            Session::Authenticated { token, .. } => Some(token.clone()),
            Session::Anonymous => None,
        }
    }

    pub fn current_user(&self) -> Option<User> {
        match &*self.read_state() {
            Session::Authenticated { user, .. } => Some(user.clone()),
            Session::Anonymous => None,
        }
    }

    /// First name for greeting lines; empty when anonymous
    pub fn first_name(&self) -> String {
        self.current_user()
            .map(|u| u.firstname)
            .unwrap_or_default()
    }

    /// Avatar URL; empty when anonymous
    pub fn avatar_url(&self) -> String {
        self.current_user().map(|u| u.image).unwrap_or_default()
    }

    /// `Bearer {token}` header value, when authenticated
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().map(|u| u.is_admin()).unwrap_or(false)
    }

    pub fn is_member(&self) -> bool {
        self.current_user().map(|u| u.is_member()).unwrap_or(false)
    }

    pub fn is_reader(&self) -> bool {
        self.current_user().map(|u| u.is_reader()).unwrap_or(false)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
