//! File-backed session vault
//!
//! Keeps the access token and user profile together in session.json under
//! the factline directory. Corrupt contents load as a missing session so a
//! damaged file degrades to logged out instead of blocking startup.

use std::path::{Path, PathBuf};

use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{PersistedSession, SessionVault};

/// Durable session storage in the factline directory
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(factline_dir: &Path) -> Self {
        Self {
            path: factline_dir.join("session.json"),
        }
    }

    /// Get the path to the session file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionVault for FileVault {
    fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content).ok())
    }

    fn store(&self, access_token: &str, user: &User) -> Result<()> {
        let session = PersistedSession {
            access_token: access_token.to_string(),
            user: user.clone(),
        };
        let content = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use tempfile::tempdir;

    fn sample_user() -> User {
        User {
            id: 1,
            firstname: "Ada".to_string(),
            lastname: "Chan".to_string(),
            email: "ada@example.com".to_string(),
            image: String::new(),
            roles: vec![Role::Reader],
        }
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempdir().unwrap();
        let vault = FileVault::new(dir.path());

        assert!(vault.load().unwrap().is_none());

        vault.store("token-123", &sample_user()).unwrap();
        let session = vault.load().unwrap().unwrap();
        assert_eq!(session.access_token, "token-123");
        assert_eq!(session.user.email, "ada@example.com");
    }

    #[test]
    fn test_clear_removes_session() {
        let dir = tempdir().unwrap();
        let vault = FileVault::new(dir.path());

        vault.store("token-123", &sample_user()).unwrap();
        vault.clear().unwrap();
        assert!(vault.load().unwrap().is_none());
        assert!(!vault.path().exists());

        // Clearing an already-empty vault is fine
        vault.clear().unwrap();
    }

    #[test]
    fn test_corrupt_session_loads_as_none() {
        let dir = tempdir().unwrap();
        let vault = FileVault::new(dir.path());

        std::fs::write(vault.path(), "{garbage").unwrap();
        assert!(vault.load().unwrap().is_none());
    }

    #[test]
    fn test_access_token_helper() {
        let dir = tempdir().unwrap();
        let vault = FileVault::new(dir.path());

        assert!(vault.access_token().is_none());
        vault.store("token-456", &sample_user()).unwrap();
        assert_eq!(vault.access_token().as_deref(), Some("token-456"));
    }
}
