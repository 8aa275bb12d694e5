//! Session manager
//!
//! Records (login, secret) pairs for active sessions. Secrets are 32 bytes
//! from the OS CSPRNG, hex-encoded, so collisions across sessions are
//! probabilistically impossible. Sessions have no expiry and no revocation:
//! they live until the process exits, and several may coexist per login.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use log::info;
use rand::RngCore;
use rand::rngs::OsRng;

/// Width of a session secret in bytes before hex encoding
const SECRET_LEN: usize = 32;

/// Registry of active sessions keyed by login
pub struct SessionManager {
    sessions: RwLock<HashMap<String, HashSet<String>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a session for the login and returns its secret.
    ///
    /// The caller is responsible for having authenticated the login first.
    pub fn create(&self, login: &str) -> String {
        let mut bytes = [0u8; SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(login.to_string())
            .or_default()
            .insert(secret.clone());

        info!("Issued session for {}", login);
        secret
    }

    /// Returns whether a recorded session matches both fields exactly.
    pub fn validate(&self, login: &str, secret: &str) -> bool {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(login)
            .is_some_and(|secrets| secrets.contains(secret))
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_secret_validates_for_its_login_only() {
        let sessions = SessionManager::new();
        let secret = sessions.create("alice");
        assert!(sessions.validate("alice", &secret));
        assert!(!sessions.validate("alice", "wrong"));
        assert!(!sessions.validate("bob", &secret));
    }

    #[test]
    fn unknown_login_never_validates() {
        let sessions = SessionManager::new();
        assert!(!sessions.validate("nobody", "anything"));
    }

    #[test]
    fn sessions_coexist_per_login() {
        let sessions = SessionManager::new();
        let first = sessions.create("alice");
        let second = sessions.create("alice");
        assert_ne!(first, second);
        assert!(sessions.validate("alice", &first));
        assert!(sessions.validate("alice", &second));
    }

    #[test]
    fn secret_is_high_entropy_hex() {
        let sessions = SessionManager::new();
        let secret = sessions.create("alice");
        assert_eq!(secret.len(), SECRET_LEN * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
