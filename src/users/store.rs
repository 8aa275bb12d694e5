//! Credential storage
//!
//! Persists login -> credential records in a concurrent in-memory map.
//! Credentials are SHA-256 digests of the login-salted password; the raw
//! password is never stored.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use log::info;
use sha2::{Digest, Sha256};

use crate::error::AuthError;
use crate::users::validator::{validate_login, validate_password_shape};

/// Width of a derived credential in bytes (SHA-256 output)
const CREDENTIAL_LEN: usize = 32;

type Credential = [u8; CREDENTIAL_LEN];

/// Derives the stored credential from a login/password pair.
///
/// The login is mixed in as a salt so two users with the same password do
/// not share a credential. The separator byte keeps ("ab", "c") and
/// ("a", "bc") from colliding.
fn derive_credential(login: &str, password: &str) -> Credential {
    let mut hasher = Sha256::new();
    hasher.update(login.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Constant-time equality over fixed-width credentials.
fn credentials_match(a: &Credential, b: &Credential) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Store of registered users keyed by login
pub struct UserStore {
    users: RwLock<HashMap<String, Credential>>,
    max_login_length: usize,
}

impl UserStore {
    pub fn new(max_login_length: usize) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            max_login_length,
        }
    }

    /// Returns whether a user record with this login exists.
    pub fn exists(&self, login: &str) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(login)
    }

    /// Registers a new user.
    ///
    /// The existence check and the insert happen under one write lock, so
    /// two concurrent registrations of the same login cannot both succeed.
    pub fn create(&self, login: &str, password: &str) -> Result<(), AuthError> {
        validate_login(login, self.max_login_length)?;
        validate_password_shape(password, self.max_login_length)?;

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        match users.entry(login.to_string()) {
            Entry::Occupied(_) => Err(AuthError::LoginTaken(login.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(derive_credential(login, password));
                info!("Registered user {}", login);
                Ok(())
            }
        }
    }

    /// Returns whether the login exists and the password matches its
    /// credential under the same derivation used at creation.
    pub fn is_valid(&self, login: &str, password: &str) -> bool {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        match users.get(login) {
            Some(stored) => credentials_match(stored, &derive_credential(login, password)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> UserStore {
        UserStore::new(64)
    }

    #[test]
    fn create_then_validate() {
        let users = store();
        users.create("alice", "pw1").unwrap();
        assert!(users.exists("alice"));
        assert!(users.is_valid("alice", "pw1"));
        assert!(!users.is_valid("alice", "pw2"));
        assert!(!users.is_valid("bob", "pw1"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let users = store();
        users.create("alice", "pw1").unwrap();
        match users.create("alice", "other") {
            Err(AuthError::LoginTaken(l)) => assert_eq!(l, "alice"),
            other => panic!("expected LoginTaken, got {:?}", other),
        }
        // Original credential untouched
        assert!(users.is_valid("alice", "pw1"));
        assert!(!users.is_valid("alice", "other"));
    }

    #[test]
    fn distinct_logins_never_collide() {
        let users = store();
        users.create("alice", "same-password").unwrap();
        users.create("bob", "same-password").unwrap();
        assert!(users.is_valid("alice", "same-password"));
        assert!(users.is_valid("bob", "same-password"));
    }

    #[test]
    fn salted_derivation_distinguishes_users() {
        assert_ne!(
            derive_credential("alice", "pw"),
            derive_credential("bob", "pw")
        );
        assert_ne!(
            derive_credential("ab", "c"),
            derive_credential("a", "bc")
        );
    }

    #[test]
    fn malformed_login_is_rejected_before_insert() {
        let users = store();
        assert!(users.create("../alice", "pw").is_err());
        assert!(!users.exists("../alice"));
    }

    #[test]
    fn concurrent_registration_single_winner() {
        use std::sync::Arc;
        use std::thread;

        let users = Arc::new(store());
        let mut handles = vec![];
        for _ in 0..8 {
            let users = Arc::clone(&users);
            handles.push(thread::spawn(move || users.create("carol", "pw").is_ok()));
        }
        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(wins, 1);
    }
}
