//! Authorization
//!
//! `AccessGate` answers "is this caller allowed to touch this user's
//! files". Every file operation and every authenticated page goes through
//! `authorize` first; registration and login are thin compositions on top
//! that also issue a session.

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::error::LockerError;
use crate::gate::credentials::CredentialSource;
use crate::session::SessionManager;
use crate::storage::ScopedStorage;
use crate::users::UserStore;

/// An authenticated caller and the storage root it may touch
#[derive(Debug, Clone)]
pub struct UserContext {
    pub login: String,
    pub storage_root: PathBuf,
}

/// Gatekeeper in front of the per-user storage
pub struct AccessGate {
    users: Arc<UserStore>,
    sessions: Arc<SessionManager>,
    storage: Arc<ScopedStorage>,
}

impl AccessGate {
    pub fn new(
        users: Arc<UserStore>,
        sessions: Arc<SessionManager>,
        storage: Arc<ScopedStorage>,
    ) -> Self {
        Self {
            users,
            sessions,
            storage,
        }
    }

    pub fn storage(&self) -> &ScopedStorage {
        &self.storage
    }

    /// Validates the presented credential and returns the caller's context.
    ///
    /// Denial is uniform: the error never distinguishes an unknown login
    /// from a bad secret or password.
    pub fn authorize(&self, source: &CredentialSource) -> Result<UserContext, LockerError> {
        let valid = match source {
            CredentialSource::Cookies { login, secret } => {
                self.sessions.validate(login, secret) && self.users.exists(login)
            }
            CredentialSource::FormFields { login, password } => {
                self.users.is_valid(login, password)
            }
        };

        if !valid {
            warn!("Denied access for login {:?}", source.login());
            return Err(LockerError::Unauthenticated);
        }

        self.context_for(source.login())
    }

    /// Registers a new user and issues its first session secret.
    pub fn register(&self, login: &str, password: &str) -> Result<(UserContext, String), LockerError> {
        self.users.create(login, password)?;
        let secret = self.sessions.create(login);
        let context = self.context_for(login)?;
        info!("Registered and authenticated {}", login);
        Ok((context, secret))
    }

    /// Validates a password and issues a fresh session secret.
    pub fn login(&self, login: &str, password: &str) -> Result<(UserContext, String), LockerError> {
        if !self.users.is_valid(login, password) {
            warn!("Failed login for {:?}", login);
            return Err(LockerError::Unauthenticated);
        }
        let secret = self.sessions.create(login);
        let context = self.context_for(login)?;
        Ok((context, secret))
    }

    /// Builds the caller context, lazily creating the user's storage root.
    fn context_for(&self, login: &str) -> Result<UserContext, LockerError> {
        let storage_root = self.storage.ensure_root(login)?;
        Ok(UserContext {
            login: login.to_string(),
            storage_root,
        })
    }
}
