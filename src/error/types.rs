//! Error types
//!
//! Defines domain-specific error types for each module of the file locker.

use std::fmt;
use std::io;

/// User store errors
#[derive(Debug)]
pub enum AuthError {
    LoginTaken(String),
    MalformedInput(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::LoginTaken(l) => write!(f, "Login already registered: {}", l),
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Storage module errors
///
/// Paths carried inside variants are user-relative, never real filesystem
/// paths, so messages are safe to surface at the boundary.
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    AlreadyExists(String),
    PathEscape(String),
    InvalidPath(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            StorageError::PathEscape(p) => write!(f, "Path escapes storage root: {}", p),
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General locker error that encompasses all error types
#[derive(Debug)]
pub enum LockerError {
    /// No session or credential, or an invalid one. Carries no detail: the
    /// caller must not learn whether the login or the secret was wrong.
    Unauthenticated,
    BadRequest(String),
    Auth(AuthError),
    Storage(StorageError),
}

impl fmt::Display for LockerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockerError::Unauthenticated => write!(f, "Authentication required"),
            LockerError::BadRequest(s) => write!(f, "Bad request: {}", s),
            LockerError::Auth(e) => write!(f, "Authentication error: {}", e),
            LockerError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for LockerError {}

impl From<AuthError> for LockerError {
    fn from(error: AuthError) -> Self {
        LockerError::Auth(error)
    }
}

impl From<StorageError> for LockerError {
    fn from(error: StorageError) -> Self {
        LockerError::Storage(error)
    }
}
