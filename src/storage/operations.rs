//! Storage operations
//!
//! File system operations confined to a single user's storage root:
//! resolve, list, read, and write-once store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::StorageError;
use crate::storage::validation::confine;

/// A path proven to lie under a specific user's storage root.
///
/// Carries the user-relative form alongside the real location so that error
/// messages and logs never have to expose the real filesystem layout.
#[derive(Debug, Clone)]
pub struct ConfinedPath {
    real: PathBuf,
    relative: String,
}

impl ConfinedPath {
    pub fn as_path(&self) -> &Path {
        &self.real
    }

    /// The user-relative path, safe to echo back at the boundary.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn is_dir(&self) -> bool {
        self.real.is_dir()
    }
}

/// Path-confined storage with one root directory per user login
pub struct ScopedStorage {
    root: PathBuf,
}

impl ScopedStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Idempotently creates the user's root directory and returns it.
    pub fn ensure_root(&self, login: &str) -> Result<PathBuf, StorageError> {
        let user_root = self.root.join(login);
        fs::create_dir_all(&user_root)?;
        Ok(user_root)
    }

    /// Resolves a user-relative path to a confined location under the
    /// user's root.
    ///
    /// Confinement is checked twice: lexically (no `..` escape, no absolute
    /// request) and against the canonicalized root, so a symlink planted
    /// inside the tree cannot lead a resolved path out of it.
    pub fn resolve(&self, login: &str, requested: &str) -> Result<ConfinedPath, StorageError> {
        let relative = confine(requested)?;
        let user_root = self.ensure_root(login)?;
        let real = user_root.join(&relative);

        let canonical_root = user_root.canonicalize()?;
        for ancestor in real.ancestors() {
            if ancestor.exists() {
                let canonical = ancestor.canonicalize()?;
                if !canonical.starts_with(&canonical_root) {
                    error!("Path escape via {} for user {}", requested, login);
                    return Err(StorageError::PathEscape(requested.to_string()));
                }
                break;
            }
        }

        Ok(ConfinedPath {
            real,
            relative: relative.display().to_string(),
        })
    }

    /// Lists the entry names of a confined directory, sorted.
    pub fn list(&self, path: &ConfinedPath) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(path.as_path()).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(path.relative().to_string())
            } else {
                StorageError::from(e)
            }
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        info!("Listed {} entries under {}", names.len(), path.relative());
        Ok(names)
    }

    /// Reads the full contents of a confined file.
    pub fn read(&self, path: &ConfinedPath) -> Result<Vec<u8>, StorageError> {
        fs::read(path.as_path()).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(path.relative().to_string())
            } else {
                StorageError::from(e)
            }
        })
    }

    /// Writes a new confined file. Refuses to overwrite: each path is
    /// write-once. The existence check rides on `create_new`, so it is as
    /// atomic as the underlying filesystem makes it.
    pub fn write(&self, path: &ConfinedPath, bytes: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_path())
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    StorageError::AlreadyExists(path.relative().to_string())
                }
                ErrorKind::NotFound => StorageError::NotFound(path.relative().to_string()),
                _ => StorageError::from(e),
            })?;
        file.write_all(bytes)?;

        info!("Stored {} ({} bytes)", path.relative(), bytes.len());
        Ok(())
    }
}
