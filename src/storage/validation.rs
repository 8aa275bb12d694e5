//! Path validation
//!
//! Lexical confinement of requested paths. A request is normalized without
//! touching the filesystem: `.` segments drop out, `..` pops a previously
//! accepted segment, and any attempt to climb above the start or to name an
//! absolute location is rejected outright, never clamped.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Normalizes a requested user path into a relative path with no `..` or
/// `.` components. Fails with `PathEscape` if the request is absolute or
/// climbs above its origin.
pub fn confine(requested: &str) -> Result<PathBuf, StorageError> {
    if requested.contains('\0') {
        return Err(StorageError::InvalidPath(requested.replace('\0', "")));
    }

    let mut normalized = PathBuf::new();
    let mut depth: usize = 0;

    for component in Path::new(requested).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(StorageError::PathEscape(requested.to_string()));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(StorageError::PathEscape(requested.to_string()));
                }
                normalized.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_relative_paths_pass() {
        assert_eq!(confine("a/b/c.txt").unwrap(), PathBuf::from("a/b/c.txt"));
        assert_eq!(confine("notes.txt").unwrap(), PathBuf::from("notes.txt"));
        assert_eq!(confine("").unwrap(), PathBuf::new());
    }

    #[test]
    fn dot_segments_normalize_away() {
        assert_eq!(confine("./a/./b").unwrap(), PathBuf::from("a/b"));
        assert_eq!(confine("a/b/../c").unwrap(), PathBuf::from("a/c"));
    }

    #[test]
    fn upward_traversal_is_an_escape() {
        assert!(matches!(
            confine("../../etc/passwd"),
            Err(StorageError::PathEscape(_))
        ));
        assert!(matches!(confine(".."), Err(StorageError::PathEscape(_))));
        assert!(matches!(
            confine("a/../../b"),
            Err(StorageError::PathEscape(_))
        ));
    }

    #[test]
    fn absolute_requests_are_an_escape() {
        assert!(matches!(
            confine("/etc/passwd"),
            Err(StorageError::PathEscape(_))
        ));
    }

    #[test]
    fn nul_bytes_are_invalid() {
        assert!(matches!(
            confine("a\0b"),
            Err(StorageError::InvalidPath(_))
        ));
    }
}
