//! Error handlers
//!
//! Translates locker errors into HTTP status codes for the boundary.

use log::error;

use crate::error::types::{AuthError, LockerError, StorageError};

/// Log a locker error
pub fn handle_error(err: &LockerError) {
    error!("Locker error: {}", err);
}

/// Convert an error to the HTTP status code the boundary reports
pub fn error_to_status(err: &LockerError) -> u16 {
    match err {
        LockerError::Unauthenticated => 403,
        LockerError::BadRequest(_) => 400,
        LockerError::Auth(AuthError::LoginTaken(_)) => 400,
        LockerError::Auth(AuthError::MalformedInput(_)) => 400,
        LockerError::Storage(StorageError::NotFound(_)) => 404,
        LockerError::Storage(StorageError::AlreadyExists(_)) => 400,
        LockerError::Storage(StorageError::PathEscape(_)) => 400,
        LockerError::Storage(StorageError::InvalidPath(_)) => 400,
        LockerError::Storage(StorageError::IoError(_)) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_maps_to_403() {
        assert_eq!(error_to_status(&LockerError::Unauthenticated), 403);
    }

    #[test]
    fn escape_and_duplicate_map_to_400() {
        let escape = LockerError::Storage(StorageError::PathEscape("../x".into()));
        let dup = LockerError::Auth(AuthError::LoginTaken("alice".into()));
        assert_eq!(error_to_status(&escape), 400);
        assert_eq!(error_to_status(&dup), 400);
    }

    #[test]
    fn missing_file_maps_to_404() {
        let missing = LockerError::Storage(StorageError::NotFound("notes.txt".into()));
        assert_eq!(error_to_status(&missing), 404);
    }
}
