//! User records
//!
//! Handles user registration, credential storage, and password validation.

pub mod store;
pub mod validator;

pub use store::UserStore;
pub use validator::validate_login;
