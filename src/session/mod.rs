//! Session management
//!
//! Issues and validates opaque session secrets bound to a login.

pub mod manager;

pub use manager::SessionManager;
