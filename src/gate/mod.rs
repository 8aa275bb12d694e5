//! Access gate
//!
//! Composes the user store, session manager, and scoped storage into the
//! single authorization contract the boundary consumes.

pub mod access;
pub mod credentials;

pub use access::{AccessGate, UserContext};
pub use credentials::CredentialSource;
