//! Per-user scoped storage
//!
//! Resolves user-relative paths to confined locations under each user's
//! storage root and performs the file operations on them.

pub mod operations;
pub mod validation;

pub use operations::{ConfinedPath, ScopedStorage};
