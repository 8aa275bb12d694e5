//! Error handling
//!
//! Defines error types and handling for the file locker.

pub mod handlers;
pub mod types;

pub use types::*;
