//! HTTP boundary
//!
//! Thin glue between the web and the access gate: route dispatch,
//! credential extraction from cookies or form fields, and translation of
//! locker errors into HTTP statuses. No authorization decision is made
//! here; everything defers to the gate.

pub mod cookies;
pub mod core;
pub mod handlers;

pub use core::Server;
