pub mod config;
pub mod error;
pub mod gate;
pub mod server;
pub mod session;
pub mod storage;
pub mod users;

pub use crate::config::ServerConfig;
pub use server::Server;
