//! Keeper - Entry Point
//!
//! A minimal authenticated personal file locker: one confined directory
//! tree per registered user, behind cookie sessions.

use log::{error, info};

use keeper::{Server, ServerConfig};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching keeper file locker...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config).await;
    server.start().await;
}
