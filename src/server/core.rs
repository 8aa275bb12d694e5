//! Server core
//!
//! Binds the listener, wires the gate and its stores together, and serves
//! the router.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::gate::AccessGate;
use crate::server::handlers::{self, SharedGate};
use crate::session::SessionManager;
use crate::storage::ScopedStorage;
use crate::users::UserStore;

pub struct Server {
    listener: TcpListener,
    router: Router,
    listen_socket: String,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let listen_socket = config.listen_socket();

        let listener = match TcpListener::bind(&listen_socket).await {
            Ok(listener) => {
                info!("Server bound to {}", listen_socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", listen_socket, e);
                panic!("Server startup failed on socket {}: {}", listen_socket, e);
            }
        };

        if let Err(e) = std::fs::create_dir_all(config.storage_root_path()) {
            warn!("Failed to create storage root directory: {}", e);
        } else {
            info!("Storage root directory: {}", config.storage_root);
        }

        let gate = Arc::new(AccessGate::new(
            Arc::new(UserStore::new(config.max_login_length)),
            Arc::new(SessionManager::new()),
            Arc::new(ScopedStorage::new(config.storage_root_path())),
        ));

        Self {
            listener,
            router: router(gate, config.max_upload_bytes()),
            listen_socket,
        }
    }

    pub async fn start(self) {
        info!("Starting keeper file locker on {}", self.listen_socket);
        if let Err(e) = axum::serve(self.listener, self.router).await {
            error!("Server error: {}", e);
        }
    }
}

/// Builds the locker's route table over a shared gate.
pub fn router(gate: SharedGate, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/files/", get(handlers::browse_root))
        .route("/files/*path", get(handlers::browse).post(handlers::upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(gate)
}
