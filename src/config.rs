//! Configuration management for the keeper file locker
//!
//! Loads `config.toml` (optional) with `KEEPER_`-prefixed environment
//! overrides. Every field has a default, so the server runs without any
//! configuration file at all.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port for the HTTP listener
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding one storage root per registered login
    #[serde(default = "default_storage_root")]
    pub storage_root: String,

    /// Maximum accepted upload size in MB
    #[serde(default = "default_max_upload_size_mb")]
    pub max_upload_size_mb: u64,

    /// Maximum length of a login or password
    #[serde(default = "default_max_login_length")]
    pub max_login_length: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7000
}

fn default_storage_root() -> String {
    "./storage".to_string()
}

fn default_max_upload_size_mb() -> u64 {
    50
}

fn default_max_login_length() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            storage_root: default_storage_root(),
            max_upload_size_mb: default_max_upload_size_mb(),
            max_login_length: default_max_login_length(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml (if present) with environment
    /// overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("KEEPER"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("Port cannot be 0".into()));
        }

        if self.storage_root.is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if self.max_upload_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        if self.max_login_length == 0 {
            return Err(config::ConfigError::Message(
                "max_login_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the storage root as a PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get the maximum upload size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize) * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_socket(), "127.0.0.1:7000");
        assert_eq!(config.max_upload_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_storage_root_is_rejected() {
        let config = ServerConfig {
            storage_root: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
