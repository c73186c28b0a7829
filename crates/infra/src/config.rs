//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value}")]
    InvalidBool { var: &'static str, value: String },

    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub use_persistent_stores: bool,
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let use_persistent_stores = match lookup("USE_PERSISTENT_STORES") {
            None => false,
            Some(v) => v.trim().parse::<bool>().map_err(|_| ConfigError::InvalidBool {
                var: "USE_PERSISTENT_STORES",
                value: v.clone(),
            })?,
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if use_persistent_stores && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            bind_addr,
            use_persistent_stores,
            database_url,
        })
    }
}
