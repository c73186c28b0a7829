//! Infrastructure layer: stores, services over them, and configuration.

pub mod accounts;
pub mod config;
pub mod publishing;
pub mod store;
pub mod tokens;

pub use accounts::{AccountService, IssuedCredentials};
pub use config::{AppConfig, ConfigError};
pub use publishing::PostService;
pub use store::{InMemoryStore, PostStore, TokenStore, UserStore};
pub use tokens::TokenRegistry;
