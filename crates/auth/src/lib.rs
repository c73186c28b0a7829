//! Credentials, access tokens and authorization decisions.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod credentials;
pub mod password;
pub mod principal;
pub mod token;
pub mod user;

pub use authorize::Authorization;
pub use credentials::{LoginRequest, NewUser, RegistrationRequest, ValidLogin};
pub use password::{PasswordError, Passwords};
pub use principal::Principal;
pub use token::{AccessToken, NewAccessToken, PlainTextToken, TokenLookup, TokenParseError};
pub use user::User;
