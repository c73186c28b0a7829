//! One-way password hashing (Argon2id, PHC string format).

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Password hasher/verifier.
///
/// Cloning is cheap; the Argon2 context only carries parameters.
#[derive(Clone, Default)]
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl Passwords {
    /// Hash `raw` with a fresh random salt.
    pub fn hash(&self, raw: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
    pub fn verify(&self, raw: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(raw.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

impl core::fmt::Debug for Passwords {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Passwords").finish_non_exhaustive()
    }
}
