//! Registration, login and logout.

use std::sync::Arc;

use chrono::Utc;

use inkpost_auth::{
    LoginRequest, PasswordError, Passwords, PlainTextToken, Principal, RegistrationRequest, User,
};
use inkpost_core::{DomainError, DomainResult};

use crate::store::UserStore;
use crate::tokens::TokenRegistry;

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    pub user: User,
    pub token: PlainTextToken,
}

/// Account flows over the user store and token registry.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: TokenRegistry,
    passwords: Passwords,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenRegistry, passwords: Passwords) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Create a user and issue its first token, named after the submitted name.
    pub async fn register(&self, request: RegistrationRequest) -> DomainResult<IssuedCredentials> {
        let taken = match request.candidate_email() {
            Some(email) => self.users.find_user_by_email(&email).await?.is_some(),
            None => false,
        };
        let new_user = request.validate(taken)?;

        let password_hash = self.hash(new_user.password).await?;
        let user = self
            .users
            .insert_user(User::new(
                new_user.name.clone(),
                new_user.email,
                password_hash,
                Utc::now(),
            ))
            .await?;

        let token = self.tokens.issue(&user, &new_user.name).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(IssuedCredentials { user, token })
    }

    /// Verify credentials and issue a new token, named after the user.
    ///
    /// A known email with the wrong password is `InvalidCredentials`, never a
    /// validation error.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<IssuedCredentials> {
        let existing = match request.candidate_email() {
            Some(email) => self.users.find_user_by_email(&email).await?,
            None => None,
        };
        let login = request.validate(existing.is_some())?;

        let Some(user) = existing else {
            return Err(DomainError::InvalidCredentials);
        };

        if !self.verify(login.password, user.password_hash.clone()).await? {
            tracing::warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user, &user.name).await?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(IssuedCredentials { user, token })
    }

    /// Revoke the token the caller authenticated with.
    pub async fn logout(&self, principal: &Principal) -> DomainResult<()> {
        self.tokens.revoke(principal.token_id).await?;
        tracing::info!(user_id = %principal.user_id(), "user logged out");
        Ok(())
    }

    pub async fn authenticate(&self, raw_token: &str) -> DomainResult<Principal> {
        self.tokens.authenticate(raw_token).await
    }

    // Argon2 is deliberately slow; keep it off the async workers.
    async fn hash(&self, raw: String) -> DomainResult<String> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash(&raw))
            .await
            .map_err(|e| DomainError::storage(format!("password task failed: {e}")))?
            .map_err(password_error)
    }

    async fn verify(&self, raw: String, stored: String) -> DomainResult<bool> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&raw, &stored))
            .await
            .map_err(|e| DomainError::storage(format!("password task failed: {e}")))?
            .map_err(password_error)
    }
}

fn password_error(e: PasswordError) -> DomainError {
    tracing::error!(error = %e, "password hashing failed");
    DomainError::storage(e.to_string())
}
