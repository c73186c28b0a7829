//! Token issuance, authentication and revocation.

use std::sync::Arc;

use chrono::Utc;

use inkpost_auth::{NewAccessToken, PlainTextToken, Principal, TokenLookup, User};
use inkpost_core::{DomainError, DomainResult, TokenId};

use crate::store::{TokenStore, UserStore};

/// Registry of live personal access tokens.
///
/// A token is either present (active) or absent (revoked); revocation deletes
/// the record, so there is no path back to active.
#[derive(Clone)]
pub struct TokenRegistry {
    tokens: Arc<dyn TokenStore>,
    users: Arc<dyn UserStore>,
}

impl TokenRegistry {
    pub fn new(tokens: Arc<dyn TokenStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Mint and persist a token for `user`. The plaintext is returned once and
    /// never stored.
    pub async fn issue(&self, user: &User, name: &str) -> DomainResult<PlainTextToken> {
        let minted = NewAccessToken::mint(user.id, name, Utc::now());
        let token_id = minted.record.id;
        self.tokens.insert_token(minted.record).await?;

        tracing::debug!(user_id = %user.id, token_id = %token_id, "access token issued");
        Ok(minted.plain_text)
    }

    /// Resolve a presented bearer value to its user.
    ///
    /// Every failure mode (malformed, unknown, revoked, wrong secret, orphaned
    /// user) collapses to `Unauthenticated`.
    pub async fn authenticate(&self, raw: &str) -> DomainResult<Principal> {
        let lookup = TokenLookup::parse(raw).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed bearer token");
            DomainError::Unauthenticated
        })?;

        let token = match &lookup {
            TokenLookup::ById { id, .. } => self.tokens.find_token(*id).await?,
            TokenLookup::ByFingerprint { fingerprint, .. } => {
                self.tokens.find_token_by_fingerprint(fingerprint).await?
            }
        };

        let Some(token) = token.filter(|t| t.matches(lookup.secret())) else {
            return Err(DomainError::Unauthenticated);
        };

        let Some(user) = self.users.find_user(token.user_id).await? else {
            tracing::warn!(token_id = %token.id, "token belongs to a missing user");
            return Err(DomainError::Unauthenticated);
        };

        self.tokens.touch_token(token.id, Utc::now()).await?;
        Ok(Principal::new(user, token.id))
    }

    /// Permanently revoke a token.
    ///
    /// Idempotent: revoking an unknown or already revoked token succeeds and
    /// reports `false`.
    pub async fn revoke(&self, token_id: TokenId) -> DomainResult<bool> {
        let removed = self.tokens.delete_token(token_id).await?;
        if !removed {
            tracing::debug!(token_id = %token_id, "revoke on unknown token ignored");
        }
        Ok(removed)
    }
}
