//! Personal access tokens.
//!
//! A token is handed to the client once, as `<token-id>|<secret>`. Only the
//! SHA-256 fingerprint of the secret is kept, so a leaked store cannot be
//! replayed as bearer credentials.

use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use inkpost_core::{Entity, TokenId, UserId};

/// Length of the random part of a plaintext token.
pub const SECRET_LEN: usize = 40;

const SEPARATOR: char = '|';

/// Stored half of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub id: TokenId,
    pub user_id: UserId,
    pub name: String,
    #[serde(skip_serializing)]
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Constant-time comparison of `secret` against the stored fingerprint.
    pub fn matches(&self, secret: &str) -> bool {
        fingerprint(secret)
            .as_bytes()
            .ct_eq(self.fingerprint.as_bytes())
            .into()
    }
}

impl Entity for AccessToken {
    type Id = TokenId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Plaintext bearer value. Only ever exists at issuance time.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainTextToken(String);

impl PlainTextToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for PlainTextToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PlainTextToken(..)")
    }
}

/// A freshly minted token: the record to persist plus the value to return.
#[derive(Debug, Clone)]
pub struct NewAccessToken {
    pub record: AccessToken,
    pub plain_text: PlainTextToken,
}

impl NewAccessToken {
    /// Mint a token for `user_id`.
    pub fn mint(user_id: UserId, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SECRET_LEN)
            .map(char::from)
            .collect();

        let record = AccessToken {
            id: TokenId::new(),
            user_id,
            name: name.into(),
            fingerprint: fingerprint(&secret),
            created_at: now,
            last_used_at: None,
        };

        let plain_text = PlainTextToken(format!("{}{SEPARATOR}{secret}", record.id));
        Self { record, plain_text }
    }
}

/// SHA-256 hex digest of a token secret.
pub fn fingerprint(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    #[error("token is empty")]
    Empty,

    #[error("token id is malformed")]
    MalformedId,

    #[error("token secret is empty")]
    EmptySecret,
}

/// How a presented bearer value should be resolved against the store.
#[derive(Clone, PartialEq, Eq)]
pub enum TokenLookup {
    /// `<id>|<secret>`: load by id, then compare fingerprints.
    ById { id: TokenId, secret: String },
    /// Bare secret: look up by fingerprint directly.
    ByFingerprint { fingerprint: String, secret: String },
}

impl TokenLookup {
    pub fn parse(raw: &str) -> Result<Self, TokenParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TokenParseError::Empty);
        }

        match raw.split_once(SEPARATOR) {
            Some((id, secret)) => {
                let id = id.parse().map_err(|_| TokenParseError::MalformedId)?;
                if secret.is_empty() {
                    return Err(TokenParseError::EmptySecret);
                }
                Ok(Self::ById {
                    id,
                    secret: secret.to_string(),
                })
            }
            None => Ok(Self::ByFingerprint {
                fingerprint: fingerprint(raw),
                secret: raw.to_string(),
            }),
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            Self::ById { secret, .. } | Self::ByFingerprint { secret, .. } => secret,
        }
    }
}

impl core::fmt::Debug for TokenLookup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ById { id, .. } => f.debug_struct("ById").field("id", id).finish_non_exhaustive(),
            Self::ByFingerprint { .. } => f.write_str("ByFingerprint(..)"),
        }
    }
}
