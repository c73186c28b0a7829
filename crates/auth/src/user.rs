//! Registered user record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use inkpost_core::{Entity, UserId};

/// A registered user.
///
/// `password_hash` is a PHC-format Argon2 string. It is never serialized, so
/// any JSON view of a `User` is safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
