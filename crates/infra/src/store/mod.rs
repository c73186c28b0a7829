//! Storage abstractions: one repository trait per entity.
//!
//! Implementations provide atomic per-record operations; nothing here spans
//! more than one record, so no cross-record transactions are required.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use inkpost_auth::{AccessToken, User};
use inkpost_core::{DomainResult, PostId, TokenId, UserId};
use inkpost_posts::Post;

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

/// Message recorded when a unique email constraint trips on insert.
pub const EMAIL_TAKEN: &str = "The email has already been taken.";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with a validation error on `email` when the
    /// address is already registered.
    async fn insert_user(&self, user: User) -> DomainResult<User>;

    async fn find_user(&self, id: UserId) -> DomainResult<Option<User>>;

    /// `email` is compared exactly; callers pass the normalized form.
    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Batch lookup used to attach owners to post listings. Unknown ids are
    /// skipped.
    async fn find_users(&self, ids: &[UserId]) -> DomainResult<Vec<User>>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: Post) -> DomainResult<Post>;

    async fn find_post(&self, id: PostId) -> DomainResult<Option<Post>>;

    /// All posts, newest first.
    async fn list_posts(&self) -> DomainResult<Vec<Post>>;

    /// Overwrite title/body/updated_at. `NotFound` if the post is gone.
    async fn update_post(&self, post: &Post) -> DomainResult<()>;

    /// Returns whether a row was removed.
    async fn delete_post(&self, id: PostId) -> DomainResult<bool>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert_token(&self, token: AccessToken) -> DomainResult<()>;

    async fn find_token(&self, id: TokenId) -> DomainResult<Option<AccessToken>>;

    async fn find_token_by_fingerprint(&self, fingerprint: &str) -> DomainResult<Option<AccessToken>>;

    async fn touch_token(&self, id: TokenId, at: DateTime<Utc>) -> DomainResult<()>;

    /// Returns whether a row was removed.
    async fn delete_token(&self, id: TokenId) -> DomainResult<bool>;
}
