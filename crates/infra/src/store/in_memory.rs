use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use inkpost_auth::{AccessToken, User};
use inkpost_core::entity::sort_newest_first;
use inkpost_core::{DomainError, DomainResult, PostId, TokenId, UserId};
use inkpost_posts::Post;

use super::{EMAIL_TAKEN, PostStore, TokenStore, UserStore};

/// In-memory store for tests/dev.
///
/// Each table sits behind its own lock; every trait method takes exactly one
/// lock, which keeps per-record operations atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    posts: RwLock<HashMap<PostId, Post>>,
    tokens: RwLock<HashMap<TokenId, AccessToken>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> DomainResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| DomainError::storage("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> DomainResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| DomainError::storage("in-memory store lock poisoned"))
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> DomainResult<User> {
        let mut users = write(&self.users)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::field("email", EMAIL_TAKEN));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(read(&self.users)?.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(read(&self.users)?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let users = read(&self.users)?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn insert_post(&self, post: Post) -> DomainResult<Post> {
        write(&self.posts)?.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(read(&self.posts)?.get(&id).cloned())
    }

    async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        let mut posts: Vec<Post> = read(&self.posts)?.values().cloned().collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> DomainResult<()> {
        let mut posts = write(&self.posts)?;
        let stored = posts.get_mut(&post.id).ok_or(DomainError::NotFound)?;
        stored.title = post.title.clone();
        stored.body = post.body.clone();
        stored.updated_at = post.updated_at;
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> DomainResult<bool> {
        Ok(write(&self.posts)?.remove(&id).is_some())
    }
}

#[async_trait]
impl TokenStore for InMemoryStore {
    async fn insert_token(&self, token: AccessToken) -> DomainResult<()> {
        write(&self.tokens)?.insert(token.id, token);
        Ok(())
    }

    async fn find_token(&self, id: TokenId) -> DomainResult<Option<AccessToken>> {
        Ok(read(&self.tokens)?.get(&id).cloned())
    }

    async fn find_token_by_fingerprint(&self, fingerprint: &str) -> DomainResult<Option<AccessToken>> {
        Ok(read(&self.tokens)?
            .values()
            .find(|t| t.fingerprint == fingerprint)
            .cloned())
    }

    async fn touch_token(&self, id: TokenId, at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(token) = write(&self.tokens)?.get_mut(&id) {
            token.last_used_at = Some(at);
        }
        Ok(())
    }

    async fn delete_token(&self, id: TokenId) -> DomainResult<bool> {
        Ok(write(&self.tokens)?.remove(&id).is_some())
    }
}
