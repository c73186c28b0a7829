//! Postgres-backed store.
//!
//! Uses a single `PgPool` for all three tables. Each trait method is one SQL
//! statement, so per-record atomicity comes from Postgres itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use inkpost_auth::{AccessToken, User};
use inkpost_core::{DomainError, DomainResult, PostId, TokenId, UserId};
use inkpost_posts::Post;

use super::{EMAIL_TAKEN, PostStore, TokenStore, UserStore};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users (id),
        title VARCHAR(255) NOT NULL,
        body TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS posts_created_at_idx ON posts (created_at DESC, id DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS personal_access_tokens (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users (id),
        name VARCHAR(255) NOT NULL,
        token VARCHAR(64) NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL,
        last_used_at TIMESTAMPTZ NULL
    )
    "#,
];

/// Postgres store for users, posts and personal access tokens.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> DomainResult<Self> {
        let pool = PgPool::connect(database_url).await.map_err(storage)?;
        Ok(Self::new(pool))
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(storage)?;
        }
        tracing::info!("database schema ready");
        Ok(())
    }
}

fn storage(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "postgres query failed");
    DomainError::storage(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: PostId::from_uuid(row.try_get::<Uuid, _>("id")?),
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn token_from_row(row: &PgRow) -> Result<AccessToken, sqlx::Error> {
    Ok(AccessToken {
        id: TokenId::from_uuid(row.try_get::<Uuid, _>("id")?),
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        name: row.try_get("name")?,
        fingerprint: row.try_get("token")?,
        created_at: row.try_get("created_at")?,
        last_used_at: row.try_get("last_used_at")?,
    })
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn insert_user(&self, user: User) -> DomainResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DomainError::field("email", EMAIL_TAKEN))
            }
            Err(e) => Err(storage(e)),
        }
    }

    async fn find_user(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(user_from_row).transpose().map_err(storage)
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(user_from_row).transpose().map_err(storage)
    }

    async fn find_users(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query("SELECT * FROM users WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter()
            .map(user_from_row)
            .collect::<Result<_, _>>()
            .map_err(storage)
    }
}

#[async_trait]
impl PostStore for PostgresStore {
    async fn insert_post(&self, post: Post) -> DomainResult<Post> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, title, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.user_id.as_uuid())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(post)
    }

    async fn find_post(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(post_from_row).transpose().map_err(storage)
    }

    async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter()
            .map(post_from_row)
            .collect::<Result<_, _>>()
            .map_err(storage)
    }

    async fn update_post(&self, post: &Post) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, body = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TokenStore for PostgresStore {
    async fn insert_token(&self, token: AccessToken) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO personal_access_tokens (id, user_id, name, token, created_at, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.id.as_uuid())
        .bind(token.user_id.as_uuid())
        .bind(&token.name)
        .bind(&token.fingerprint)
        .bind(token.created_at)
        .bind(token.last_used_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn find_token(&self, id: TokenId) -> DomainResult<Option<AccessToken>> {
        let row = sqlx::query("SELECT * FROM personal_access_tokens WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(token_from_row).transpose().map_err(storage)
    }

    async fn find_token_by_fingerprint(&self, fingerprint: &str) -> DomainResult<Option<AccessToken>> {
        let row = sqlx::query("SELECT * FROM personal_access_tokens WHERE token = $1")
            .bind(fingerprint)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(token_from_row).transpose().map_err(storage)
    }

    async fn touch_token(&self, id: TokenId, at: DateTime<Utc>) -> DomainResult<()> {
        sqlx::query("UPDATE personal_access_tokens SET last_used_at = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn delete_token(&self, id: TokenId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM personal_access_tokens WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() > 0)
    }
}
