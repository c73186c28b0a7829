//! Post CRUD with ownership enforcement.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use inkpost_auth::User;
use inkpost_core::{DomainError, DomainResult, PostId};
use inkpost_posts::{Post, PostInput, PostPolicy, PostWithAuthor};

use crate::store::{PostStore, UserStore};

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// Every post with its author, newest first.
    pub async fn list(&self) -> DomainResult<Vec<PostWithAuthor>> {
        let posts = self.posts.list_posts().await?;

        let mut owner_ids: Vec<_> = posts.iter().map(|p| p.user_id).collect();
        owner_ids.sort();
        owner_ids.dedup();
        let owners: HashMap<_, _> = self
            .users
            .find_users(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        posts
            .into_iter()
            .map(|post| match owners.get(&post.user_id) {
                Some(user) => Ok(PostWithAuthor {
                    user: user.clone(),
                    post,
                }),
                None => Err(orphaned(&post)),
            })
            .collect()
    }

    pub async fn get(&self, id: PostId) -> DomainResult<PostWithAuthor> {
        let post = self.find(id).await?;
        self.with_author(post).await
    }

    /// The owner is always `author`; nothing in the input can redirect it.
    pub async fn create(&self, author: &User, input: PostInput) -> DomainResult<PostWithAuthor> {
        let draft = input.validate()?;
        let post = self
            .posts
            .insert_post(Post::new(author.id, draft, Utc::now()))
            .await?;

        tracing::info!(post_id = %post.id, user_id = %author.id, "post created");
        Ok(PostWithAuthor {
            post,
            user: author.clone(),
        })
    }

    /// Ownership is checked before the input is even validated, so a
    /// non-owner learns nothing about the payload and nothing is written.
    pub async fn update(
        &self,
        caller: &User,
        id: PostId,
        input: PostInput,
    ) -> DomainResult<PostWithAuthor> {
        let mut post = self.find(id).await?;
        self.authorize(caller, &post)?;

        let draft = input.validate()?;
        post.revise(draft, Utc::now());
        self.posts.update_post(&post).await?;

        tracing::info!(post_id = %post.id, user_id = %caller.id, "post updated");
        self.with_author(post).await
    }

    pub async fn delete(&self, caller: &User, id: PostId) -> DomainResult<()> {
        let post = self.find(id).await?;
        self.authorize(caller, &post)?;

        if !self.posts.delete_post(id).await? {
            return Err(DomainError::NotFound);
        }
        tracing::info!(post_id = %id, user_id = %caller.id, "post deleted");
        Ok(())
    }

    /// Check that `caller` may modify post `id` without changing anything.
    pub async fn authorize_modify(&self, caller: &User, id: PostId) -> DomainResult<()> {
        let post = self.find(id).await?;
        self.authorize(caller, &post)
    }

    async fn find(&self, id: PostId) -> DomainResult<Post> {
        self.posts.find_post(id).await?.ok_or(DomainError::NotFound)
    }

    fn authorize(&self, caller: &User, post: &Post) -> DomainResult<()> {
        PostPolicy::modify(caller, post).into_result().inspect_err(|_| {
            tracing::warn!(post_id = %post.id, user_id = %caller.id, "post modification denied");
        })
    }

    async fn with_author(&self, post: Post) -> DomainResult<PostWithAuthor> {
        match self.users.find_user(post.user_id).await? {
            Some(user) => Ok(PostWithAuthor { post, user }),
            None => Err(orphaned(&post)),
        }
    }
}

fn orphaned(post: &Post) -> DomainError {
    tracing::error!(post_id = %post.id, user_id = %post.user_id, "post owner missing");
    DomainError::storage(format!("owner of post {} is missing", post.id))
}
