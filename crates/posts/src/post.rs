//! Post record and input validation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use inkpost_auth::User;
use inkpost_core::validation::{MAX_STRING_LEN, Validator};
use inkpost_core::{DomainResult, Entity, PostId, UserId};

/// A blog post.
///
/// `user_id` is the owner. It is fixed at creation and nothing in this crate
/// ever reassigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(owner: UserId, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: PostId::new(),
            title: draft.title,
            body: draft.body,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields. Ownership and creation time are untouched.
    pub fn revise(&mut self, draft: PostDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.body = draft.body;
        self.updated_at = now;
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Raw title/body input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Validated editable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostInput {
    pub fn validate(&self) -> DomainResult<PostDraft> {
        let mut v = Validator::new();

        let title = v.required("title", self.title.as_deref());
        if let Some(title) = title {
            v.max_len("title", title, MAX_STRING_LEN);
        }
        let body = v.required("body", self.body.as_deref());

        v.finish()?;

        Ok(PostDraft {
            title: title.unwrap_or_default().to_string(),
            body: body.unwrap_or_default().to_string(),
        })
    }
}

/// A post together with its owner, the shape every post endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_core::DomainError;

    fn input(title: Option<&str>, body: Option<&str>) -> PostInput {
        PostInput {
            title: title.map(str::to_string),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let draft = input(Some("  Hi "), Some("Body\n")).validate().unwrap();
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.body, "Body");
    }

    #[test]
    fn title_longer_than_255_is_rejected() {
        let long = "t".repeat(256);
        let Err(DomainError::Validation(errors)) = input(Some(&long), Some("b")).validate() else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.messages("title"),
            ["The title field must not be greater than 255 characters."]
        );
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let Err(DomainError::Validation(errors)) = input(None, Some("")).validate() else {
            panic!("expected validation error");
        };
        assert!(errors.has("title"));
        assert_eq!(errors.messages("body"), ["The body field is required."]);
    }

    #[test]
    fn revise_keeps_owner_and_created_at() {
        let owner = UserId::new();
        let created = Utc::now();
        let mut post = Post::new(
            owner,
            PostDraft {
                title: "Hi".into(),
                body: "Body".into(),
            },
            created,
        );

        let later = created + chrono::Duration::seconds(5);
        post.revise(
            PostDraft {
                title: "New".into(),
                body: "Text".into(),
            },
            later,
        );

        assert_eq!(post.title, "New");
        assert_eq!(post.user_id, owner);
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn post_json_shape() {
        let owner = UserId::new();
        let post = Post::new(
            owner,
            PostDraft {
                title: "Hi".into(),
                body: "Body".into(),
            },
            Utc::now(),
        );
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["user_id"], owner.to_string());
        assert_eq!(json["title"], "Hi");
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
    }
}
