//! Who may change a post.

use inkpost_auth::{Authorization, User};

use crate::Post;

pub const NOT_OWNER: &str = "You are not authorized to modify this post.";

/// Ownership policy for posts.
///
/// Pure: the decision depends only on the two arguments.
pub struct PostPolicy;

impl PostPolicy {
    /// Update and delete share this single rule: only the owner may act.
    pub fn modify(user: &User, post: &Post) -> Authorization {
        if user.id == post.user_id {
            Authorization::allow()
        } else {
            Authorization::deny(NOT_OWNER)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use inkpost_core::{DomainError, UserId};

    use super::*;
    use crate::PostDraft;

    fn user() -> User {
        User::new("Alice".into(), "a@x.com".into(), "hash".into(), Utc::now())
    }

    fn post_by(owner: UserId) -> Post {
        let draft = PostDraft {
            title: "Hi".into(),
            body: "Body".into(),
        };
        Post::new(owner, draft, Utc::now())
    }

    #[test]
    fn owner_may_modify() {
        let alice = user();
        let post = post_by(alice.id);
        assert_eq!(PostPolicy::modify(&alice, &post), Authorization::Allowed);
    }

    #[test]
    fn stranger_is_denied_with_reason() {
        let alice = user();
        let bob = user();
        let post = post_by(alice.id);

        assert_eq!(
            PostPolicy::modify(&bob, &post).into_result(),
            Err(DomainError::Forbidden(NOT_OWNER.to_string()))
        );
    }

    proptest! {
        #[test]
        fn allowed_iff_ids_match(a in any::<u128>(), b in any::<u128>()) {
            let mut caller = user();
            caller.id = UserId::from_uuid(uuid_from(a));
            let post = post_by(UserId::from_uuid(uuid_from(b)));

            let allowed = PostPolicy::modify(&caller, &post).is_allowed();
            prop_assert_eq!(allowed, a == b);
        }
    }

    fn uuid_from(n: u128) -> uuid::Uuid {
        uuid::Uuid::from_u128(n)
    }
}
