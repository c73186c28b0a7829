//! Blog posts and the ownership policy that guards them.

pub mod policy;
pub mod post;

pub use policy::PostPolicy;
pub use post::{Post, PostDraft, PostInput, PostWithAuthor};
