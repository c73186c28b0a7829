use inkpost_core::{TokenId, UserId};

use crate::User;

/// An authenticated caller: the user plus the token that proved it.
///
/// Handlers receive this explicitly; logout needs `token_id` to revoke the
/// credential that was actually presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: User,
    pub token_id: TokenId,
}

impl Principal {
    pub fn new(user: User, token_id: TokenId) -> Self {
        Self { user, token_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
