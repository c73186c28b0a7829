//! Authorization decisions.
//!
//! Policies return an [`Authorization`] instead of a bare `bool` so the denial
//! reason travels with the decision up to the HTTP layer.

use inkpost_core::{DomainError, DomainResult};

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied(String),
}

impl Authorization {
    pub fn allow() -> Self {
        Self::Allowed
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Denied(reason.into())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert into a result, turning a denial into [`DomainError::Forbidden`].
    pub fn into_result(self) -> DomainResult<()> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied(reason) => Err(DomainError::forbidden(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_carries_reason_into_error() {
        let decision = Authorization::deny("not yours");
        assert!(!decision.is_allowed());
        assert_eq!(
            decision.into_result(),
            Err(DomainError::Forbidden("not yours".to_string()))
        );
    }

    #[test]
    fn allowed_is_ok() {
        assert!(Authorization::allow().is_allowed());
        assert_eq!(Authorization::allow().into_result(), Ok(()));
    }
}
