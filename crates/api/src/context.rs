use inkpost_auth::{Principal, User};

/// Authenticated caller for a request.
///
/// Taking this as a handler argument makes the route require a valid bearer
/// token; see [`crate::middleware`] for how it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Principal);

impl Authenticated {
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    pub fn user(&self) -> &User {
        &self.0.user
    }
}
