use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::Response,
};

use inkpost_core::DomainError;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::Authenticated;

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let services = parts
            .extensions
            .get::<Arc<AppServices>>()
            .cloned()
            .ok_or_else(|| {
                errors::domain_error_to_response(DomainError::storage(
                    "services extension missing from router",
                ))
            })?;

        let Some(token) = extract_bearer(&parts.headers).map(str::to_string) else {
            return Err(errors::domain_error_to_response(DomainError::Unauthenticated));
        };

        let principal = services
            .accounts
            .authenticate(&token)
            .await
            .map_err(|e| {
                if e == DomainError::Unauthenticated {
                    tracing::warn!(path = %parts.uri.path(), "rejected bearer token");
                }
                errors::domain_error_to_response(e)
            })?;

        Ok(Authenticated(principal))
    }
}

pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
