use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::Authenticated;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.accounts.register(body.into()).await {
        Ok(issued) => errors::success(
            StatusCode::CREATED,
            Some("User registered successfully"),
            Some(dto::TokenResponse::from(issued)),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.accounts.login(body.into()).await {
        Ok(issued) => errors::success(
            StatusCode::OK,
            Some("User logged in successfully"),
            Some(dto::TokenResponse::from(issued)),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Authenticated,
) -> Response {
    match services.accounts.logout(caller.principal()).await {
        Ok(()) => errors::success::<()>(
            StatusCode::OK,
            Some("User logged out successfully"),
            None,
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}
