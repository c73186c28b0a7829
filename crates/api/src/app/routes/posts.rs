use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::Response,
    Json,
};

use inkpost_core::{DomainResult, PostId};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::Authenticated;

pub async fn list_posts(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.posts.list().await {
        Ok(posts) => errors::success(StatusCode::OK, None, Some(posts)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.posts.get(id).await {
        Ok(post) => errors::success(StatusCode::OK, None, Some(post)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Authenticated,
    body: Result<Json<dto::PostRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.posts.create(caller.user(), body.into()).await {
        Ok(post) => errors::success(
            StatusCode::CREATED,
            Some("Post created successfully"),
            Some(post),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Authenticated,
    Path(id): Path<String>,
    body: Result<Json<dto::PostRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            // Ownership is decided before the payload is looked at.
            if let Err(e) = services.posts.authorize_modify(caller.user(), id).await {
                return errors::domain_error_to_response(e);
            }
            return errors::rejection_to_response(rejection);
        }
    };

    match services.posts.update(caller.user(), id, body.into()).await {
        Ok(post) => errors::success(
            StatusCode::OK,
            Some("Post updated successfully"),
            Some(post),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Authenticated,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.posts.delete(caller.user(), id).await {
        Ok(()) => errors::success::<()>(
            StatusCode::OK,
            Some("Post deleted successfully"),
            None,
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

// Ids that are not UUIDs can never name a post.
fn parse_id(raw: &str) -> DomainResult<PostId> {
    raw.parse()
}
