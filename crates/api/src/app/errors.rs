use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use inkpost_core::{DomainError, ValidationErrors};

pub const UNAUTHENTICATED: &str = "Unauthenticated.";
pub const BAD_CREDENTIALS: &str = "The provided credentials are incorrect.";
pub const NOT_FOUND: &str = "Post not found.";
pub const SERVER_ERROR: &str = "Server Error";

/// The JSON wrapper every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

pub fn success<T: Serialize>(
    status: StatusCode,
    message: Option<&str>,
    data: Option<T>,
) -> Response {
    (
        status,
        Json(Envelope {
            success: true,
            message: message.map(str::to_string),
            data,
            errors: None,
        }),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    message: Option<String>,
    errors: Option<ValidationErrors>,
) -> Response {
    (
        status,
        Json(Envelope::<()> {
            success: false,
            message,
            data: None,
            errors,
        }),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(errors) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            errors.first_message().map(str::to_string),
            Some(errors),
        ),
        DomainError::InvalidCredentials => {
            let mut errors = ValidationErrors::new();
            errors.add("password", BAD_CREDENTIALS);
            json_error(StatusCode::UNAUTHORIZED, None, Some(errors))
        }
        DomainError::Unauthenticated => json_error(
            StatusCode::UNAUTHORIZED,
            Some(UNAUTHENTICATED.to_string()),
            None,
        ),
        DomainError::Forbidden(reason) => json_error(StatusCode::FORBIDDEN, Some(reason), None),
        DomainError::NotFound | DomainError::InvalidId(_) => {
            json_error(StatusCode::NOT_FOUND, Some(NOT_FOUND.to_string()), None)
        }
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "request failed on storage");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(SERVER_ERROR.to_string()),
                None,
            )
        }
    }
}

/// Body extraction failures keep their status but use the envelope.
pub fn rejection_to_response(rejection: JsonRejection) -> Response {
    json_error(rejection.status(), Some(rejection.body_text()), None)
}
