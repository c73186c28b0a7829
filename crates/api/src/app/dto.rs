use serde::{Deserialize, Serialize};

use inkpost_auth::{LoginRequest as Login, RegistrationRequest, User};
use inkpost_infra::IssuedCredentials;
use inkpost_posts::PostInput;

// -------------------------
// Request DTOs
// -------------------------
//
// Every field is optional so that a missing field reaches validation and comes
// back as a field message rather than a body rejection. Unknown fields are
// ignored.

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(body: RegisterRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            password_confirmation: body.password_confirmation,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for Login {
    fn from(body: LoginRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl From<PostRequest> for PostInput {
    fn from(body: PostRequest) -> Self {
        Self {
            title: body.title,
            body: body.body,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: User,
}

impl From<IssuedCredentials> for TokenResponse {
    fn from(issued: IssuedCredentials) -> Self {
        Self {
            token: issued.token.into_string(),
            user: issued.user,
        }
    }
}
