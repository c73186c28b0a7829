use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod posts;
pub mod system;

/// Routes mounted under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
}
