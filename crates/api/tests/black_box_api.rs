use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use inkpost_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh in-memory stores, ephemeral port.
        let app = build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn send(req: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let res = req.send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

async fn register(client: &reqwest::Client, srv: &TestServer, name: &str, email: &str) -> String {
    let (status, body) = send(client.post(srv.url("/register")).json(&json!({
        "name": name,
        "email": email,
        "password": "secret123",
        "password_confirmation": "secret123",
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_post(client: &reqwest::Client, srv: &TestServer, token: &str, title: &str) -> String {
    let (status, body) = send(
        client
            .post(srv.url("/posts"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "body": "Body" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["post"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(client.post(srv.url("/logout"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthenticated.");

    let (status, _) = send(
        client
            .post(srv.url("/posts"))
            .bearer_auth("not-a-token")
            .json(&json!({ "title": "t", "body": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_returns_token_and_user_without_password() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(client.post(srv.url("/register")).json(&json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "secret123",
        "password_confirmation": "secret123",
    })))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["data"]["token"].as_str().unwrap().contains('|'));

    let user = body["data"]["user"].as_object().unwrap();
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["email"], "alice@example.com");
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_hash"));
    assert!(!body.to_string().contains("secret123"));
}

#[tokio::test]
async fn register_validation_is_field_level() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(client.post(srv.url("/register")).json(&json!({
        "email": "not-an-email",
        "password": "secret123",
        "password_confirmation": "different",
    })))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The name field is required.");
    assert_eq!(body["errors"]["name"][0], "The name field is required.");
    assert_eq!(body["errors"]["email"][0], "The email field must be a valid email address.");
    assert_eq!(
        body["errors"]["password"][0],
        "The password field confirmation does not match."
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "Alice", "alice@example.com").await;

    let (status, body) = send(client.post(srv.url("/register")).json(&json!({
        "name": "Other",
        "email": "alice@example.com",
        "password": "secret123",
        "password_confirmation": "secret123",
    })))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
}

#[tokio::test]
async fn login_failures() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "Alice", "alice@example.com").await;

    let (status, body) = send(client.post(srv.url("/login")).json(&json!({
        "email": "alice@example.com",
        "password": "wrong",
    })))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["password"][0], "The provided credentials are incorrect.");
    assert!(body.get("data").is_none());

    let (status, body) = send(client.post(srv.url("/login")).json(&json!({
        "email": "ghost@example.com",
        "password": "secret123",
    })))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["email"][0], "The selected email is invalid.");
}

#[tokio::test]
async fn logout_revokes_only_the_presented_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let first = register(&client, &srv, "Alice", "alice@example.com").await;

    let (status, body) = send(client.post(srv.url("/login")).json(&json!({
        "email": "alice@example.com",
        "password": "secret123",
    })))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User logged in successfully");
    let second = body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    let (status, body) = send(client.post(srv.url("/logout")).bearer_auth(&second)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User logged out successfully");

    let (status, _) = send(client.post(srv.url("/logout")).bearer_auth(&second)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The other session is untouched.
    create_post(&client, &srv, &first, "still here").await;
}

#[tokio::test]
async fn blog_lifecycle_with_ownership() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let alice = register(&client, &srv, "Alice", "alice@example.com").await;
    let bob = register(&client, &srv, "Bob", "bob@example.com").await;

    let (status, body) = send(
        client
            .post(srv.url("/posts"))
            .bearer_auth(&alice)
            .json(&json!({ "title": "Hi", "body": "Hello", "user_id": "spoofed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post created successfully");
    assert_eq!(body["data"]["post"]["user_id"], body["data"]["user"]["id"]);
    assert_eq!(body["data"]["user"]["name"], "Alice");
    let id = body["data"]["post"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(client.get(srv.url(&format!("/posts/{id}")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["post"]["title"], "Hi");

    // Bob cannot touch it, even with an invalid payload.
    let (status, body) = send(
        client
            .put(srv.url(&format!("/posts/{id}")))
            .bearer_auth(&bob)
            .json(&json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You are not authorized to modify this post.");

    let (status, _) = send(client.delete(srv.url(&format!("/posts/{id}"))).bearer_auth(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(client.get(srv.url(&format!("/posts/{id}")))).await;
    assert_eq!(body["data"]["post"]["title"], "Hi");

    let (status, body) = send(
        client
            .patch(srv.url(&format!("/posts/{id}")))
            .bearer_auth(&alice)
            .json(&json!({ "title": "Edited", "body": "New" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["data"]["post"]["title"], "Edited");

    let (status, body) =
        send(client.delete(srv.url(&format!("/posts/{id}"))).bearer_auth(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");
    assert!(body.get("data").is_none());

    let (status, body) = send(client.get(srv.url(&format!("/posts/{id}")))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn non_owner_is_forbidden_whatever_the_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let alice = register(&client, &srv, "Alice", "alice@example.com").await;
    let bob = register(&client, &srv, "Bob", "bob@example.com").await;
    let id = create_post(&client, &srv, &alice, "Hi").await;
    let url = srv.url(&format!("/posts/{id}"));

    let attempts = [
        client
            .put(&url)
            .bearer_auth(&bob)
            .header("content-type", "application/json")
            .body("{bad"),
        client.put(&url).bearer_auth(&bob),
        client.patch(&url).bearer_auth(&bob).json(&json!({ "title": 5 })),
        client.put(&url).bearer_auth(&bob).json(&json!({})),
    ];
    for req in attempts {
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{body}");
        assert_eq!(body["message"], "You are not authorized to modify this post.");
    }

    // The owner still sees body errors for the same payload.
    let (status, body) = send(
        client
            .put(&url)
            .bearer_auth(&alice)
            .header("content-type", "application/json")
            .body("{bad"),
    )
    .await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (_, body) = send(client.get(&url)).await;
    assert_eq!(body["data"]["post"]["title"], "Hi");
}

#[tokio::test]
async fn post_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register(&client, &srv, "Alice", "alice@example.com").await;

    let (status, body) = send(
        client
            .post(srv.url("/posts"))
            .bearer_auth(&token)
            .json(&json!({ "title": "x".repeat(256) })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["title"][0],
        "The title field must not be greater than 255 characters."
    );
    assert_eq!(body["errors"]["body"][0], "The body field is required.");
}

#[tokio::test]
async fn posts_are_listed_newest_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register(&client, &srv, "Alice", "alice@example.com").await;

    for title in ["first", "second", "third"] {
        create_post(&client, &srv, &token, title).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = send(client.get(srv.url("/posts"))).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["post"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register(&client, &srv, "Alice", "alice@example.com").await;

    let (status, body) = send(client.get(srv.url("/posts/not-a-uuid"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found.");

    let missing = "0190f0e4-0000-7000-8000-000000000000";
    let (status, _) = send(
        client
            .delete(srv.url(&format!("/posts/{missing}")))
            .bearer_auth(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_uses_the_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = send(
        client
            .post(srv.url("/register"))
            .header("content-type", "application/json")
            .body("{not json"),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}
