//! Handler tests for the Users domain
//!
//! These drive the users router directly with `oneshot`, backed by the
//! in-memory repository:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes and error envelopes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// Stands in for another domain that holds rows pointing at users
#[derive(Default)]
struct Holdings(Mutex<HashSet<Uuid>>);

impl Holdings {
    fn hold(&self, user_id: Uuid) {
        self.0.lock().unwrap().insert(user_id);
    }
}

#[async_trait::async_trait]
impl UserReferences for Holdings {
    async fn references_user(&self, user_id: Uuid) -> UserResult<bool> {
        Ok(self.0.lock().unwrap().contains(&user_id))
    }
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, name: &str, email: &str) -> User {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": name, "email": email }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_user_returns_201() {
    let app = app();
    let user = create(&app, "Alice", "a@mail.com").await;

    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "a@mail.com");
}

#[tokio::test]
async fn test_create_user_with_invalid_email_returns_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Alice", "email": "nope" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_user_without_email_returns_400() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "name": "Alice" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = app();
    create(&app, "Alice", "a@mail.com").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Impostor", "email": "A@Mail.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_patch_updates_only_given_fields() {
    let app = app();
    let user = create(&app, "Alice", "a@mail.com").await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", user.id),
            json!({ "name": "Alicia" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "a@mail.com");
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", uuid::Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_with_malformed_id_returns_400() {
    let response = app()
        .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "INVALID_UUID");
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app();
    let user = create(&app, "Alice", "a@mail.com").await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", user.id))
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = app.oneshot(delete()).await.unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_who_still_owns_something_returns_409() {
    let holdings = Arc::new(Holdings::default());
    let references: Arc<dyn UserReferences> = holdings.clone();
    let app = handlers::router(
        UserService::new(InMemoryUserRepository::new()).with_references(vec![references]),
    );
    let owner = create(&app, "Owner", "owner@mail.com").await;
    let other = create(&app, "Other", "other@mail.com").await;
    holdings.hold(owner.id);

    let delete = |id: Uuid| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let refused = app.clone().oneshot(delete(owner.id)).await.unwrap();
    assert_eq!(refused.status(), StatusCode::CONFLICT);
    let body: Value = json_body(refused.into_body()).await;
    assert_eq!(body["code"], "CONFLICT");

    let still_there = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", owner.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(still_there.status(), StatusCode::OK);

    let unrelated = app.oneshot(delete(other.id)).await.unwrap();
    assert_eq!(unrelated.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_users() {
    let app = app();
    create(&app, "Alice", "a@mail.com").await;
    create(&app, "Bob", "b@mail.com").await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let users: Vec<User> = json_body(response.into_body()).await;
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}
