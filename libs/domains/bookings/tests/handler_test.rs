//! Handler tests for the Bookings domain
//!
//! Users and items live in in-memory repositories seeded directly; every
//! booking operation goes through the router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use domain_bookings::*;
use domain_items::{CreateItem, InMemoryItemRepository, Item, ItemRepository};
use domain_users::{CreateUser, InMemoryUserRepository, User, UserRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

const HEADER: &str = "X-Sharer-User-Id";

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct Fixture {
    app: Router,
    owner: Uuid,
    booker: Uuid,
    item: Uuid,
}

async fn fixture() -> Fixture {
    let users = InMemoryUserRepository::new();
    let owner = users
        .create(User::new(CreateUser {
            name: "A".to_string(),
            email: "a@mail.com".to_string(),
        }))
        .await
        .unwrap();
    let booker = users
        .create(User::new(CreateUser {
            name: "B".to_string(),
            email: "b@mail.com".to_string(),
        }))
        .await
        .unwrap();

    let items = InMemoryItemRepository::new();
    let item = items
        .create(Item::new(
            owner.id,
            CreateItem {
                name: "Drill".to_string(),
                description: "Cordless".to_string(),
                available: Some(true),
                request_id: None,
            },
        ))
        .await
        .unwrap();

    let service = BookingService::new(
        InMemoryBookingRepository::new(),
        Arc::new(users),
        Arc::new(items),
    );

    Fixture {
        app: handlers::router(service),
        owner: owner.id,
        booker: booker.id,
        item: item.id,
    }
}

fn send(method: &str, uri: &str, user: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(HEADER, user.to_string());
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn period(start_in: Duration, length: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc::now() + start_in;
    (start, start + length)
}

async fn book(f: &Fixture, start: DateTime<Utc>, end: DateTime<Utc>) -> (StatusCode, Value) {
    let response = f
        .app
        .clone()
        .oneshot(send(
            "POST",
            "/",
            f.booker,
            Some(json!({ "itemId": f.item, "start": start, "end": end })),
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn decide(f: &Fixture, user: Uuid, booking: &str, approved: bool) -> (StatusCode, Value) {
    let response = f
        .app
        .clone()
        .oneshot(send(
            "PATCH",
            &format!("/{}?approved={}", booking, approved),
            user,
            None,
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let f = fixture().await;
    let (start, end) = period(Duration::hours(1), Duration::hours(1));

    let (status, created) = book(&f, start, end).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "WAITING");
    assert_eq!(created["item"]["name"], "Drill");
    assert_eq!(created["booker"]["id"], f.booker.to_string());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, approved) = decide(&f, f.owner, &id, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");

    let (status, _) = decide(&f, f.booker, &id, true).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = decide(&f, f.owner, &id, true).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking is already approved");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rejected_booking_cannot_be_rejected_again() {
    let f = fixture().await;
    let (start, end) = period(Duration::hours(1), Duration::hours(1));
    let (_, created) = book(&f, start, end).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, rejected) = decide(&f, f.owner, &id, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "REJECTED");

    let (status, body) = decide(&f, f.owner, &id, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking is already rejected");
}

#[tokio::test]
async fn test_invalid_periods_are_rejected() {
    let f = fixture().await;

    let (start, _) = period(Duration::hours(2), Duration::hours(1));
    let (status, _) = book(&f, start, start - Duration::hours(1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = book(&f, start, start).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (start, end) = period(-Duration::hours(1), Duration::hours(3));
    let (status, _) = book(&f, start, end).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let f = fixture().await;
    let (start, end) = period(Duration::hours(1), Duration::hours(1));

    let response = f
        .app
        .oneshot(send(
            "POST",
            "/",
            f.owner,
            Some(json!({ "itemId": f.item, "start": start, "end": end })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_booking_visibility() {
    let f = fixture().await;
    let (start, end) = period(Duration::hours(1), Duration::hours(1));
    let (_, created) = book(&f, start, end).await;
    let uri = format!("/{}", created["id"].as_str().unwrap());

    for user in [f.booker, f.owner] {
        let response = f
            .app
            .clone()
            .oneshot(send("GET", &uri, user, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = f
        .app
        .oneshot(send("GET", &uri, Uuid::now_v7(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lists_by_state() {
    let f = fixture().await;
    let (start, end) = period(Duration::hours(1), Duration::hours(1));
    book(&f, start, end).await;
    let (start, end) = period(Duration::days(2), Duration::hours(1));
    let (_, later) = book(&f, start, end).await;

    let response = f
        .app
        .clone()
        .oneshot(send("GET", "/?state=FUTURE", f.booker, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let future: Vec<BookingView> = json_body(response.into_body()).await;
    assert_eq!(future.len(), 2);
    assert_eq!(future[0].id.to_string(), later["id"].as_str().unwrap());

    let response = f
        .app
        .clone()
        .oneshot(send("GET", "/owner?state=PAST", f.owner, None))
        .await
        .unwrap();
    let past: Vec<BookingView> = json_body(response.into_body()).await;
    assert!(past.is_empty());

    let response = f
        .app
        .oneshot(send("GET", "/owner?from=0&size=1", f.owner, None))
        .await
        .unwrap();
    let page: Vec<BookingView> = json_body(response.into_body()).await;
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_unknown_state() {
    let f = fixture().await;

    for uri in ["/?state=UNSUPPORTED_STATUS", "/owner?state=future"] {
        let response = f
            .app
            .clone()
            .oneshot(send("GET", uri, f.booker, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "Unknown state: UNSUPPORTED_STATUS");
    }
}

#[tokio::test]
async fn test_missing_user_header_is_rejected() {
    let f = fixture().await;
    let response = f
        .app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
