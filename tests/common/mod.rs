#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use library_service::api::handlers::health_handler;
use library_service::api::routes::routes;
use library_service::domain::clock::FixedClock;
use library_service::state::{AppState, Repositories};

/// Year reported by the clock in every handler test.
pub const CURRENT_YEAR: i32 = 2024;

pub fn create_test_state() -> AppState {
    AppState::new(Repositories::in_memory(), Arc::new(FixedClock(CURRENT_YEAR)))
}

pub fn make_server() -> TestServer {
    let app = Router::new()
        .route("/health", axum::routing::get(health_handler))
        .nest("/api", routes())
        .with_state(create_test_state());
    TestServer::new(app).unwrap()
}

pub async fn create_author(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/authors")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_book(server: &TestServer, title: &str, author_id: i64) -> i64 {
    let response = server
        .post("/api/books")
        .json(&json!({
            "title": title,
            "publicationYear": 2001,
            "authorId": author_id
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_member(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/members")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_record(server: &TestServer, book_id: i64, member_id: i64) -> i64 {
    let response = server
        .post("/api/borrowing-records")
        .json(&json!({
            "bookId": book_id,
            "memberId": member_id,
            "borrowDate": "2024-03-01"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}
