mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn profile(email: &str) -> Value {
    json!({
        "email": email,
        "phone": "+1234567890",
        "address": "1 Library Lane",
        "dateOfBirth": "1990-04-12"
    })
}

// ─── MEMBERS ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_member_success() {
    let server = common::make_server();

    let response = server
        .post("/api/members")
        .json(&json!({ "name": "Ada Lovelace" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["name"], "Ada Lovelace");
    assert!(body["profile"].is_null());
    assert_eq!(body["borrowedBookIds"], json!([]));
}

#[tokio::test]
async fn test_create_member_blank_name() {
    let server = common::make_server();

    let response = server
        .post("/api/members")
        .json(&json!({ "name": "" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["name"], "Name must not be blank");
}

#[tokio::test]
async fn test_get_member_not_found() {
    let server = common::make_server();

    let response = server.get("/api/members/5").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["errorResponse"], "MEMBER NOT FOUND");
}

#[tokio::test]
async fn test_rename_member_keeps_profile() {
    let server = common::make_server();
    let id = common::create_member(&server, "Before").await;
    server
        .put(&format!("/api/members/{id}/profile"))
        .json(&profile("keep@example.com"))
        .await
        .assert_status_ok();

    let response = server
        .put(&format!("/api/members/{id}"))
        .json(&json!({ "name": "After" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["name"], "After");
    assert_eq!(body["profile"]["email"], "keep@example.com");
}

#[tokio::test]
async fn test_delete_member_removes_profile_and_records() {
    let server = common::make_server();
    let author_id = common::create_author(&server, "Author").await;
    let book_id = common::create_book(&server, "Book", author_id).await;
    let member_id = common::create_member(&server, "Leaving").await;
    let record_id = common::create_record(&server, book_id, member_id).await;
    server
        .put(&format!("/api/members/{member_id}/profile"))
        .json(&profile("leaving@example.com"))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/api/members/{member_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/borrowing-records/{record_id}"))
        .await
        .assert_status_not_found();

    // The email is free again once the owning member is gone.
    let other = common::create_member(&server, "Newcomer").await;
    server
        .put(&format!("/api/members/{other}/profile"))
        .json(&profile("leaving@example.com"))
        .await
        .assert_status_ok();
}

// ─── PROFILE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_attach_profile() {
    let server = common::make_server();
    let id = common::create_member(&server, "Grace").await;

    let response = server
        .put(&format!("/api/members/{id}/profile"))
        .json(&profile("grace@example.com"))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["memberId"], id);
    assert_eq!(body["email"], "grace@example.com");
    assert_eq!(body["dateOfBirth"], "1990-04-12");

    let member = server
        .get(&format!("/api/members/{id}"))
        .await
        .json::<Value>();
    assert_eq!(member["profile"]["memberId"], id);
}

#[tokio::test]
async fn test_replace_profile_removes_orphan() {
    let server = common::make_server();
    let id = common::create_member(&server, "Grace").await;

    let first = server
        .put(&format!("/api/members/{id}/profile"))
        .json(&profile("first@example.com"))
        .await
        .json::<Value>();
    let second = server
        .put(&format!("/api/members/{id}/profile"))
        .json(&profile("second@example.com"))
        .await
        .json::<Value>();

    assert_ne!(first["id"], second["id"]);

    let current = server
        .get(&format!("/api/members/{id}/profile"))
        .await
        .json::<Value>();
    assert_eq!(current["email"], "second@example.com");

    // The replaced profile is gone, so its email can be claimed by someone else.
    let other = common::create_member(&server, "Other").await;
    server
        .put(&format!("/api/members/{other}/profile"))
        .json(&profile("first@example.com"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_profile_email_conflict() {
    let server = common::make_server();
    let first = common::create_member(&server, "First").await;
    let second = common::create_member(&server, "Second").await;
    server
        .put(&format!("/api/members/{first}/profile"))
        .json(&profile("taken@example.com"))
        .await
        .assert_status_ok();

    let response = server
        .put(&format!("/api/members/{second}/profile"))
        .json(&profile("taken@example.com"))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["statusCode"], 409);
    assert_eq!(
        body["message"],
        "A member profile with this email already exists"
    );
}

#[tokio::test]
async fn test_profile_invalid_contact_number() {
    let server = common::make_server();
    let id = common::create_member(&server, "Grace").await;

    let response = server
        .put(&format!("/api/members/{id}/profile"))
        .json(&json!({ "email": "grace@example.com", "phone": "12345" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["phone"],
        "Contact number must be 10 digits, optionally prefixed with '+'"
    );
}

#[tokio::test]
async fn test_profile_missing_fields() {
    let server = common::make_server();
    let id = common::create_member(&server, "Grace").await;

    let response = server
        .put(&format!("/api/members/{id}/profile"))
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert_eq!(body["email"], "Email cannot be null");
    assert_eq!(body["phone"], "Contact number cannot be null");
}

#[tokio::test]
async fn test_profile_for_unknown_member() {
    let server = common::make_server();

    let response = server
        .put("/api/members/31/profile")
        .json(&profile("ghost@example.com"))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_get_missing_profile() {
    let server = common::make_server();
    let id = common::create_member(&server, "Bare").await;

    let response = server.get(&format!("/api/members/{id}/profile")).await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>()["errorResponse"],
        "MEMBER PROFILE NOT FOUND"
    );
}

#[tokio::test]
async fn test_delete_profile() {
    let server = common::make_server();
    let id = common::create_member(&server, "Grace").await;
    server
        .put(&format!("/api/members/{id}/profile"))
        .json(&profile("grace@example.com"))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/api/members/{id}/profile"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let member = server
        .get(&format!("/api/members/{id}"))
        .await
        .json::<Value>();
    assert!(member["profile"].is_null());

    server
        .delete(&format!("/api/members/{id}/profile"))
        .await
        .assert_status_not_found();
}

// ─── BORROWED BOOKS ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_borrow_book_is_idempotent() {
    let server = common::make_server();
    let author_id = common::create_author(&server, "Author").await;
    let book_id = common::create_book(&server, "Book", author_id).await;
    let member_id = common::create_member(&server, "Reader").await;

    for _ in 0..2 {
        let response = server
            .put(&format!("/api/members/{member_id}/borrowed-books/{book_id}"))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["borrowedBookIds"], json!([book_id]));
    }
}

#[tokio::test]
async fn test_borrow_unknown_book() {
    let server = common::make_server();
    let member_id = common::create_member(&server, "Reader").await;

    let response = server
        .put(&format!("/api/members/{member_id}/borrowed-books/88"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>(),
        json!({ "bookId": "Book with the ID 88 does not exist" })
    );
}

#[tokio::test]
async fn test_return_book() {
    let server = common::make_server();
    let author_id = common::create_author(&server, "Author").await;
    let book_id = common::create_book(&server, "Book", author_id).await;
    let member_id = common::create_member(&server, "Reader").await;
    server
        .put(&format!("/api/members/{member_id}/borrowed-books/{book_id}"))
        .await
        .assert_status_ok();

    let response = server
        .delete(&format!("/api/members/{member_id}/borrowed-books/{book_id}"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["borrowedBookIds"], json!([]));

    server
        .delete(&format!("/api/members/{member_id}/borrowed-books/{book_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_borrow_book_non_numeric_book_id() {
    let server = common::make_server();
    let member_id = common::create_member(&server, "Reader").await;

    let response = server
        .put(&format!("/api/members/{member_id}/borrowed-books/abc"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], "Invalid path parameter");
}
