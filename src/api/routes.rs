//! API route configuration.
//!
//! Mounted under `/api` by [`crate::routes::app_router`].

use crate::api::handlers::{
    borrow_book_handler, create_author_handler, create_book_handler, create_member_handler,
    create_record_handler, delete_author_handler, delete_book_handler, delete_member_handler,
    delete_profile_handler, delete_record_handler, get_author_handler, get_book_handler,
    get_member_handler, get_profile_handler, get_record_handler, list_authors_handler,
    list_books_handler, list_members_handler, list_records_handler, put_profile_handler,
    return_book_handler, update_author_handler, update_book_handler, update_member_handler,
    update_record_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET|POST          /authors`
/// - `GET|PUT|DELETE    /authors/{id}`          - delete cascades to the author's books
/// - `GET|POST          /books`                 - list accepts `authorId`
/// - `GET|PUT|DELETE    /books/{id}`
/// - `GET|POST          /members`
/// - `GET|PUT|DELETE    /members/{id}`
/// - `GET|PUT|DELETE    /members/{id}/profile`  - PUT replaces and removes the old profile
/// - `PUT|DELETE        /members/{id}/borrowed-books/{book_id}`
/// - `GET|POST          /borrowing-records`
/// - `GET|PUT|DELETE    /borrowing-records/{id}`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/authors",
            get(list_authors_handler).post(create_author_handler),
        )
        .route(
            "/authors/{id}",
            get(get_author_handler)
                .put(update_author_handler)
                .delete(delete_author_handler),
        )
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route(
            "/members",
            get(list_members_handler).post(create_member_handler),
        )
        .route(
            "/members/{id}",
            get(get_member_handler)
                .put(update_member_handler)
                .delete(delete_member_handler),
        )
        .route(
            "/members/{id}/profile",
            get(get_profile_handler)
                .put(put_profile_handler)
                .delete(delete_profile_handler),
        )
        .route(
            "/members/{id}/borrowed-books/{book_id}",
            put(borrow_book_handler).delete(return_book_handler),
        )
        .route(
            "/borrowing-records",
            get(list_records_handler).post(create_record_handler),
        )
        .route(
            "/borrowing-records/{id}",
            get(get_record_handler)
                .put(update_record_handler)
                .delete(delete_record_handler),
        )
}
