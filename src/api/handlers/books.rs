//! Handlers for book endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::book::{BookListParams, BookRequest, BookResponse};
use crate::api::dto::pagination::ListResponse;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists books, optionally only those of one author.
///
/// # Endpoint
///
/// `GET /api/books?authorId=3&page=1&pageSize=20`
pub async fn list_books_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BookListParams>,
) -> Result<Json<ListResponse<BookResponse>>, AppError> {
    let page = params.pagination.resolve()?;

    let (books, total) = state
        .book_service
        .list_books(page.offset(), page.limit(), params.author_id)
        .await?;

    Ok(Json(ListResponse::new(
        books.into_iter().map(BookResponse::from).collect(),
        page,
        total,
    )))
}

/// Creates a book.
///
/// # Endpoint
///
/// `POST /api/books`
///
/// # Errors
///
/// Returns 400 if the title is blank, the publication year is outside
/// `[0, current year]`, or `authorId` is null or unknown.
pub async fn create_book_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    state.validator.validate(&payload).await?;

    let book = state
        .book_service
        .create_book(payload.into_new_book()?)
        .await?;

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Returns a book with the IDs of the members currently borrowing it.
///
/// # Endpoint
///
/// `GET /api/books/{id}`
///
/// # Errors
///
/// Returns 404 if the book does not exist.
pub async fn get_book_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<BookResponse>, AppError> {
    let (book, borrowers) = state.book_service.get_book_with_borrowers(id).await?;

    Ok(Json(BookResponse::with_borrowers(book, borrowers)))
}

/// Replaces a book.
///
/// # Endpoint
///
/// `PUT /api/books/{id}`
///
/// # Errors
///
/// Returns 400 if the body fails validation.
/// Returns 404 if the book does not exist.
pub async fn update_book_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookRequest>,
) -> Result<Json<BookResponse>, AppError> {
    state.validator.validate(&payload).await?;

    let book = state
        .book_service
        .update_book(id, payload.into_new_book()?)
        .await?;

    Ok(Json(book.into()))
}

/// Deletes a book, its borrowed-book links and its borrowing records.
///
/// # Endpoint
///
/// `DELETE /api/books/{id}`
pub async fn delete_book_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.book_service.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
