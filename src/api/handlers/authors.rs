//! Handlers for author endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::author::{AuthorRequest, AuthorResponse};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Lists authors page by page.
///
/// # Endpoint
///
/// `GET /api/authors?page=1&pageSize=20`
///
/// # Errors
///
/// Returns 400 if pagination parameters are out of range.
pub async fn list_authors_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ListResponse<AuthorResponse>>, AppError> {
    let page = params.resolve()?;

    let (authors, total) = state
        .author_service
        .list_authors(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(
        authors.into_iter().map(AuthorResponse::from).collect(),
        page,
        total,
    )))
}

/// Creates an author.
///
/// # Endpoint
///
/// `POST /api/authors`
///
/// # Errors
///
/// Returns 400 with a field map if the body fails validation.
pub async fn create_author_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError> {
    state.validator.validate(&payload).await?;

    let author = state.author_service.create_author(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// Returns an author together with its books.
///
/// # Endpoint
///
/// `GET /api/authors/{id}`
///
/// # Errors
///
/// Returns 404 if the author does not exist.
pub async fn get_author_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<AuthorResponse>, AppError> {
    let (author, books) = state.author_service.get_author_with_books(id).await?;

    Ok(Json(AuthorResponse::with_books(author, books)))
}

/// Replaces an author's name and biography.
///
/// # Endpoint
///
/// `PUT /api/authors/{id}`
///
/// # Errors
///
/// Returns 400 if the body fails validation.
/// Returns 404 if the author does not exist.
pub async fn update_author_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthorRequest>,
) -> Result<Json<AuthorResponse>, AppError> {
    state.validator.validate(&payload).await?;

    let author = state
        .author_service
        .update_author(id, payload.into())
        .await?;

    Ok(Json(author.into()))
}

/// Deletes an author and all of its books.
///
/// # Endpoint
///
/// `DELETE /api/authors/{id}`
///
/// Books owned by the author are removed in the same transaction, together with
/// their borrowed-book links and borrowing records.
///
/// # Errors
///
/// Returns 404 if the author does not exist.
pub async fn delete_author_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.author_service.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
