//! Handlers for member, profile and borrowed-book endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::member::{MemberRequest, MemberResponse, ProfileRequest, ProfileResponse};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::validation::Violations;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/members`
pub async fn list_members_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ListResponse<MemberResponse>>, AppError> {
    let page = params.resolve()?;

    let (members, total) = state
        .member_service
        .list_members(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(
        members.into_iter().map(MemberResponse::from).collect(),
        page,
        total,
    )))
}

/// `POST /api/members`
pub async fn create_member_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), AppError> {
    state.validator.validate(&payload).await?;

    let member = state.member_service.create_member(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// `GET /api/members/{id}`
pub async fn get_member_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.member_service.get_member(id).await?;
    Ok(Json(member.into()))
}

/// `PUT /api/members/{id}`
pub async fn update_member_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    state.validator.validate(&payload).await?;

    let member = state
        .member_service
        .update_member(id, payload.into())
        .await?;

    Ok(Json(member.into()))
}

/// Deletes a member.
///
/// # Endpoint
///
/// `DELETE /api/members/{id}`
///
/// The profile, the borrowed-book links and the member's borrowing records go
/// with it.
pub async fn delete_member_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.member_service.delete_member(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/members/{id}/profile`
///
/// # Errors
///
/// Returns 404 if the member does not exist or has no profile.
pub async fn get_profile_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.member_service.get_profile(id).await?;
    Ok(Json(profile.into()))
}

/// Attaches a profile to a member, replacing any existing one.
///
/// # Endpoint
///
/// `PUT /api/members/{id}/profile`
///
/// The previous profile is removed (orphan removal), so its email can be reused.
///
/// # Errors
///
/// Returns 400 if the email or contact number is invalid.
/// Returns 404 if the member does not exist.
/// Returns 409 if another member's profile already uses the email.
pub async fn put_profile_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    state.validator.validate(&payload).await?;

    let member = state
        .member_service
        .set_profile(id, payload.into_new_profile()?)
        .await?;

    let profile = member
        .profile()
        .cloned()
        .ok_or_else(|| AppError::internal(format!("member {id} has no profile after attach")))?;

    Ok(Json(profile.into()))
}

/// `DELETE /api/members/{id}/profile`
pub async fn delete_profile_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.member_service.clear_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds a book to the member's borrowed set.
///
/// # Endpoint
///
/// `PUT /api/members/{id}/borrowed-books/{bookId}`
///
/// Idempotent: adding a book already in the set returns the unchanged member.
///
/// # Errors
///
/// Returns 400 (`bookId` field) if the book does not exist.
/// Returns 404 if the member does not exist.
pub async fn borrow_book_handler(
    ApiPath((id, book_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<MemberResponse>, AppError> {
    let mut violations = Violations::new();
    state
        .validator
        .book_id
        .is_valid(Some(book_id), &mut violations.field("bookId"))
        .await?;
    violations.into_result()?;

    let member = state.member_service.borrow_book(id, book_id).await?;
    Ok(Json(member.into()))
}

/// Removes a book from the member's borrowed set.
///
/// # Endpoint
///
/// `DELETE /api/members/{id}/borrowed-books/{bookId}`
///
/// # Errors
///
/// Returns 404 if the member does not exist or has not borrowed the book.
pub async fn return_book_handler(
    ApiPath((id, book_id)): ApiPath<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.member_service.return_book(id, book_id).await?;
    Ok(Json(member.into()))
}
