//! Handlers for borrowing record endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::borrowing_record::{BorrowingRecordRequest, BorrowingRecordResponse};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/borrowing-records`
pub async fn list_records_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<ListResponse<BorrowingRecordResponse>>, AppError> {
    let page = params.resolve()?;

    let (records, total) = state
        .borrowing_service
        .list_records(page.offset(), page.limit())
        .await?;

    Ok(Json(ListResponse::new(
        records
            .into_iter()
            .map(BorrowingRecordResponse::from)
            .collect(),
        page,
        total,
    )))
}

/// Records a loan.
///
/// # Endpoint
///
/// `POST /api/borrowing-records`
///
/// # Errors
///
/// Returns 400 if `bookId` or `memberId` is null or unknown, `borrowDate` is
/// missing, or `returnDate` precedes `borrowDate`.
pub async fn create_record_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BorrowingRecordRequest>,
) -> Result<(StatusCode, Json<BorrowingRecordResponse>), AppError> {
    state.validator.validate(&payload).await?;

    let record = state
        .borrowing_service
        .create_record(payload.into_new_record()?)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// `GET /api/borrowing-records/{id}`
pub async fn get_record_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<BorrowingRecordResponse>, AppError> {
    let record = state.borrowing_service.get_record(id).await?;
    Ok(Json(record.into()))
}

/// Replaces a borrowing record, typically to set its return date.
///
/// # Endpoint
///
/// `PUT /api/borrowing-records/{id}`
pub async fn update_record_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BorrowingRecordRequest>,
) -> Result<Json<BorrowingRecordResponse>, AppError> {
    state.validator.validate(&payload).await?;

    let record = state
        .borrowing_service
        .update_record(id, payload.into_new_record()?)
        .await?;

    Ok(Json(record.into()))
}

/// `DELETE /api/borrowing-records/{id}`
pub async fn delete_record_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.borrowing_service.delete_record(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
