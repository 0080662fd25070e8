//! Application error type and its translation into HTTP responses.
//!
//! Every failure surfaced by a handler is an [`AppError`]. The mapping to a
//! status code and JSON body lives in one place ([`IntoResponse`] below):
//!
//! | Kind | Status | Body |
//! |------|--------|------|
//! | [`AppError::NotFound`] | 404 | [`ErrorBody`] with `<ENTITY> NOT FOUND` |
//! | [`AppError::Validation`] | 400 | `{ "<field>": "<first message>" }` |
//! | [`AppError::BadRequest`] | 400 | [`ErrorBody`] with `BAD REQUEST` |
//! | [`AppError::Conflict`] | 409 | [`ErrorBody`] with `CONFLICT` |
//! | [`AppError::Database`] / [`AppError::Internal`] | 500 | [`ErrorBody`], generic message |
//!
//! Internal failures are logged in full but never echoed to the client.
//! Extractor rejections (malformed JSON, path or query) convert into
//! [`AppError`] too, so they share the same shapes.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;
use thiserror::Error;

/// Message returned in place of the raw failure for 500 responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

const PROFILE_EMAIL_CONSTRAINT: &str = "member_profiles_email_key";

/// The stored record kinds that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Book,
    Member,
    MemberProfile,
    BorrowingRecord,
}

impl EntityKind {
    /// Human-readable name used in messages ("Author with the ID 3 ...").
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Book => "Book",
            EntityKind::Member => "Member",
            EntityKind::MemberProfile => "Member profile",
            EntityKind::BorrowingRecord => "Borrowing record",
        }
    }

    /// Category label placed in the `errorResponse` field of 404 bodies.
    pub fn not_found_category(self) -> &'static str {
        match self {
            EntityKind::Author => "AUTHOR NOT FOUND",
            EntityKind::Book => "BOOK NOT FOUND",
            EntityKind::Member => "MEMBER NOT FOUND",
            EntityKind::MemberProfile => "MEMBER PROFILE NOT FOUND",
            EntityKind::BorrowingRecord => "BORROWING RECORD NOT FOUND",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured body of every non-validation error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Local time formatted as `yyyy-MM-dd HH:mm:ss`.
    pub timestamp: String,
    pub status_code: u16,
    pub error_response: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A record looked up during a business operation is absent.
    #[error("{message}")]
    NotFound { kind: EntityKind, message: String },

    /// Field-level violations, first message per field.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    BadRequest(String),

    /// A storage-level constraint rejected the write.
    #[error("{message}")]
    Conflict {
        message: String,
        constraint: Option<String>,
    },

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// `"{Entity} with the ID {id} was not found"`.
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound {
            kind,
            message: format!("{} with the ID {} was not found", kind.label(), id),
        }
    }

    /// The member exists but has no profile attached.
    pub fn profile_not_found(member_id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::MemberProfile,
            message: format!("Member with the ID {member_id} has no profile"),
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(BTreeMap::from([(field.into(), message.into())]))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            constraint: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AppError::NotFound { kind, .. } => kind.not_found_category(),
            AppError::Validation(_) | AppError::BadRequest(_) => "BAD REQUEST",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL SERVER ERROR",
        }
    }

    /// Builds the JSON body for every kind except [`AppError::Validation`].
    pub fn to_error_body(&self) -> ErrorBody {
        let status = self.status_code();
        let message = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        ErrorBody {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status_code: status.as_u16(),
            error_response: self.category().to_string(),
            message,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let constraint = db.constraint().map(str::to_string);

            if db.is_unique_violation() {
                let message = if constraint.as_deref() == Some(PROFILE_EMAIL_CONSTRAINT) {
                    "A member profile with this email already exists".to_string()
                } else {
                    "Unique constraint violation".to_string()
                };
                return AppError::Conflict {
                    message,
                    constraint,
                };
            }

            if db.is_foreign_key_violation() {
                return AppError::Conflict {
                    message: "Referenced record does not exist".to_string(),
                    constraint,
                };
            }
        }

        AppError::Database(e)
    }
}

/// Prefix axum puts before the serde error of a [`JsonRejection::JsonDataError`].
const JSON_DATA_PREFIX: &str = "target type: ";

/// The JSON path of the offending field, e.g. `publicationYear`.
///
/// `None` for errors not tied to one field, such as a missing field or a body
/// of the wrong top-level type.
fn json_error_field(body_text: &str) -> Option<String> {
    let (_, detail) = body_text.split_once(JSON_DATA_PREFIX)?;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(char::is_whitespace)).then(|| path.to_string())
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");

        match rejection {
            JsonRejection::JsonDataError(e) => match json_error_field(&e.body_text()) {
                Some(field) => AppError::invalid_field(field, "Invalid value"),
                None => AppError::bad_request("Request body does not match the expected shape"),
            },
            JsonRejection::JsonSyntaxError(_) => {
                AppError::bad_request("Request body is not valid JSON")
            }
            JsonRejection::MissingJsonContentType(_) => {
                AppError::bad_request("Expected request with `Content-Type: application/json`")
            }
            _ => AppError::bad_request("Failed to read the request body"),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameters");
        AppError::bad_request("Invalid path parameter")
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        AppError::bad_request("Invalid query parameter")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed with an internal error");
        }

        match self {
            AppError::Validation(fields) => (status, Json(fields)).into_response(),
            other => (status, Json(other.to_error_body())).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_json_error_field() {
        assert_eq!(
            json_error_field(
                "Failed to deserialize the JSON body into the target type: publicationYear: invalid type: string \"x\", expected i32 at line 1 column 9"
            )
            .as_deref(),
            Some("publicationYear")
        );
        assert_eq!(
            json_error_field(
                "Failed to deserialize the JSON body into the target type: missing field `title` at line 1 column 2"
            ),
            None
        );
        assert_eq!(
            json_error_field(
                "Failed to deserialize the JSON body into the target type: invalid type: integer `1`, expected struct BookRequest at line 1 column 1"
            ),
            None
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404_with_category() {
        let response = AppError::not_found(EntityKind::Book, 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["errorResponse"], "BOOK NOT FOUND");
        assert_eq!(body["message"], "Book with the ID 42 was not found");
        assert!(body.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_each_kind_has_its_own_category() {
        let cases = [
            (EntityKind::Author, "AUTHOR NOT FOUND"),
            (EntityKind::Member, "MEMBER NOT FOUND"),
            (EntityKind::MemberProfile, "MEMBER PROFILE NOT FOUND"),
            (EntityKind::BorrowingRecord, "BORROWING RECORD NOT FOUND"),
        ];

        for (kind, category) in cases {
            let body = body_json(AppError::not_found(kind, 1).into_response()).await;
            assert_eq!(body["errorResponse"], category);
        }
    }

    #[tokio::test]
    async fn test_validation_maps_to_field_map() {
        let response = AppError::invalid_field("authorId", "Author ID cannot be null").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "authorId": "Author ID cannot be null" }));
    }

    #[tokio::test]
    async fn test_internal_error_does_not_echo_message() {
        let response = AppError::internal("connection refused at 10.0.0.3").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["errorResponse"], "INTERNAL SERVER ERROR");
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let response = AppError::conflict("duplicate").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["errorResponse"], "CONFLICT");
    }

    #[test]
    fn test_timestamp_format() {
        let body = AppError::bad_request("bad").to_error_body();
        assert!(
            chrono::NaiveDateTime::parse_from_str(&body.timestamp, "%Y-%m-%d %H:%M:%S").is_ok()
        );
    }

    #[test]
    fn test_profile_not_found_message() {
        let err = AppError::profile_not_found(9);
        assert_eq!(err.to_string(), "Member with the ID 9 has no profile");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
