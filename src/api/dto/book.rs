//! DTOs for book endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use super::pagination::PaginationParams;
use crate::domain::entities::{Book, NewBook};
use crate::domain::validation::{RequestValidator, ValidatedRequest, Violations};
use crate::error::AppError;

/// Body of `POST /api/books` and `PUT /api/books/{id}`.
///
/// `publicationYear` and `authorId` are optional at the serde level so that a
/// missing value is reported as a field violation instead of a parse failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title must not be blank"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: String,

    #[validate(length(max = 100, message = "Genre must be at most 100 characters"))]
    pub genre: Option<String>,

    pub publication_year: Option<i32>,

    pub author_id: Option<i64>,
}

#[async_trait]
impl ValidatedRequest for BookRequest {
    async fn check(
        &self,
        rules: &RequestValidator,
        violations: &mut Violations,
    ) -> Result<(), AppError> {
        rules
            .publication_year
            .is_valid(self.publication_year, &mut violations.field("publicationYear"));
        rules
            .author_id
            .is_valid(self.author_id, &mut violations.field("authorId"))
            .await?;
        Ok(())
    }
}

impl BookRequest {
    /// Converts a validated request into domain input.
    pub fn into_new_book(self) -> Result<NewBook, AppError> {
        let publication_year = self.publication_year.ok_or_else(|| {
            AppError::invalid_field("publicationYear", "Publication year cannot be null")
        })?;
        let author_id = self
            .author_id
            .ok_or_else(|| AppError::invalid_field("authorId", "Author ID cannot be null"))?;

        Ok(NewBook {
            title: self.title.trim().to_string(),
            genre: self.genre,
            publication_year,
            author_id,
        })
    }
}

/// Query string of `GET /api/books`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde(default, with = "optional_id")]
    pub author_id: Option<i64>,
}

/// Query-string integers arrive as strings once `flatten` is involved.
mod optional_id {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub publication_year: i32,
    pub author_id: i64,

    /// Members currently holding the book. Only present on the detail endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrowed_by: Option<Vec<i64>>,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            genre: b.genre,
            publication_year: b.publication_year,
            author_id: b.author_id,
            borrowed_by: None,
        }
    }
}

impl BookResponse {
    pub fn with_borrowers(book: Book, borrowers: Vec<i64>) -> Self {
        Self {
            borrowed_by: Some(borrowers),
            ..book.into()
        }
    }
}
