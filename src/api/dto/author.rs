//! DTOs for author endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::book::BookResponse;
use super::not_blank;
use crate::domain::entities::{Author, Book, NewAuthor};
use crate::domain::validation::ValidatedRequest;

/// Body of `POST /api/authors` and `PUT /api/authors/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,

    #[validate(length(max = 4000, message = "Biography must be at most 4000 characters"))]
    pub biography: Option<String>,
}

#[async_trait]
impl ValidatedRequest for AuthorRequest {}

impl From<AuthorRequest> for NewAuthor {
    fn from(r: AuthorRequest) -> Self {
        NewAuthor {
            name: r.name.trim().to_string(),
            biography: r.biography,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
    pub biography: Option<String>,

    /// Only present on the detail endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookResponse>>,
}

impl From<Author> for AuthorResponse {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
            biography: a.biography,
            books: None,
        }
    }
}

impl AuthorResponse {
    pub fn with_books(author: Author, books: Vec<Book>) -> Self {
        Self {
            books: Some(books.into_iter().map(BookResponse::from).collect()),
            ..author.into()
        }
    }
}
