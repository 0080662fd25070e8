//! Repository trait for author data access.

use crate::domain::entities::{Author, NewAuthor};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing authors.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuthorRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Creates a new author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError>;

    /// Finds an author by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError>;

    /// Lists authors ordered by ID.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Author>, AppError>;

    /// Counts all authors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Replaces the author's name and biography.
    ///
    /// Returns `Ok(None)` if no author has this ID.
    async fn update(&self, id: i64, changes: NewAuthor) -> Result<Option<Author>, AppError>;

    /// Deletes an author together with its books.
    ///
    /// Cascades in one transaction: borrowing records and join rows of the
    /// author's books, then the books, then the author.
    ///
    /// Returns `Ok(false)` if no author has this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns whether an author with this ID is stored.
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;
}
