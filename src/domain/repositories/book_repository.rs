//! Repository trait for book data access.

use crate::domain::entities::{Book, NewBook};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing books.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Creates a new book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `author_id` does not reference a stored author.
    /// Returns [`AppError::Database`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a book by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Lists books ordered by ID, optionally restricted to one author.
    async fn list(
        &self,
        offset: i64,
        limit: i64,
        author_id: Option<i64>,
    ) -> Result<Vec<Book>, AppError>;

    /// All books written by an author, ordered by ID.
    async fn find_by_author(&self, author_id: i64) -> Result<Vec<Book>, AppError>;

    /// Counts books, optionally restricted to one author.
    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError>;

    /// Replaces all mutable fields of a book.
    ///
    /// Returns `Ok(None)` if no book has this ID.
    async fn update(&self, id: i64, changes: NewBook) -> Result<Option<Book>, AppError>;

    /// Deletes a book, its join rows and the borrowing records referencing it.
    ///
    /// Returns `Ok(false)` if no book has this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns whether a book with this ID is stored.
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// IDs of the members whose borrowed set contains this book.
    ///
    /// Read-only view of the many-to-many relation owned by members.
    async fn borrower_ids(&self, book_id: i64) -> Result<Vec<i64>, AppError>;
}
