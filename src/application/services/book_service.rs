//! Book catalogue service.

use crate::domain::entities::{Book, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::{AppError, EntityKind};
use std::sync::Arc;

/// Service for managing books.
///
/// Author references are checked by the request validation layer before a
/// [`NewBook`] reaches this service.
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// Creates a new book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the author was removed after validation.
    pub async fn create_book(&self, new_book: NewBook) -> Result<Book, AppError> {
        let book = self.books.create(new_book).await?;
        tracing::info!(book_id = book.id, author_id = book.author_id, "Book created");
        Ok(book)
    }

    /// Retrieves a book by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn get_book(&self, id: i64) -> Result<Book, AppError> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Book, id))
    }

    /// Retrieves a book and the IDs of the members who borrowed it.
    pub async fn get_book_with_borrowers(&self, id: i64) -> Result<(Book, Vec<i64>), AppError> {
        let book = self.get_book(id).await?;
        let borrowers = self.books.borrower_ids(id).await?;
        Ok((book, borrowers))
    }

    /// Lists one page of books and the total count, optionally for one author.
    pub async fn list_books(
        &self,
        offset: i64,
        limit: i64,
        author_id: Option<i64>,
    ) -> Result<(Vec<Book>, i64), AppError> {
        let items = self.books.list(offset, limit, author_id).await?;
        let total = self.books.count(author_id).await?;
        Ok((items, total))
    }

    /// Replaces all mutable fields of a book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn update_book(&self, id: i64, changes: NewBook) -> Result<Book, AppError> {
        self.books
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Book, id))
    }

    /// Deletes a book with its borrowing records and borrowed-book links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        if !self.books.delete(id).await? {
            return Err(AppError::not_found(EntityKind::Book, id));
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBookRepository;
    use mockall::predicate::eq;

    fn book(id: i64) -> Book {
        Book::new(id, "Kindred".to_string(), None, 1979, 2)
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));

        let err = BookService::new(Arc::new(books))
            .get_book(404)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::NotFound {
                kind: EntityKind::Book,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Book with the ID 404 was not found");
    }

    #[tokio::test]
    async fn test_get_book_with_borrowers() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().returning(|id| Ok(Some(book(id))));
        books
            .expect_borrower_ids()
            .with(eq(1))
            .returning(|_| Ok(vec![4, 5]));

        let (found, borrowers) = BookService::new(Arc::new(books))
            .get_book_with_borrowers(1)
            .await
            .unwrap();

        assert_eq!(found.id, 1);
        assert_eq!(borrowers, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_list_books_filtered_by_author() {
        let mut books = MockBookRepository::new();
        books
            .expect_list()
            .with(eq(0), eq(20), eq(Some(2)))
            .returning(|_, _, _| Ok(vec![book(1)]));
        books
            .expect_count()
            .with(eq(Some(2)))
            .returning(|_| Ok(1));

        let (items, total) = BookService::new(Arc::new(books))
            .list_books(0, 20, Some(2))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let mut books = MockBookRepository::new();
        books.expect_delete().returning(|_| Ok(false));

        let result = BookService::new(Arc::new(books)).delete_book(9).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
