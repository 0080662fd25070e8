//! Author management service.

use crate::domain::entities::{Author, Book, NewAuthor};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::error::{AppError, EntityKind};
use std::sync::Arc;

/// Service for managing authors and reading the books they own.
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
    books: Arc<dyn BookRepository>,
}

impl AuthorService {
    /// Creates a new author service.
    pub fn new(authors: Arc<dyn AuthorRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { authors, books }
    }

    /// Creates a new author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    pub async fn create_author(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let author = self.authors.create(new_author).await?;
        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Retrieves an author by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    pub async fn get_author(&self, id: i64) -> Result<Author, AppError> {
        self.authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Author, id))
    }

    /// Retrieves an author together with all of its books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    pub async fn get_author_with_books(&self, id: i64) -> Result<(Author, Vec<Book>), AppError> {
        let author = self.get_author(id).await?;
        let books = self.books.find_by_author(id).await?;
        Ok((author, books))
    }

    /// Lists one page of authors and the total count.
    pub async fn list_authors(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Author>, i64), AppError> {
        let items = self.authors.list(offset, limit).await?;
        let total = self.authors.count().await?;
        Ok((items, total))
    }

    /// Replaces an author's name and biography.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    pub async fn update_author(&self, id: i64, changes: NewAuthor) -> Result<Author, AppError> {
        self.authors
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Author, id))
    }

    /// Deletes an author and, with it, every book the author owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    pub async fn delete_author(&self, id: i64) -> Result<(), AppError> {
        let owned_books = self.books.count(Some(id)).await?;

        if !self.authors.delete(id).await? {
            return Err(AppError::not_found(EntityKind::Author, id));
        }

        tracing::info!(author_id = id, books_removed = owned_books, "Author deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockAuthorRepository, MockBookRepository};
    use mockall::predicate::eq;

    fn author(id: i64) -> Author {
        Author::new(id, "Stanisław Lem".to_string(), Some("Polish writer".to_string()))
    }

    fn service(authors: MockAuthorRepository, books: MockBookRepository) -> AuthorService {
        AuthorService::new(Arc::new(authors), Arc::new(books))
    }

    #[tokio::test]
    async fn test_get_author_not_found() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(authors, MockBookRepository::new())
            .get_author(3)
            .await;

        assert!(matches!(
            result,
            Err(AppError::NotFound {
                kind: EntityKind::Author,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_get_author_with_books() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_id()
            .returning(|id| Ok(Some(author(id))));
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_author()
            .with(eq(1))
            .times(1)
            .returning(|author_id| {
                Ok(vec![Book::new(
                    10,
                    "Solaris".to_string(),
                    Some("Science fiction".to_string()),
                    1961,
                    author_id,
                )])
            });

        let (found, owned) = service(authors, books)
            .get_author_with_books(1)
            .await
            .unwrap();

        assert_eq!(found.id, 1);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].title, "Solaris");
    }

    #[tokio::test]
    async fn test_update_missing_author() {
        let mut authors = MockAuthorRepository::new();
        authors.expect_update().times(1).returning(|_, _| Ok(None));

        let result = service(authors, MockBookRepository::new())
            .update_author(
                8,
                NewAuthor {
                    name: "Nobody".to_string(),
                    biography: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_author_cascades_through_repository() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_delete()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(true));
        let mut books = MockBookRepository::new();
        books
            .expect_count()
            .with(eq(Some(1)))
            .times(1)
            .returning(|_| Ok(2));

        assert!(service(authors, books).delete_author(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_author() {
        let mut authors = MockAuthorRepository::new();
        authors.expect_delete().returning(|_| Ok(false));
        let mut books = MockBookRepository::new();
        books.expect_count().returning(|_| Ok(0));

        let result = service(authors, books).delete_author(5).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_authors_returns_total() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_list()
            .with(eq(0), eq(2))
            .returning(|_, _| Ok(vec![author(1), author(2)]));
        authors.expect_count().returning(|| Ok(5));

        let (items, total) = service(authors, MockBookRepository::new())
            .list_authors(0, 2)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(total, 5);
    }
}
