//! PostgreSQL implementation of book repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Book, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    genre: Option<String>,
    publication_year: i32,
    author_id: i64,
}

impl From<BookRow> for Book {
    fn from(r: BookRow) -> Self {
        Book::new(r.id, r.title, r.genre, r.publication_year, r.author_id)
    }
}

/// PostgreSQL repository for books.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, genre, publication_year, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, genre, publication_year, author_id
            "#,
        )
        .bind(new_book.title)
        .bind(new_book.genre)
        .bind(new_book.publication_year)
        .bind(new_book.author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, genre, publication_year, author_id
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        author_id: Option<i64>,
    ) -> Result<Vec<Book>, AppError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, genre, publication_year, author_id
            FROM books
            WHERE ($3::BIGINT IS NULL OR author_id = $3)
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(author_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_author(&self, author_id: i64) -> Result<Vec<Book>, AppError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, genre, publication_year, author_id
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM books WHERE ($1::BIGINT IS NULL OR author_id = $1)",
        )
        .bind(author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, changes: NewBook) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books SET
                title            = $2,
                genre            = $3,
                publication_year = $4,
                author_id        = $5
            WHERE id = $1
            RETURNING id, title, genre, publication_year, author_id
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.genre)
        .bind(changes.publication_year)
        .bind(changes.author_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM borrowing_records WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM member_borrowed_books WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn borrower_ids(&self, book_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT member_id
            FROM member_borrowed_books
            WHERE book_id = $1
            ORDER BY member_id
            "#,
        )
        .bind(book_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }
}
