//! PostgreSQL implementation of author repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Author, NewAuthor};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    biography: Option<String>,
}

impl From<AuthorRow> for Author {
    fn from(r: AuthorRow) -> Self {
        Author::new(r.id, r.name, r.biography)
    }
}

/// PostgreSQL repository for authors.
///
/// Deleting an author runs the whole cascade (records, join rows, books, author)
/// in a single transaction.
pub struct PgAuthorRepository {
    pool: Arc<PgPool>,
}

impl PgAuthorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (name, biography)
            VALUES ($1, $2)
            RETURNING id, name, biography
            "#,
        )
        .bind(new_author.name)
        .bind(new_author.biography)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, biography FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Author>, AppError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, biography
            FROM authors
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, changes: NewAuthor) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors SET
                name      = $2,
                biography = $3
            WHERE id = $1
            RETURNING id, name, biography
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.biography)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM borrowing_records
            WHERE book_id IN (SELECT id FROM books WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM member_borrowed_books
            WHERE book_id IN (SELECT id FROM books WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM books WHERE author_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
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
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM authors WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }
}
