//! PostgreSQL implementation of borrowing record repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{BorrowingRecord, NewBorrowingRecord};
use crate::domain::repositories::BorrowingRecordRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct RecordRow {
    id: i64,
    book_id: i64,
    member_id: i64,
    borrow_date: NaiveDate,
    return_date: Option<NaiveDate>,
}

impl From<RecordRow> for BorrowingRecord {
    fn from(r: RecordRow) -> Self {
        BorrowingRecord::new(r.id, r.book_id, r.member_id, r.borrow_date, r.return_date)
    }
}

/// PostgreSQL repository for borrowing records.
pub struct PgBorrowingRecordRepository {
    pool: Arc<PgPool>,
}

impl PgBorrowingRecordRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingRecordRepository for PgBorrowingRecordRepository {
    async fn create(&self, new_record: NewBorrowingRecord) -> Result<BorrowingRecord, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            INSERT INTO borrowing_records (book_id, member_id, borrow_date, return_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, member_id, borrow_date, return_date
            "#,
        )
        .bind(new_record.book_id)
        .bind(new_record.member_id)
        .bind(new_record.borrow_date)
        .bind(new_record.return_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BorrowingRecord>, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, book_id, member_id, borrow_date, return_date
            FROM borrowing_records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BorrowingRecord::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<BorrowingRecord>, AppError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, book_id, member_id, borrow_date, return_date
            FROM borrowing_records
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(BorrowingRecord::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM borrowing_records")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(
        &self,
        id: i64,
        changes: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            UPDATE borrowing_records SET
                book_id     = $2,
                member_id   = $3,
                borrow_date = $4,
                return_date = $5
            WHERE id = $1
            RETURNING id, book_id, member_id, borrow_date, return_date
            "#,
        )
        .bind(id)
        .bind(changes.book_id)
        .bind(changes.member_id)
        .bind(changes.borrow_date)
        .bind(changes.return_date)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BorrowingRecord::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM borrowing_records WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
