//! Repository trait for borrowing record data access.

use crate::domain::entities::{BorrowingRecord, NewBorrowingRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing borrowing records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBorrowingRecordRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowingRecordRepository: Send + Sync {
    /// Creates a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the book or member is not stored.
    async fn create(&self, new_record: NewBorrowingRecord) -> Result<BorrowingRecord, AppError>;

    /// Finds a record by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<BorrowingRecord>, AppError>;

    /// Lists records ordered by ID.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<BorrowingRecord>, AppError>;

    /// Counts all records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Replaces all fields of a record. Returns `Ok(None)` if no record has this ID.
    async fn update(
        &self,
        id: i64,
        changes: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>, AppError>;

    /// Deletes a record. Returns `Ok(false)` if no record has this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
