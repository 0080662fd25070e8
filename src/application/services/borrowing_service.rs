//! Borrowing record service.

use crate::domain::entities::{BorrowingRecord, NewBorrowingRecord};
use crate::domain::repositories::BorrowingRecordRepository;
use crate::error::{AppError, EntityKind};
use std::sync::Arc;

/// Service for recording loans of books to members.
pub struct BorrowingService {
    records: Arc<dyn BorrowingRecordRepository>,
}

impl BorrowingService {
    /// Creates a new borrowing service.
    pub fn new(records: Arc<dyn BorrowingRecordRepository>) -> Self {
        Self { records }
    }

    /// Records a new loan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the book or member was removed after validation.
    pub async fn create_record(
        &self,
        new_record: NewBorrowingRecord,
    ) -> Result<BorrowingRecord, AppError> {
        let record = self.records.create(new_record).await?;
        tracing::info!(
            record_id = record.id,
            book_id = record.book_id,
            member_id = record.member_id,
            "Borrowing record created"
        );
        Ok(record)
    }

    /// Retrieves a record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    pub async fn get_record(&self, id: i64) -> Result<BorrowingRecord, AppError> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::BorrowingRecord, id))
    }

    /// Lists one page of records and the total count.
    pub async fn list_records(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<BorrowingRecord>, i64), AppError> {
        let items = self.records.list(offset, limit).await?;
        let total = self.records.count().await?;
        Ok((items, total))
    }

    /// Replaces all fields of a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    pub async fn update_record(
        &self,
        id: i64,
        changes: NewBorrowingRecord,
    ) -> Result<BorrowingRecord, AppError> {
        self.records
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::BorrowingRecord, id))
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    pub async fn delete_record(&self, id: i64) -> Result<(), AppError> {
        if !self.records.delete(id).await? {
            return Err(AppError::not_found(EntityKind::BorrowingRecord, id));
        }
        tracing::info!(record_id = id, "Borrowing record deleted");
        Ok(())
    }
}
