//! DTOs for borrowing record endpoints.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{BorrowingRecord, NewBorrowingRecord};
use crate::domain::validation::{RequestValidator, ValidatedRequest, Violations};
use crate::error::AppError;

/// Body of `POST /api/borrowing-records` and `PUT /api/borrowing-records/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecordRequest {
    pub book_id: Option<i64>,

    pub member_id: Option<i64>,

    #[validate(required(message = "Borrow date cannot be null"))]
    pub borrow_date: Option<NaiveDate>,

    pub return_date: Option<NaiveDate>,
}

#[async_trait]
impl ValidatedRequest for BorrowingRecordRequest {
    async fn check(
        &self,
        rules: &RequestValidator,
        violations: &mut Violations,
    ) -> Result<(), AppError> {
        rules
            .book_id
            .is_valid(self.book_id, &mut violations.field("bookId"))
            .await?;
        rules
            .member_id
            .is_valid(self.member_id, &mut violations.field("memberId"))
            .await?;

        if let (Some(borrowed), Some(returned)) = (self.borrow_date, self.return_date)
            && returned < borrowed
        {
            violations.report("returnDate", "Return date cannot be before the borrow date");
        }

        Ok(())
    }
}

impl BorrowingRecordRequest {
    /// Converts a validated request into domain input.
    pub fn into_new_record(self) -> Result<NewBorrowingRecord, AppError> {
        let book_id = self
            .book_id
            .ok_or_else(|| AppError::invalid_field("bookId", "Book ID cannot be null"))?;
        let member_id = self
            .member_id
            .ok_or_else(|| AppError::invalid_field("memberId", "Member ID cannot be null"))?;
        let borrow_date = self
            .borrow_date
            .ok_or_else(|| AppError::invalid_field("borrowDate", "Borrow date cannot be null"))?;

        Ok(NewBorrowingRecord {
            book_id,
            member_id,
            borrow_date,
            return_date: self.return_date,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingRecordResponse {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub returned: bool,
}

impl From<BorrowingRecord> for BorrowingRecordResponse {
    fn from(r: BorrowingRecord) -> Self {
        Self {
            returned: r.is_returned(),
            id: r.id,
            book_id: r.book_id,
            member_id: r.member_id,
            borrow_date: r.borrow_date,
            return_date: r.return_date,
        }
    }
}
