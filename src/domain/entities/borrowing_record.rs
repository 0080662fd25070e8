//! Borrowing record entity.

use chrono::NaiveDate;

/// A loan of a book to a member.
///
/// The relation is unidirectional: neither books nor members list their records.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowingRecord {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecord {
    pub fn new(
        id: i64,
        book_id: i64,
        member_id: i64,
        borrow_date: NaiveDate,
        return_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            borrow_date,
            return_date,
        }
    }

    /// Returns true once a return date has been recorded.
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

/// Input data for creating or replacing a borrowing record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowingRecord {
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}
