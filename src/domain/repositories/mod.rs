//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations, including cascade rules
//! - Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//!   and `crate::infrastructure::memory` (in-process)
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AuthorRepository`] - Authors, cascading to their books
//! - [`BookRepository`] - Books and the read-only borrower view
//! - [`MemberRepository`] - Member aggregates: profile and borrowed books
//! - [`BorrowingRecordRepository`] - Borrowing records
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod author_repository;
pub mod book_repository;
pub mod borrowing_record_repository;
pub mod member_repository;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use borrowing_record_repository::BorrowingRecordRepository;
pub use member_repository::MemberRepository;

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use borrowing_record_repository::MockBorrowingRecordRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
