//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgAuthorRepository`] - Authors, with the author → books cascade
//! - [`PgBookRepository`] - Books and borrower lookups
//! - [`PgMemberRepository`] - Member aggregates (profile, borrowed books)
//! - [`PgBorrowingRecordRepository`] - Borrowing records
//!
//! Every cascading delete runs inside one transaction; the schema itself only
//! declares restricting foreign keys.

pub mod pg_author_repository;
pub mod pg_book_repository;
pub mod pg_borrowing_record_repository;
pub mod pg_member_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_book_repository::PgBookRepository;
pub use pg_borrowing_record_repository::PgBorrowingRecordRepository;
pub use pg_member_repository::PgMemberRepository;
