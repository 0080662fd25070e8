//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls and turn absent rows into not-found
//! errors. They receive already-validated input; see [`crate::domain::validation`].
//!
//! # Available Services
//!
//! - [`services::author_service::AuthorService`] - Authors and the books they own
//! - [`services::book_service::BookService`] - Book catalogue
//! - [`services::member_service::MemberService`] - Members, profiles, borrowed books
//! - [`services::borrowing_service::BorrowingService`] - Borrowing records

pub mod services;
