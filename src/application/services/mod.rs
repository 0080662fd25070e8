//! Business logic services for the application layer.

pub mod author_service;
pub mod book_service;
pub mod borrowing_service;
pub mod member_service;

pub use author_service::AuthorService;
pub use book_service::BookService;
pub use borrowing_service::BorrowingService;
pub use member_service::MemberService;
