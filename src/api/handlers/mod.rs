//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod authors;
pub mod books;
pub mod borrowing_records;
pub mod health;
pub mod members;

pub use authors::{
    create_author_handler, delete_author_handler, get_author_handler, list_authors_handler,
    update_author_handler,
};
pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    update_book_handler,
};
pub use borrowing_records::{
    create_record_handler, delete_record_handler, get_record_handler, list_records_handler,
    update_record_handler,
};
pub use health::health_handler;
pub use members::{
    borrow_book_handler, create_member_handler, delete_member_handler, delete_profile_handler,
    get_member_handler, get_profile_handler, list_members_handler, put_profile_handler,
    return_book_handler, update_member_handler,
};
