//! Core domain entities representing the library data model.
//!
//! Entities are plain data structures. Relationships are carried as identifiers:
//!
//! - [`Author`] 1 ── * [`Book`] (`Book::author_id`)
//! - [`Member`] * ── * [`Book`] (`Member::borrowed_book_ids`, owning side)
//! - [`Member`] 1 ── 0..1 [`MemberProfile`] (`MemberProfile::member_id` back-reference)
//! - [`BorrowingRecord`] ──> [`Book`], [`Member`] (unidirectional)
//!
//! # Design Pattern
//!
//! Each entity has a `New*` counterpart carrying the caller-supplied fields used
//! both for creation and for full replacement (PUT).

pub mod author;
pub mod book;
pub mod borrowing_record;
pub mod member;

pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};
pub use borrowing_record::{BorrowingRecord, NewBorrowingRecord};
pub use member::{Member, MemberProfile, NewMember, NewMemberProfile};
