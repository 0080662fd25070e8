//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde with camelCase field names. Request bodies derive
//! `validator::Validate` for their shape rules and implement
//! [`ValidatedRequest`](crate::domain::validation::ValidatedRequest) for the
//! rules that need storage or the clock.

pub mod author;
pub mod book;
pub mod borrowing_record;
pub mod health;
pub mod member;
pub mod pagination;

use std::borrow::Cow;

use validator::ValidationError;

/// Rejects strings that are empty or only whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
