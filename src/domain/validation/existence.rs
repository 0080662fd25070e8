//! Existence rules for foreign-key fields.
//!
//! A reference is valid only when it is present and resolves to a stored record
//! at validation time. Each check issues one `exists_by_id` query; storage
//! failures are returned as errors rather than reported as violations.

use std::future::Future;
use std::sync::Arc;

use super::FieldContext;
use crate::domain::repositories::{AuthorRepository, BookRepository, MemberRepository};
use crate::error::{AppError, EntityKind};

async fn check_reference<F, Fut>(
    kind: EntityKind,
    value: Option<i64>,
    ctx: &mut FieldContext<'_>,
    exists: F,
) -> Result<bool, AppError>
where
    F: FnOnce(i64) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let Some(id) = value else {
        ctx.report(format!("{} ID cannot be null", kind.label()));
        return Ok(false);
    };

    if exists(id).await? {
        return Ok(true);
    }

    ctx.report(format!("{} with the ID {} does not exist", kind.label(), id));
    Ok(false)
}

/// `authorId` must reference a stored author.
#[derive(Clone)]
pub struct AuthorIdValidator {
    authors: Arc<dyn AuthorRepository>,
}

impl AuthorIdValidator {
    pub fn new(authors: Arc<dyn AuthorRepository>) -> Self {
        Self { authors }
    }

    pub async fn is_valid(
        &self,
        value: Option<i64>,
        ctx: &mut FieldContext<'_>,
    ) -> Result<bool, AppError> {
        check_reference(EntityKind::Author, value, ctx, |id| {
            self.authors.exists_by_id(id)
        })
        .await
    }
}

/// `bookId` must reference a stored book.
#[derive(Clone)]
pub struct BookIdValidator {
    books: Arc<dyn BookRepository>,
}

impl BookIdValidator {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn is_valid(
        &self,
        value: Option<i64>,
        ctx: &mut FieldContext<'_>,
    ) -> Result<bool, AppError> {
        check_reference(EntityKind::Book, value, ctx, |id| self.books.exists_by_id(id)).await
    }
}

/// `memberId` must reference a stored member.
#[derive(Clone)]
pub struct MemberIdValidator {
    members: Arc<dyn MemberRepository>,
}

impl MemberIdValidator {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn is_valid(
        &self,
        value: Option<i64>,
        ctx: &mut FieldContext<'_>,
    ) -> Result<bool, AppError> {
        check_reference(EntityKind::Member, value, ctx, |id| {
            self.members.exists_by_id(id)
        })
        .await
    }
}
