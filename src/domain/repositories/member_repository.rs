//! Repository trait for the member aggregate.

use crate::domain::entities::{Member, MemberProfile, NewMember, NewMemberProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for members, their profiles and their borrowed books.
///
/// Members are loaded as whole aggregates: profile and borrowed book IDs included.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMemberRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Creates a member without profile or borrowed books.
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError>;

    /// Finds a member aggregate by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, AppError>;

    /// Lists member aggregates ordered by ID.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError>;

    /// Counts all members.
    async fn count(&self) -> Result<i64, AppError>;

    /// Renames a member. Returns `Ok(None)` if no member has this ID.
    async fn update(&self, id: i64, changes: NewMember) -> Result<Option<Member>, AppError>;

    /// Deletes a member with its profile, join rows and borrowing records.
    ///
    /// Returns `Ok(false)` if no member has this ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns whether a member with this ID is stored.
    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Attaches a new profile to the member, removing the previous one.
    ///
    /// The previous profile is an orphan once replaced and is deleted in the
    /// same transaction, which also releases its email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    /// Returns [`AppError::Conflict`] if another member's profile uses the email.
    async fn replace_profile(
        &self,
        member_id: i64,
        profile: NewMemberProfile,
    ) -> Result<MemberProfile, AppError>;

    /// Detaches and deletes the member's profile.
    ///
    /// Returns `Ok(false)` if the member had no profile.
    async fn remove_profile(&self, member_id: i64) -> Result<bool, AppError>;

    /// Adds a book to the member's borrowed set.
    ///
    /// Returns `Ok(false)` if the book was already in the set.
    async fn add_borrowed_book(&self, member_id: i64, book_id: i64) -> Result<bool, AppError>;

    /// Removes a book from the member's borrowed set.
    ///
    /// Returns `Ok(false)` if the book was not in the set.
    async fn remove_borrowed_book(&self, member_id: i64, book_id: i64)
    -> Result<bool, AppError>;
}
