//! Member aggregate service: members, profiles and borrowed books.

use crate::domain::entities::{Member, MemberProfile, NewMember, NewMemberProfile};
use crate::domain::repositories::MemberRepository;
use crate::error::{AppError, EntityKind};
use std::sync::Arc;

/// Service for managing library members.
///
/// Profile changes go through [`Member::set_profile`] so the returned aggregate
/// never holds a stale back-reference; the repository removes orphaned profiles.
pub struct MemberService {
    members: Arc<dyn MemberRepository>,
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// Creates a member without a profile.
    pub async fn create_member(&self, new_member: NewMember) -> Result<Member, AppError> {
        let member = self.members.create(new_member).await?;
        tracing::info!(member_id = member.id, "Member created");
        Ok(member)
    }

    /// Retrieves a member aggregate by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn get_member(&self, id: i64) -> Result<Member, AppError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Member, id))
    }

    /// Lists one page of members and the total count.
    pub async fn list_members(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Member>, i64), AppError> {
        let items = self.members.list(offset, limit).await?;
        let total = self.members.count().await?;
        Ok((items, total))
    }

    /// Renames a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn update_member(&self, id: i64, changes: NewMember) -> Result<Member, AppError> {
        self.members
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Member, id))
    }

    /// Deletes a member with its profile, borrowed-book links and borrowing records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        if !self.members.delete(id).await? {
            return Err(AppError::not_found(EntityKind::Member, id));
        }
        tracing::info!(member_id = id, "Member deleted");
        Ok(())
    }

    /// Returns the member's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] with [`EntityKind::Member`] if the member does not
    /// exist, or with [`EntityKind::MemberProfile`] if it has no profile.
    pub async fn get_profile(&self, member_id: i64) -> Result<MemberProfile, AppError> {
        let member = self.get_member(member_id).await?;
        member
            .profile()
            .cloned()
            .ok_or_else(|| AppError::profile_not_found(member_id))
    }

    /// Attaches a profile to the member, replacing and removing any previous one.
    ///
    /// Returns the updated aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    /// Returns [`AppError::Conflict`] if the email belongs to another member's profile.
    pub async fn set_profile(
        &self,
        member_id: i64,
        profile: NewMemberProfile,
    ) -> Result<Member, AppError> {
        let mut member = self.get_member(member_id).await?;

        let stored = self.members.replace_profile(member_id, profile).await?;
        if let Some(previous) = member.set_profile(Some(stored)) {
            tracing::info!(
                member_id,
                removed_profile_id = previous.id,
                "Member profile replaced"
            );
        } else {
            tracing::info!(member_id, "Member profile attached");
        }

        Ok(member)
    }

    /// Detaches the member's profile and removes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist or has no profile.
    pub async fn clear_profile(&self, member_id: i64) -> Result<Member, AppError> {
        let mut member = self.get_member(member_id).await?;

        if member.profile().is_none() || !self.members.remove_profile(member_id).await? {
            return Err(AppError::profile_not_found(member_id));
        }

        if let Some(previous) = member.set_profile(None) {
            tracing::info!(
                member_id,
                removed_profile_id = previous.id,
                "Member profile removed"
            );
        }

        Ok(member)
    }

    /// Adds a book to the member's borrowed set.
    ///
    /// Adding a book that is already in the set leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn borrow_book(&self, member_id: i64, book_id: i64) -> Result<Member, AppError> {
        let mut member = self.get_member(member_id).await?;

        if self.members.add_borrowed_book(member_id, book_id).await? {
            member.borrow_book(book_id);
            tracing::info!(member_id, book_id, "Book added to borrowed set");
        }

        Ok(member)
    }

    /// Removes a book from the member's borrowed set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist, or with
    /// [`EntityKind::Book`] if the book is not in the member's borrowed set.
    pub async fn return_book(&self, member_id: i64, book_id: i64) -> Result<Member, AppError> {
        let mut member = self.get_member(member_id).await?;

        if !self.members.remove_borrowed_book(member_id, book_id).await? {
            return Err(AppError::NotFound {
                kind: EntityKind::Book,
                message: format!(
                    "Book with the ID {book_id} is not borrowed by the member with the ID {member_id}"
                ),
            });
        }

        member.return_book(book_id);
        tracing::info!(member_id, book_id, "Book removed from borrowed set");
        Ok(member)
    }
}
