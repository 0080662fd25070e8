//! Member aggregate: the member, its profile and its borrowed books.

use chrono::NaiveDate;

/// A library member.
///
/// The member is the owning side of two relations:
///
/// - `profile` (one-to-one, cascade all, orphan removal). Always change it through
///   [`Member::set_profile`], which keeps `MemberProfile::member_id` in sync.
/// - `borrowed_book_ids` (many-to-many through the `member_borrowed_books` join relation).
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    profile: Option<MemberProfile>,
    pub borrowed_book_ids: Vec<i64>,
}

impl Member {
    /// Creates a member without a profile or borrowed books.
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            profile: None,
            borrowed_book_ids: Vec::new(),
        }
    }

    /// Returns the attached profile, if any.
    pub fn profile(&self) -> Option<&MemberProfile> {
        self.profile.as_ref()
    }

    /// Attaches `profile` (or clears it with `None`) and returns the profile that was
    /// attached before.
    ///
    /// The previous profile is detached first: its `member_id` is cleared so it never
    /// points at a member that no longer owns it. A detached profile is an orphan and
    /// must be removed from storage by the caller. The new profile's `member_id` is set
    /// to this member.
    pub fn set_profile(&mut self, profile: Option<MemberProfile>) -> Option<MemberProfile> {
        let detached = self.profile.take().map(|mut old| {
            old.member_id = None;
            old
        });

        self.profile = profile.map(|mut new| {
            new.member_id = Some(self.id);
            new
        });

        detached
    }

    /// Adds a book to the borrowed set. Returns false if it was already there.
    pub fn borrow_book(&mut self, book_id: i64) -> bool {
        if self.borrowed_book_ids.contains(&book_id) {
            return false;
        }
        self.borrowed_book_ids.push(book_id);
        true
    }

    /// Removes a book from the borrowed set. Returns false if it was not there.
    pub fn return_book(&mut self, book_id: i64) -> bool {
        let before = self.borrowed_book_ids.len();
        self.borrowed_book_ids.retain(|id| *id != book_id);
        self.borrowed_book_ids.len() != before
    }
}

/// Contact details owned by exactly one [`Member`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfile {
    pub id: i64,
    /// Back-reference to the owning member. `None` only while detached.
    pub member_id: Option<i64>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl MemberProfile {
    /// Builds a stored profile from its input data.
    pub fn from_new(id: i64, member_id: Option<i64>, data: NewMemberProfile) -> Self {
        Self {
            id,
            member_id,
            email: data.email,
            phone: data.phone,
            address: data.address,
            date_of_birth: data.date_of_birth,
        }
    }

    /// Returns true while the profile is attached to a member.
    pub fn is_attached(&self) -> bool {
        self.member_id.is_some()
    }
}

/// Input data for creating or renaming a member.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
}

/// Input data for attaching a profile to a member.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMemberProfile {
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, email: &str) -> MemberProfile {
        MemberProfile::from_new(
            id,
            None,
            NewMemberProfile {
                email: email.to_string(),
                phone: "+1234567890".to_string(),
                address: None,
                date_of_birth: None,
            },
        )
    }

    #[test]
    fn test_set_profile_sets_back_reference() {
        let mut member = Member::new(7, "Ada".to_string());

        let previous = member.set_profile(Some(profile(1, "ada@example.com")));

        assert!(previous.is_none());
        let attached = member.profile().unwrap();
        assert_eq!(attached.member_id, Some(7));
        assert!(attached.is_attached());
    }

    #[test]
    fn test_replacing_profile_detaches_previous() {
        let mut member = Member::new(7, "Ada".to_string());
        member.set_profile(Some(profile(1, "old@example.com")));

        let previous = member.set_profile(Some(profile(2, "new@example.com")));

        let previous = previous.unwrap();
        assert_eq!(previous.id, 1);
        assert_eq!(previous.member_id, None);
        assert_eq!(member.profile().unwrap().id, 2);
        assert_eq!(member.profile().unwrap().member_id, Some(7));
    }

    #[test]
    fn test_clearing_profile_leaves_no_dangling_link() {
        let mut member = Member::new(7, "Ada".to_string());
        member.set_profile(Some(profile(1, "ada@example.com")));

        let detached = member.set_profile(None).unwrap();

        assert!(member.profile().is_none());
        assert!(!detached.is_attached());
    }

    #[test]
    fn test_clearing_empty_profile_is_noop() {
        let mut member = Member::new(7, "Ada".to_string());
        assert!(member.set_profile(None).is_none());
        assert!(member.profile().is_none());
    }

    #[test]
    fn test_borrow_and_return_book() {
        let mut member = Member::new(1, "Ada".to_string());

        assert!(member.borrow_book(10));
        assert!(!member.borrow_book(10));
        assert_eq!(member.borrowed_book_ids, vec![10]);

        assert!(member.return_book(10));
        assert!(!member.return_book(10));
        assert!(member.borrowed_book_ids.is_empty());
    }
}
