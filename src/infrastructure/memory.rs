//! In-process storage implementing every repository contract.
//!
//! Used when `STORAGE_BACKEND=memory` and by the HTTP integration tests. It keeps
//! the same integrity rules as the PostgreSQL schema: references must resolve,
//! profile emails are unique, and deletes cascade exactly like the transactional
//! sequences in [`crate::infrastructure::persistence`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Author, Book, BorrowingRecord, Member, MemberProfile, NewAuthor, NewBook, NewBorrowingRecord,
    NewMember, NewMemberProfile,
};
use crate::domain::repositories::{
    AuthorRepository, BookRepository, BorrowingRecordRepository, MemberRepository,
};
use crate::error::{AppError, EntityKind};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i64, Author>,
    books: BTreeMap<i64, Book>,
    members: BTreeMap<i64, Member>,
    records: BTreeMap<i64, BorrowingRecord>,
    next_author_id: i64,
    next_book_id: i64,
    next_member_id: i64,
    next_profile_id: i64,
    next_record_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn page<T: Clone>(values: impl Iterator<Item = T>, offset: i64, limit: i64) -> Vec<T> {
    values
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

fn missing_reference() -> AppError {
    AppError::conflict("Referenced record does not exist")
}

impl Tables {
    fn check_book_refs(&self, author_id: i64) -> Result<(), AppError> {
        if self.authors.contains_key(&author_id) {
            Ok(())
        } else {
            Err(missing_reference())
        }
    }

    fn check_record_refs(&self, book_id: i64, member_id: i64) -> Result<(), AppError> {
        if self.books.contains_key(&book_id) && self.members.contains_key(&member_id) {
            Ok(())
        } else {
            Err(missing_reference())
        }
    }

    /// Removes a book and everything that depends on it.
    fn cascade_book(&mut self, book_id: i64) -> bool {
        self.records.retain(|_, r| r.book_id != book_id);
        for member in self.members.values_mut() {
            member.return_book(book_id);
        }
        self.books.remove(&book_id).is_some()
    }
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryStore {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.next_author_id);
        let author = Author::new(id, new_author.name, new_author.biography);
        t.authors.insert(id, author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Author>, AppError> {
        let t = self.tables.read().await;
        Ok(page(t.authors.values().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn update(&self, id: i64, changes: NewAuthor) -> Result<Option<Author>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.authors.get_mut(&id).map(|author| {
            author.name = changes.name;
            author.biography = changes.biography;
            author.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if !t.authors.contains_key(&id) {
            return Ok(false);
        }

        let owned: Vec<i64> = t
            .books
            .values()
            .filter(|b| b.author_id == id)
            .map(|b| b.id)
            .collect();
        for book_id in owned {
            t.cascade_book(book_id);
        }

        t.authors.remove(&id);
        Ok(true)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.read().await.authors.contains_key(&id))
    }
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let mut t = self.tables.write().await;
        t.check_book_refs(new_book.author_id)?;

        let id = next_id(&mut t.next_book_id);
        let book = Book::new(
            id,
            new_book.title,
            new_book.genre,
            new_book.publication_year,
            new_book.author_id,
        );
        t.books.insert(id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        author_id: Option<i64>,
    ) -> Result<Vec<Book>, AppError> {
        let t = self.tables.read().await;
        let matching = t
            .books
            .values()
            .filter(|b| author_id.is_none_or(|a| b.author_id == a))
            .cloned();
        Ok(page(matching, offset, limit))
    }

    async fn find_by_author(&self, author_id: i64) -> Result<Vec<Book>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .books
            .values()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn count(&self, author_id: Option<i64>) -> Result<i64, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .books
            .values()
            .filter(|b| author_id.is_none_or(|a| b.author_id == a))
            .count() as i64)
    }

    async fn update(&self, id: i64, changes: NewBook) -> Result<Option<Book>, AppError> {
        let mut t = self.tables.write().await;
        if !t.books.contains_key(&id) {
            return Ok(None);
        }
        t.check_book_refs(changes.author_id)?;

        Ok(t.books.get_mut(&id).map(|book| {
            book.title = changes.title;
            book.genre = changes.genre;
            book.publication_year = changes.publication_year;
            book.author_id = changes.author_id;
            book.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.cascade_book(id))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.read().await.books.contains_key(&id))
    }

    async fn borrower_ids(&self, book_id: i64) -> Result<Vec<i64>, AppError> {
        let t = self.tables.read().await;
        Ok(t
            .members
            .values()
            .filter(|m| m.borrowed_book_ids.contains(&book_id))
            .map(|m| m.id)
            .collect())
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.next_member_id);
        let member = Member::new(id, new_member.name);
        t.members.insert(id, member.clone());
        Ok(member)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, AppError> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError> {
        let t = self.tables.read().await;
        Ok(page(t.members.values().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.members.len() as i64)
    }

    async fn update(&self, id: i64, changes: NewMember) -> Result<Option<Member>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.members.get_mut(&id).map(|member| {
            member.name = changes.name;
            member.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.members.remove(&id).is_none() {
            return Ok(false);
        }
        t.records.retain(|_, r| r.member_id != id);
        Ok(true)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.read().await.members.contains_key(&id))
    }

    async fn replace_profile(
        &self,
        member_id: i64,
        profile: NewMemberProfile,
    ) -> Result<MemberProfile, AppError> {
        let mut t = self.tables.write().await;
        if !t.members.contains_key(&member_id) {
            return Err(AppError::not_found(EntityKind::Member, member_id));
        }

        let email_taken = t.members.values().any(|m| {
            m.id != member_id && m.profile().is_some_and(|p| p.email == profile.email)
        });
        if email_taken {
            return Err(AppError::Conflict {
                message: "A member profile with this email already exists".to_string(),
                constraint: Some("member_profiles_email_key".to_string()),
            });
        }

        let id = next_id(&mut t.next_profile_id);
        let Some(member) = t.members.get_mut(&member_id) else {
            return Err(AppError::not_found(EntityKind::Member, member_id));
        };
        // The detached profile is dropped here: orphan removal.
        member.set_profile(Some(MemberProfile::from_new(id, None, profile)));

        member
            .profile()
            .cloned()
            .ok_or_else(|| AppError::internal("profile missing right after attach"))
    }

    async fn remove_profile(&self, member_id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.members
            .get_mut(&member_id)
            .and_then(|member| member.set_profile(None))
            .is_some())
    }

    async fn add_borrowed_book(&self, member_id: i64, book_id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if !t.books.contains_key(&book_id) {
            return Err(missing_reference());
        }
        match t.members.get_mut(&member_id) {
            Some(member) => Ok(member.borrow_book(book_id)),
            None => Err(missing_reference()),
        }
    }

    async fn remove_borrowed_book(
        &self,
        member_id: i64,
        book_id: i64,
    ) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.members
            .get_mut(&member_id)
            .is_some_and(|member| member.return_book(book_id)))
    }
}

#[async_trait]
impl BorrowingRecordRepository for InMemoryStore {
    async fn create(&self, new_record: NewBorrowingRecord) -> Result<BorrowingRecord, AppError> {
        let mut t = self.tables.write().await;
        t.check_record_refs(new_record.book_id, new_record.member_id)?;

        let id = next_id(&mut t.next_record_id);
        let record = BorrowingRecord::new(
            id,
            new_record.book_id,
            new_record.member_id,
            new_record.borrow_date,
            new_record.return_date,
        );
        t.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BorrowingRecord>, AppError> {
        Ok(self.tables.read().await.records.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<BorrowingRecord>, AppError> {
        let t = self.tables.read().await;
        Ok(page(t.records.values().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.records.len() as i64)
    }

    async fn update(
        &self,
        id: i64,
        changes: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>, AppError> {
        let mut t = self.tables.write().await;
        if !t.records.contains_key(&id) {
            return Ok(None);
        }
        t.check_record_refs(changes.book_id, changes.member_id)?;

        Ok(t.records.get_mut(&id).map(|record| {
            record.book_id = changes.book_id;
            record.member_id = changes.member_id;
            record.borrow_date = changes.borrow_date;
            record.return_date = changes.return_date;
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.records.remove(&id).is_some())
    }
}
