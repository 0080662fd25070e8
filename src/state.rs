//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{AuthorService, BookService, BorrowingService, MemberService};
use crate::domain::clock::Clock;
use crate::domain::repositories::{
    AuthorRepository, BookRepository, BorrowingRecordRepository, MemberRepository,
};
use crate::domain::validation::RequestValidator;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::persistence::{
    PgAuthorRepository, PgBookRepository, PgBorrowingRecordRepository, PgMemberRepository,
};

/// One handle per repository contract, all backed by the same storage.
#[derive(Clone)]
pub struct Repositories {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub records: Arc<dyn BorrowingRecordRepository>,
}

impl Repositories {
    /// Repositories over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            authors: store.clone(),
            books: store.clone(),
            members: store.clone(),
            records: store,
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            authors: Arc::new(PgAuthorRepository::new(pool.clone())),
            books: Arc::new(PgBookRepository::new(pool.clone())),
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            records: Arc::new(PgBorrowingRecordRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub author_service: Arc<AuthorService>,
    pub book_service: Arc<BookService>,
    pub member_service: Arc<MemberService>,
    pub borrowing_service: Arc<BorrowingService>,
    pub validator: Arc<RequestValidator>,
    /// Present only for the PostgreSQL backend; used by the health check.
    pub db: Option<Arc<PgPool>>,
}

impl AppState {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        let validator = RequestValidator::new(
            repos.authors.clone(),
            repos.books.clone(),
            repos.members.clone(),
            clock,
        );

        Self {
            author_service: Arc::new(AuthorService::new(repos.authors, repos.books.clone())),
            book_service: Arc::new(BookService::new(repos.books)),
            member_service: Arc::new(MemberService::new(repos.members)),
            borrowing_service: Arc::new(BorrowingService::new(repos.records)),
            validator: Arc::new(validator),
            db: None,
        }
    }

    /// Attaches the pool so the health check can probe the database.
    pub fn with_pool(mut self, pool: Arc<PgPool>) -> Self {
        self.db = Some(pool);
        self
    }
}
