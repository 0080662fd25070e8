//! PostgreSQL author repository tests. `#[sqlx::test]` needs `DATABASE_URL`.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use library_service::domain::entities::{NewAuthor, NewBook, NewBorrowingRecord, NewMember};
use library_service::domain::repositories::{
    AuthorRepository, BookRepository, BorrowingRecordRepository, MemberRepository,
};
use library_service::infrastructure::persistence::{
    PgAuthorRepository, PgBookRepository, PgBorrowingRecordRepository, PgMemberRepository,
};

fn new_author(name: &str) -> NewAuthor {
    NewAuthor {
        name: name.to_string(),
        biography: None,
    }
}

#[sqlx::test]
async fn test_create_and_find_author(pool: PgPool) {
    let repo = PgAuthorRepository::new(Arc::new(pool));

    let created = repo.create(new_author("Mary Shelley")).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap();

    assert_eq!(found, Some(created));
}

#[sqlx::test]
async fn test_exists_by_id(pool: PgPool) {
    let repo = PgAuthorRepository::new(Arc::new(pool));
    let author = repo.create(new_author("Exists")).await.unwrap();

    assert!(repo.exists_by_id(author.id).await.unwrap());
    assert!(!repo.exists_by_id(author.id + 1000).await.unwrap());
}

#[sqlx::test]
async fn test_update_missing_author_returns_none(pool: PgPool) {
    let repo = PgAuthorRepository::new(Arc::new(pool));

    let result = repo.update(12345, new_author("Ghost")).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_list_and_count(pool: PgPool) {
    let repo = PgAuthorRepository::new(Arc::new(pool));
    for name in ["A", "B", "C"] {
        repo.create(new_author(name)).await.unwrap();
    }

    let page = repo.list(1, 1).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "B");
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[sqlx::test]
async fn test_delete_cascades(pool: PgPool) {
    let pool = Arc::new(pool);
    let authors = PgAuthorRepository::new(pool.clone());
    let books = PgBookRepository::new(pool.clone());
    let members = PgMemberRepository::new(pool.clone());
    let records = PgBorrowingRecordRepository::new(pool.clone());

    let author = authors.create(new_author("Cascade")).await.unwrap();
    let book = books
        .create(NewBook {
            title: "Doomed".to_string(),
            genre: None,
            publication_year: 2000,
            author_id: author.id,
        })
        .await
        .unwrap();
    let member = members
        .create(NewMember {
            name: "Reader".to_string(),
        })
        .await
        .unwrap();
    members.add_borrowed_book(member.id, book.id).await.unwrap();
    records
        .create(NewBorrowingRecord {
            book_id: book.id,
            member_id: member.id,
            borrow_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            return_date: None,
        })
        .await
        .unwrap();

    assert!(authors.delete(author.id).await.unwrap());

    assert!(!books.exists_by_id(book.id).await.unwrap());
    assert_eq!(records.count().await.unwrap(), 0);
    let member = members.find_by_id(member.id).await.unwrap().unwrap();
    assert!(member.borrowed_book_ids.is_empty());
}

#[sqlx::test]
async fn test_delete_missing_author(pool: PgPool) {
    let repo = PgAuthorRepository::new(Arc::new(pool));

    assert!(!repo.delete(999).await.unwrap());
}
