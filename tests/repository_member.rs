//! PostgreSQL member repository tests. `#[sqlx::test]` needs `DATABASE_URL`.

use sqlx::PgPool;
use std::sync::Arc;
use library_service::domain::entities::{NewMember, NewMemberProfile};
use library_service::domain::repositories::MemberRepository;
use library_service::error::AppError;
use library_service::infrastructure::persistence::PgMemberRepository;

fn profile(email: &str) -> NewMemberProfile {
    NewMemberProfile {
        email: email.to_string(),
        phone: "+1234567890".to_string(),
        address: None,
        date_of_birth: None,
    }
}

async fn seed_member(repo: &PgMemberRepository, name: &str) -> i64 {
    repo.create(NewMember {
        name: name.to_string(),
    })
    .await
    .unwrap()
    .id
}

#[sqlx::test]
async fn test_find_member_with_profile(pool: PgPool) {
    let repo = PgMemberRepository::new(Arc::new(pool));
    let id = seed_member(&repo, "Ada").await;
    repo.replace_profile(id, profile("ada@example.com"))
        .await
        .unwrap();

    let member = repo.find_by_id(id).await.unwrap().unwrap();

    let attached = member.profile().unwrap();
    assert_eq!(attached.email, "ada@example.com");
    assert_eq!(attached.member_id, Some(id));
}

#[sqlx::test]
async fn test_replace_profile_removes_previous(pool: PgPool) {
    let pool = Arc::new(pool);
    let repo = PgMemberRepository::new(pool.clone());
    let id = seed_member(&repo, "Ada").await;

    let first = repo
        .replace_profile(id, profile("first@example.com"))
        .await
        .unwrap();
    let second = repo
        .replace_profile(id, profile("second@example.com"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member_profiles")
        .fetch_one(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[sqlx::test]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let repo = PgMemberRepository::new(Arc::new(pool));
    let first = seed_member(&repo, "First").await;
    let second = seed_member(&repo, "Second").await;
    repo.replace_profile(first, profile("taken@example.com"))
        .await
        .unwrap();

    let result = repo
        .replace_profile(second, profile("taken@example.com"))
        .await;

    match result {
        Err(AppError::Conflict { message, .. }) => {
            assert_eq!(message, "A member profile with this email already exists")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_replace_profile_for_missing_member(pool: PgPool) {
    let repo = PgMemberRepository::new(Arc::new(pool));

    let result = repo.replace_profile(77, profile("x@example.com")).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_remove_profile(pool: PgPool) {
    let repo = PgMemberRepository::new(Arc::new(pool));
    let id = seed_member(&repo, "Ada").await;
    repo.replace_profile(id, profile("ada@example.com"))
        .await
        .unwrap();

    assert!(repo.remove_profile(id).await.unwrap());
    assert!(!repo.remove_profile(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().unwrap().profile().is_none());
}

#[sqlx::test]
async fn test_delete_member_with_profile(pool: PgPool) {
    let repo = PgMemberRepository::new(Arc::new(pool));
    let id = seed_member(&repo, "Leaving").await;
    repo.replace_profile(id, profile("leaving@example.com"))
        .await
        .unwrap();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.exists_by_id(id).await.unwrap());
}
