//! PostgreSQL implementation of member repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Member, MemberProfile, NewMember, NewMemberProfile};
use crate::domain::repositories::MemberRepository;
use crate::error::{AppError, EntityKind};

/// Loads the whole aggregate: member, optional profile, borrowed book IDs.
const SELECT_MEMBER: &str = r#"
    SELECT m.id,
           m.name,
           p.id AS profile_id,
           p.email,
           p.phone,
           p.address,
           p.date_of_birth,
           ARRAY(
               SELECT mb.book_id
               FROM member_borrowed_books mb
               WHERE mb.member_id = m.id
               ORDER BY mb.book_id
           ) AS borrowed_book_ids
    FROM members m
    LEFT JOIN member_profiles p ON p.member_id = m.id
"#;

#[derive(FromRow)]
struct MemberRow {
    id: i64,
    name: String,
    profile_id: Option<i64>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    date_of_birth: Option<NaiveDate>,
    borrowed_book_ids: Vec<i64>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        let mut member = Member::new(r.id, r.name);
        member.borrowed_book_ids = r.borrowed_book_ids;

        if let (Some(id), Some(email), Some(phone)) = (r.profile_id, r.email, r.phone) {
            member.set_profile(Some(MemberProfile {
                id,
                member_id: None,
                email,
                phone,
                address: r.address,
                date_of_birth: r.date_of_birth,
            }));
        }

        member
    }
}

#[derive(FromRow)]
struct ProfileRow {
    id: i64,
    member_id: i64,
    email: String,
    phone: String,
    address: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl From<ProfileRow> for MemberProfile {
    fn from(r: ProfileRow) -> Self {
        MemberProfile {
            id: r.id,
            member_id: Some(r.member_id),
            email: r.email,
            phone: r.phone,
            address: r.address,
            date_of_birth: r.date_of_birth,
        }
    }
}

/// PostgreSQL repository for member aggregates.
///
/// Profile replacement and member deletion run in transactions so an orphaned
/// profile is never left behind.
pub struct PgMemberRepository {
    pool: Arc<PgPool>,
}

impl PgMemberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError> {
        let id = sqlx::query_scalar::<_, i64>("INSERT INTO members (name) VALUES ($1) RETURNING id")
            .bind(&new_member.name)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(Member::new(id, new_member.name))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!("{SELECT_MEMBER} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Member::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "{SELECT_MEMBER} ORDER BY m.id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, changes: NewMember) -> Result<Option<Member>, AppError> {
        let result = sqlx::query("UPDATE members SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(changes.name)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM borrowing_records WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM member_borrowed_books WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM member_profiles WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM members WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn replace_profile(
        &self,
        member_id: i64,
        profile: NewMemberProfile,
    ) -> Result<MemberProfile, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM members WHERE id = $1 FOR UPDATE")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Err(AppError::not_found(EntityKind::Member, member_id));
        }

        // Orphan removal: the old profile goes before the new one takes its place.
        sqlx::query("DELETE FROM member_profiles WHERE member_id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO member_profiles (member_id, email, phone, address, date_of_birth)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, member_id, email, phone, address, date_of_birth
            "#,
        )
        .bind(member_id)
        .bind(profile.email)
        .bind(profile.phone)
        .bind(profile.address)
        .bind(profile.date_of_birth)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn remove_profile(&self, member_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM member_profiles WHERE member_id = $1")
            .bind(member_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_borrowed_book(&self, member_id: i64, book_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO member_borrowed_books (member_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_borrowed_book(
        &self,
        member_id: i64,
        book_id: i64,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM member_borrowed_books WHERE member_id = $1 AND book_id = $2")
                .bind(member_id)
                .bind(book_id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
