//! DTOs for member, profile and borrowed-book endpoints.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{Member, MemberProfile, NewMember, NewMemberProfile};
use crate::domain::validation::{RequestValidator, ValidatedRequest, Violations};
use crate::error::AppError;

/// Body of `POST /api/members` and `PUT /api/members/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,
}

#[async_trait]
impl ValidatedRequest for MemberRequest {}

impl From<MemberRequest> for NewMember {
    fn from(r: MemberRequest) -> Self {
        NewMember {
            name: r.name.trim().to_string(),
        }
    }
}

/// Body of `PUT /api/members/{id}/profile`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[validate(
        required(message = "Email cannot be null"),
        email(message = "Email must be a valid email address")
    )]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
}

#[async_trait]
impl ValidatedRequest for ProfileRequest {
    async fn check(
        &self,
        rules: &RequestValidator,
        violations: &mut Violations,
    ) -> Result<(), AppError> {
        rules
            .contact_number
            .is_valid(self.phone.as_deref(), &mut violations.field("phone"));
        Ok(())
    }
}

impl ProfileRequest {
    /// Converts a validated request into domain input.
    pub fn into_new_profile(self) -> Result<NewMemberProfile, AppError> {
        let email = self
            .email
            .ok_or_else(|| AppError::invalid_field("email", "Email cannot be null"))?;
        let phone = self
            .phone
            .ok_or_else(|| AppError::invalid_field("phone", "Contact number cannot be null"))?;

        Ok(NewMemberProfile {
            email,
            phone,
            address: self.address,
            date_of_birth: self.date_of_birth,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub member_id: Option<i64>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<MemberProfile> for ProfileResponse {
    fn from(p: MemberProfile) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            email: p.email,
            phone: p.phone,
            address: p.address,
            date_of_birth: p.date_of_birth,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub profile: Option<ProfileResponse>,
    pub borrowed_book_ids: Vec<i64>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        let profile = m.profile().cloned().map(ProfileResponse::from);
        Self {
            id: m.id,
            name: m.name,
            profile,
            borrowed_book_ids: m.borrowed_book_ids,
        }
    }
}
