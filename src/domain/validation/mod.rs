//! Request validation: field rules, existence checks and violation aggregation.
//!
//! Validation runs in two passes over a request DTO, both reporting into one
//! [`Violations`] collection:
//!
//! 1. Shape rules declared with `#[derive(Validate)]` (non-blank names, email format,
//!    length limits).
//! 2. Explicit rules from [`ValidatedRequest::check`]: the [`existence`] validators,
//!    which query storage, and the [`format`] validators.
//!
//! Only the first violation reported for a field is kept. The collected map becomes
//! [`AppError::Validation`], rendered as `{ "<field>": "<message>" }` with status 400.

pub mod existence;
pub mod format;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use heck::ToLowerCamelCase;
use validator::{Validate, ValidationErrors};

use crate::domain::clock::Clock;
use crate::domain::repositories::{AuthorRepository, BookRepository, MemberRepository};
use crate::error::AppError;

pub use existence::{AuthorIdValidator, BookIdValidator, MemberIdValidator};
pub use format::{ContactNumberValidator, PublicationYearValidator};

/// Field name to first violation message.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Violations {
    fields: BTreeMap<String, String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a reporting context for one field.
    pub fn field<'a>(&'a mut self, name: &'a str) -> FieldContext<'a> {
        FieldContext {
            field: name,
            violations: self,
        }
    }

    /// Records a violation unless the field already has one.
    pub fn report(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Copies the first error of every field from a `validator` result.
    ///
    /// Field names are converted to lowerCamelCase to match the JSON bodies.
    pub fn absorb(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            let Some(error) = field_errors.first() else {
                continue;
            };
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", error.code));
            self.report(&field.to_lower_camel_case(), message);
        }
    }

    /// `Ok(())` when nothing was reported, otherwise [`AppError::Validation`].
    pub fn into_result(self) -> Result<(), AppError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.fields))
        }
    }
}

/// Violation-reporting context handed to a single rule.
pub struct FieldContext<'a> {
    field: &'a str,
    violations: &'a mut Violations,
}

impl FieldContext<'_> {
    pub fn field(&self) -> &str {
        self.field
    }

    /// Reports a violation for this field. Ignored if one was already reported.
    pub fn report(&mut self, message: impl Into<String>) {
        self.violations.report(self.field, message);
    }
}

/// A request DTO that carries explicit rules on top of its derive rules.
#[async_trait]
pub trait ValidatedRequest: Validate + Sync {
    /// Runs the explicit rules for this request.
    ///
    /// Storage failures abort validation with an error.
    async fn check(
        &self,
        _rules: &RequestValidator,
        _violations: &mut Violations,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

/// Lookup context shared by all request validations.
#[derive(Clone)]
pub struct RequestValidator {
    pub author_id: AuthorIdValidator,
    pub book_id: BookIdValidator,
    pub member_id: MemberIdValidator,
    pub publication_year: PublicationYearValidator,
    pub contact_number: ContactNumberValidator,
}

impl RequestValidator {
    pub fn new(
        authors: Arc<dyn AuthorRepository>,
        books: Arc<dyn BookRepository>,
        members: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            author_id: AuthorIdValidator::new(authors),
            book_id: BookIdValidator::new(books),
            member_id: MemberIdValidator::new(members),
            publication_year: PublicationYearValidator::new(clock),
            contact_number: ContactNumberValidator,
        }
    }

    /// Validates a request, returning [`AppError::Validation`] on any violation.
    pub async fn validate<T: ValidatedRequest>(&self, request: &T) -> Result<(), AppError> {
        let mut violations = Violations::new();

        if let Err(errors) = request.validate() {
            violations.absorb(&errors);
        }
        request.check(self, &mut violations).await?;

        if !violations.is_empty() {
            tracing::debug!(violations = violations.len(), "Request rejected by validation");
        }

        violations.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::repositories::{
        MockAuthorRepository, MockBookRepository, MockMemberRepository,
    };
    use validator::Validate;

    #[derive(Validate)]
    struct NamedRequest {
        #[validate(length(min = 1, message = "Name is required"))]
        display_name: String,
        author_id: Option<i64>,
    }

    #[async_trait]
    impl ValidatedRequest for NamedRequest {
        async fn check(
            &self,
            rules: &RequestValidator,
            violations: &mut Violations,
        ) -> Result<(), AppError> {
            rules
                .author_id
                .is_valid(self.author_id, &mut violations.field("authorId"))
                .await?;
            Ok(())
        }
    }

    fn rules(existing_author: i64) -> RequestValidator {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_exists_by_id()
            .returning(move |id| Ok(id == existing_author));
        RequestValidator::new(
            Arc::new(authors),
            Arc::new(MockBookRepository::new()),
            Arc::new(MockMemberRepository::new()),
            Arc::new(FixedClock(2024)),
        )
    }

    #[test]
    fn test_first_violation_per_field_wins() {
        let mut violations = Violations::new();
        violations.report("email", "Email is required");
        violations.report("email", "Email is malformed");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_field_context_reports_under_its_field() {
        let mut violations = Violations::new();
        {
            let mut ctx = violations.field("phone");
            assert_eq!(ctx.field(), "phone");
            ctx.report("bad");
            ctx.report("worse");
        }
        assert_eq!(violations.get("phone"), Some("bad"));
    }

    #[test]
    fn test_into_result() {
        assert!(Violations::new().into_result().is_ok());

        let mut violations = Violations::new();
        violations.report("title", "Title is required");
        match violations.into_result() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.get("title").map(String::as_str), Some("Title is required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_combines_derive_and_explicit_rules() {
        let request = NamedRequest {
            display_name: String::new(),
            author_id: Some(42),
        };

        let err = rules(1).validate(&request).await.unwrap_err();

        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.get("displayName").map(String::as_str),
            Some("Name is required")
        );
        assert_eq!(
            fields.get("authorId").map(String::as_str),
            Some("Author with the ID 42 does not exist")
        );
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_request() {
        let request = NamedRequest {
            display_name: "Octavia".to_string(),
            author_id: Some(1),
        };

        assert!(rules(1).validate(&request).await.is_ok());
    }
}
