//! Format rules: contact numbers and publication years.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::FieldContext;
use crate::domain::clock::Clock;

/// Optional leading `+` followed by exactly ten ASCII digits.
static CONTACT_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10}$").unwrap());

/// Checks the shape of a phone number.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactNumberValidator;

impl ContactNumberValidator {
    /// Reports and returns false when the number is absent or malformed.
    pub fn is_valid(&self, value: Option<&str>, ctx: &mut FieldContext<'_>) -> bool {
        let Some(number) = value else {
            ctx.report("Contact number cannot be null");
            return false;
        };

        if CONTACT_NUMBER_REGEX.is_match(number) {
            return true;
        }

        ctx.report("Contact number must be 10 digits, optionally prefixed with '+'");
        false
    }
}

/// Bounds a publication year to `[0, current year]`.
///
/// The upper bound is read from the clock on every call.
#[derive(Clone)]
pub struct PublicationYearValidator {
    clock: Arc<dyn Clock>,
}

impl PublicationYearValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Reports and returns false when the year is absent or out of range.
    pub fn is_valid(&self, value: Option<i32>, ctx: &mut FieldContext<'_>) -> bool {
        let Some(year) = value else {
            ctx.report("Publication year cannot be null");
            return false;
        };

        let current_year = self.clock.current_year();
        if (0..=current_year).contains(&year) {
            return true;
        }

        ctx.report(format!(
            "Publication year must be between 0 and {current_year}"
        ));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::validation::Violations;

    fn check_number(value: Option<&str>) -> (bool, Violations) {
        let mut violations = Violations::new();
        let valid = ContactNumberValidator.is_valid(value, &mut violations.field("phone"));
        (valid, violations)
    }

    fn check_year(value: Option<i32>) -> (bool, Violations) {
        let validator = PublicationYearValidator::new(Arc::new(FixedClock(2024)));
        let mut violations = Violations::new();
        let valid = validator.is_valid(value, &mut violations.field("publicationYear"));
        (valid, violations)
    }

    #[test]
    fn test_contact_number_accepts_ten_digits() {
        for number in ["1234567890", "+1234567890", "0000000000"] {
            let (valid, violations) = check_number(Some(number));
            assert!(valid, "{number} should be accepted");
            assert!(violations.is_empty());
        }
    }

    #[test]
    fn test_contact_number_rejects_malformed() {
        for number in [
            "12345",
            "+12345678901",
            "abc1234567",
            "",
            "123 456 7890",
            "++123456789",
            "12345678901",
        ] {
            let (valid, violations) = check_number(Some(number));
            assert!(!valid, "{number} should be rejected");
            assert_eq!(
                violations.get("phone"),
                Some("Contact number must be 10 digits, optionally prefixed with '+'")
            );
        }
    }

    #[test]
    fn test_contact_number_rejects_non_ascii_digits() {
        let (valid, _) = check_number(Some("١٢٣٤٥٦٧٨٩٠"));
        assert!(!valid);
    }

    #[test]
    fn test_contact_number_rejects_absent() {
        let (valid, violations) = check_number(None);
        assert!(!valid);
        assert_eq!(violations.get("phone"), Some("Contact number cannot be null"));
    }

    #[test]
    fn test_publication_year_range() {
        for year in [0, 1, 1865, 2023, 2024] {
            assert!(check_year(Some(year)).0, "{year} should be accepted");
        }

        for year in [-1, -2000, 2025, i32::MAX] {
            let (valid, violations) = check_year(Some(year));
            assert!(!valid, "{year} should be rejected");
            assert_eq!(
                violations.get("publicationYear"),
                Some("Publication year must be between 0 and 2024")
            );
        }
    }

    #[test]
    fn test_publication_year_absent() {
        let (valid, violations) = check_year(None);
        assert!(!valid);
        assert_eq!(
            violations.get("publicationYear"),
            Some("Publication year cannot be null")
        );
    }

    #[test]
    fn test_publication_year_bound_follows_clock() {
        let mut violations = Violations::new();
        let next_year = PublicationYearValidator::new(Arc::new(FixedClock(2025)));
        assert!(next_year.is_valid(Some(2025), &mut violations.field("publicationYear")));
        assert!(violations.is_empty());
    }
}
