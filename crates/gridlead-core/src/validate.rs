//! Presence and format rules for a [`LeadRecord`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use gridlead_surface::FieldId;

use crate::lead::LeadRecord;

pub const NAME_REQUIRED: &str = "Please enter your full name.";
pub const EMAIL_REQUIRED: &str = "Please enter a work email.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const USECASE_REQUIRED: &str = "Tell us what you want to build on The Grid.";
pub const CONSENT_REQUIRED: &str = "You must allow us to contact you to submit.";

/// Outcome of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<FieldId, &'static str>,
}

impl ValidationResult {
    /// Message for `field`, if it failed.
    #[must_use]
    pub fn error(&self, field: FieldId) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}

/// Apply every rule and report all violations at once.
///
/// `role`, `org` and `timeline` are never checked.
#[must_use]
pub fn validate(record: &LeadRecord) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if record.name.is_empty() {
        errors.insert(FieldId::Name, NAME_REQUIRED);
    }
    if record.email.is_empty() {
        errors.insert(FieldId::Email, EMAIL_REQUIRED);
    } else if !is_plausible_email(&record.email) {
        errors.insert(FieldId::Email, EMAIL_INVALID);
    }
    if record.usecase.is_empty() {
        errors.insert(FieldId::Usecase, USECASE_REQUIRED);
    }
    if !record.consent {
        errors.insert(FieldId::Consent, CONSENT_REQUIRED);
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Shape of an address the form accepts: no whitespace, one `@` with text
/// on both sides, and a dot inside the domain.
#[allow(clippy::expect_used)]
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_SHAPE is a valid pattern")
});

#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
