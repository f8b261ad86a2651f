//! Validated contact submissions
//!
//! A [`ContactSubmission`] can only be built through the rule table, so
//! holding one proves every field passed validation.

use crate::domain::rules::{Field, FieldViolation};
use crate::domain::sanitize::sanitize;
use nutype::nutype;
use thiserror::Error;

/// Display name of the person writing in
#[nutype(
    sanitize(trim),
    validate(predicate = |s: &str| Field::Name.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Display)
)]
pub struct ContactName(String);

/// Reply address of the person writing in
#[nutype(
    sanitize(trim),
    validate(predicate = |s: &str| Field::Email.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Display)
)]
pub struct ContactEmail(String);

/// Free-text message body
#[nutype(
    sanitize(trim),
    validate(predicate = |s: &str| Field::Message.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Display)
)]
pub struct ContactMessage(String);

/// Every field that failed validation, in form order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid submission: {}", describe(.violations))]
pub struct SubmissionError {
    pub violations: Vec<(Field, FieldViolation)>,
}

fn describe(violations: &[(Field, FieldViolation)]) -> String {
    violations
        .iter()
        .map(|(field, violation)| format!("{field} {violation}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl SubmissionError {
    /// The first failing field, which is where focus goes
    pub fn first(&self) -> Option<(Field, FieldViolation)> {
        self.violations.first().copied()
    }

    pub fn violation_for(&self, field: Field) -> Option<FieldViolation> {
        self.violations
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
    }
}

/// A contact submission whose fields all satisfy the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

impl ContactSubmission {
    /// Validate all three fields, collecting every violation
    pub fn parse(name: &str, email: &str, message: &str) -> Result<Self, SubmissionError> {
        let mut violations = Vec::new();
        let mut check = |field: Field, raw: &str| match field.check(raw) {
            Ok(value) => Some(value),
            Err(violation) => {
                violations.push((field, violation));
                None
            }
        };

        let name = check(Field::Name, name);
        let email = check(Field::Email, email);
        let message = check(Field::Message, message);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name: ContactName::try_new(name).map_err(|_| single(Field::Name))?,
                email: ContactEmail::try_new(email).map_err(|_| single(Field::Email))?,
                message: ContactMessage::try_new(message).map_err(|_| single(Field::Message))?,
            }),
            _ => Err(SubmissionError { violations }),
        }
    }

    /// HTML-safe copies of the three fields
    pub fn sanitized(&self) -> SanitizedSubmission {
        SanitizedSubmission {
            name: sanitize(self.name.as_ref()),
            email: sanitize(self.email.as_ref()),
            message: sanitize(self.message.as_ref()),
        }
    }
}

fn single(field: Field) -> SubmissionError {
    SubmissionError {
        violations: vec![(field, FieldViolation::InvalidFormat)],
    }
}

/// Field values after [`sanitize`], ready for HTML interpolation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// True when the honeypot carries anything but whitespace
pub fn honeypot_tripped(honeypot: Option<&str>) -> bool {
    honeypot.is_some_and(|value| !value.trim().is_empty())
}
