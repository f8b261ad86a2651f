//! The contact form rule table
//!
//! Field rules are defined once, as data, and evaluated by the same function
//! on both sides of the wire. The form controller uses them for instant
//! feedback; the relay endpoint uses them as its trust boundary.

use crate::domain::validation_constants::{email, message, name};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(name::VALIDATION_PATTERN).expect("name pattern is a valid regex")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(email::VALIDATION_PATTERN).expect("email pattern is a valid regex")
});

/// A user-editable field of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields, in form order. Focus and error reporting follow this order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// The rule governing this field
    pub fn rule(self) -> &'static FieldRule {
        match self {
            Field::Name => &RULES[0],
            Field::Email => &RULES[1],
            Field::Message => &RULES[2],
        }
    }

    /// Validate a raw value, returning the trimmed value on success
    pub fn check(self, raw: &str) -> Result<String, FieldViolation> {
        self.rule().check(raw)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character-set constraint of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Any,
    PersonName,
    EmailAddress,
}

impl Charset {
    fn matches(self, value: &str) -> bool {
        match self {
            Charset::Any => true,
            Charset::PersonName => NAME_REGEX.is_match(value),
            Charset::EmailAddress => EMAIL_REGEX.is_match(value),
        }
    }
}

/// One row of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub min_chars: usize,
    pub max_chars: usize,
    pub charset: Charset,
}

/// The rule table. Lengths are counted in characters after trimming.
pub const RULES: [FieldRule; 3] = [
    FieldRule {
        field: Field::Name,
        min_chars: name::MIN_LENGTH,
        max_chars: name::MAX_LENGTH,
        charset: Charset::PersonName,
    },
    FieldRule {
        field: Field::Email,
        min_chars: 1,
        max_chars: email::MAX_LENGTH,
        charset: Charset::EmailAddress,
    },
    FieldRule {
        field: Field::Message,
        min_chars: message::MIN_LENGTH,
        max_chars: message::MAX_LENGTH,
        charset: Charset::Any,
    },
];

/// Why a field value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldViolation {
    #[error("is required")]
    Missing,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },

    #[error("must be at most {max} characters")]
    TooLong { max: usize },

    #[error("has an invalid format")]
    InvalidFormat,
}

impl FieldRule {
    pub fn check(&self, raw: &str) -> Result<String, FieldViolation> {
        let value = raw.trim();
        let length = value.chars().count();

        if length == 0 {
            return Err(FieldViolation::Missing);
        }
        if length < self.min_chars {
            return Err(FieldViolation::TooShort {
                min: self.min_chars,
            });
        }
        if length > self.max_chars {
            return Err(FieldViolation::TooLong {
                max: self.max_chars,
            });
        }
        if !self.charset.matches(value) {
            return Err(FieldViolation::InvalidFormat);
        }

        Ok(value.to_string())
    }
}
