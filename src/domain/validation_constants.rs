//! Validation constants for contact submissions
//!
//! This module centralizes the limits and patterns of the contact form rule
//! table. Both the form controller and the relay endpoint read them from here.

/// Name field constants
pub mod name {
    /// Minimum name length in characters, after trimming
    pub const MIN_LENGTH: usize = 2;

    /// Maximum name length in characters, after trimming
    pub const MAX_LENGTH: usize = 50;

    /// Letters (including the Latin-1 range `À-ÿ`), space, hyphen, apostrophe
    pub const VALIDATION_PATTERN: &str = r"^[A-Za-zÀ-ÿ '\-]+$";
}

/// Email field constants
pub mod email {
    /// Maximum email length in characters, after trimming
    pub const MAX_LENGTH: usize = 100;

    /// Regex pattern for a `local@domain.tld` address
    pub const VALIDATION_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
}

/// Message field constants
pub mod message {
    /// Minimum message length in characters, after trimming
    pub const MIN_LENGTH: usize = 10;

    /// Maximum message length in characters, after trimming
    pub const MAX_LENGTH: usize = 1000;
}

/// Sanitizer constants
pub mod sanitize {
    /// Maximum length of sanitized output in characters
    pub const MAX_LENGTH: usize = 1000;
}

/// Honeypot constants
pub mod honeypot {
    /// Field name used by the JSON transport
    pub const JSON_FIELD: &str = "honeypot";

    /// Field name used by the native form transport
    pub const FORM_FIELD: &str = "bot-field";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limits() {
        assert_eq!(name::MIN_LENGTH, 2);
        assert_eq!(name::MAX_LENGTH, 50);
        assert_eq!(email::MAX_LENGTH, 100);
        assert_eq!(message::MIN_LENGTH, 10);
        assert_eq!(message::MAX_LENGTH, 1000);
        assert_eq!(sanitize::MAX_LENGTH, message::MAX_LENGTH);
    }

    #[test]
    fn test_patterns_are_anchored() {
        for pattern in [name::VALIDATION_PATTERN, email::VALIDATION_PATTERN] {
            assert!(pattern.starts_with('^'));
            assert!(pattern.ends_with('$'));
        }
    }
}
