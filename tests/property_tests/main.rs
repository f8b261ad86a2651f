//! Property-based tests for the shared validation and sanitization rules

mod sanitizer;
mod validator_agreement;
