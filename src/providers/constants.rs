//! Constants for provider interactions
//!
//! This module centralizes endpoint paths, content types and error messages
//! used by provider implementations.

/// Resend HTTP API
pub mod resend {
    /// Production API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

    /// Path of the send-email endpoint, relative to the base URL
    pub const EMAILS_PATH: &str = "/emails";
}

/// HTTP-related constants
pub mod http {
    /// Content type constants
    pub mod content_types {
        pub const APPLICATION_JSON: &str = "application/json";
        pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    }
}

/// Error message constants
pub mod error_messages {
    pub const MISSING_MESSAGE_ID: &str = "response did not contain a message id";
    pub const UNKNOWN_PROVIDER_ERROR: &str = "unknown provider error";
}
