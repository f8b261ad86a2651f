//! HTTP header constants and utilities for the relay service
//!
//! This module centralizes header names, well-known paths and the security
//! headers attached to every response.

use ::http::HeaderMap;

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Forwarding headers the client identifier is derived from, in priority order
pub const FORWARDING_HEADERS: [&str; 3] =
    ["x-forwarded-for", "x-real-ip", "x-nf-client-connection-ip"];

/// Standard header re-exports for convenience
pub use ::http::header::{ALLOW, CONTENT_TYPE, RETRY_AFTER};

/// Well-known paths
pub mod paths {
    /// Health check endpoint path
    pub const HEALTH: &str = "/health";
}

/// Security headers set on every response
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=()",
    ),
];

/// Common content types (re-exported from centralized constants)
pub mod content_types {
    pub use crate::providers::constants::http::content_types::*;
}

/// True when the `Content-Type` media type equals `expected`, ignoring parameters
pub fn has_content_type(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(expected))
}
