//! Unified error response handling for the relay service
//!
//! Every failure leaves the relay in the same canonical shape,
//! `{ "success": false, "error": "<message>" }`. Messages are fixed per
//! failure category so internal detail never crosses the wire.

use crate::domain::RelayResponse;
use crate::relay::headers::{ALLOW, RETRY_AFTER};
use crate::relay::types::RelayError;
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Caller-facing messages
pub mod messages {
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const UNSUPPORTED_CONTENT_TYPE: &str = "Unsupported content type";
    pub const RATE_LIMITED: &str = "Too many requests, please try again later";
    pub const INVALID_JSON: &str = "Invalid JSON";
    pub const MISSING_FIELDS: &str = "Missing required fields";
    pub const INVALID_DATA: &str = "Invalid data";
    pub const CONFIGURATION_ERROR: &str = "Server configuration error";
    pub const SEND_FAILED: &str = "Failed to send email";
    pub const INTERNAL_ERROR: &str = "Internal server error";
    pub const EMAIL_SENT: &str = "Email sent successfully";
}

/// Extension trait for consistent error formatting
pub trait ErrorResponseExt {
    /// Convert to the canonical failure body
    fn to_error_response(&self) -> RelayResponse;

    /// Get the appropriate HTTP status code
    fn status_code(&self) -> StatusCode;
}

impl ErrorResponseExt for RelayError {
    fn to_error_response(&self) -> RelayResponse {
        use RelayError::*;

        let message = match self {
            MethodNotAllowed => messages::METHOD_NOT_ALLOWED.to_string(),
            UnsupportedContentType => messages::UNSUPPORTED_CONTENT_TYPE.to_string(),
            RateLimited { .. } => messages::RATE_LIMITED.to_string(),
            MalformedBody(_) => messages::INVALID_JSON.to_string(),
            MissingFields => messages::MISSING_FIELDS.to_string(),
            InvalidField { .. } => self.to_string(),
            SpamDetected => messages::INVALID_DATA.to_string(),
            ProviderNotConfigured => messages::CONFIGURATION_ERROR.to_string(),
            Dispatch(_) => messages::SEND_FAILED.to_string(),
            Internal(_) => messages::INTERNAL_ERROR.to_string(),
        };

        RelayResponse::failure(message)
    }

    fn status_code(&self) -> StatusCode {
        use RelayError::*;

        match self {
            MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            UnsupportedContentType
            | MalformedBody(_)
            | MissingFields
            | InvalidField { .. }
            | SpamDetected => StatusCode::BAD_REQUEST,
            RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ProviderNotConfigured | Dispatch(_) | Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self.to_error_response())).into_response();

        match self {
            RelayError::MethodNotAllowed => {
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static("POST"));
            }
            RelayError::RateLimited { retry_after } => {
                // Round up so clients never retry a moment too early
                let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(seconds.max(1)));
            }
            _ => {}
        }

        response
    }
}

/// The generic 500 used when a handler fails outside the pipeline
pub fn internal_error_response() -> Response {
    RelayError::Internal(String::new()).into_response()
}
