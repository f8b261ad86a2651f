//! Type definitions for the relay module

use crate::config::RelaySettings;
use crate::domain::{Field, FieldViolation, Mailbox};
use crate::providers::ProviderError;
use nutype::nutype;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Maximum size of a request body in bytes
#[nutype(
    derive(Clone, Copy, Debug, Display, Deserialize, Serialize, TryFrom, AsRef),
    validate(predicate = |size: &usize| *size > 0)
)]
pub struct BodySizeLimit(usize);

/// Route path the relay is mounted on
#[nutype(
    sanitize(trim),
    validate(not_empty, predicate = |s: &str| s.starts_with('/')),
    derive(Clone, Debug, Display, PartialEq, Eq, AsRef)
)]
pub struct RoutePath(String);

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Route accepting JSON submissions
    pub path: RoutePath,
    /// Route accepting native HTML form submissions
    pub form_path: RoutePath,
    /// Fixed sender of relayed e-mails
    pub sender: Mailbox,
    /// Fixed recipient of relayed e-mails
    pub recipient: Mailbox,
    /// Subject line of relayed e-mails
    pub subject: String,
    /// Upper bound on request bodies
    pub max_body_size: BodySizeLimit,
}

impl RelayConfig {
    pub fn from_settings(settings: &RelaySettings) -> Result<Self, crate::Error> {
        use crate::Error;

        let reserved = crate::relay::headers::paths::HEALTH;
        if settings.path == settings.form_path {
            return Err(Error::invalid_setting(
                "relay.form_path",
                "must differ from relay.path",
            ));
        }
        if settings.path.trim() == reserved || settings.form_path.trim() == reserved {
            return Err(Error::invalid_setting(
                "relay.path",
                format!("{reserved} is reserved for the health check"),
            ));
        }

        Ok(Self {
            path: RoutePath::try_new(settings.path.clone())
                .map_err(|e| Error::invalid_setting("relay.path", e.to_string()))?,
            form_path: RoutePath::try_new(settings.form_path.clone())
                .map_err(|e| Error::invalid_setting("relay.form_path", e.to_string()))?,
            sender: Mailbox::try_new(settings.sender.clone())
                .map_err(|e| Error::invalid_setting("relay.sender", e.to_string()))?,
            recipient: Mailbox::try_new(settings.recipient.clone())
                .map_err(|e| Error::invalid_setting("relay.recipient", e.to_string()))?,
            subject: settings.subject.clone(),
            max_body_size: BodySizeLimit::try_new(settings.max_body_bytes)
                .map_err(|e| Error::invalid_setting("relay.max_body_bytes", e.to_string()))?,
        })
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            path: RoutePath::try_new("/api/send-email".to_string()).expect("default path is valid"),
            form_path: RoutePath::try_new("/contact".to_string()).expect("default path is valid"),
            sender: Mailbox::try_new("Portfolio <noreply@anthony-ip.netlify.app>".to_string())
                .expect("default sender is valid"),
            recipient: Mailbox::try_new("anthonyip.pro8@gmail.com".to_string())
                .expect("default recipient is valid"),
            subject: "Nouveau message de contact - Portfolio".to_string(),
            max_body_size: BodySizeLimit::try_new(16 * 1024).expect("16KB is valid"),
        }
    }
}

/// Request ID for correlating log lines of one request
#[nutype(
    derive(Clone, Copy, Debug, Display, PartialEq, Eq, AsRef),
    validate(predicate = |id: &Uuid| id.get_version_num() == 7)
)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Create a new RequestId with a v7 UUID
    pub fn generate() -> Self {
        Self::try_new(Uuid::now_v7()).expect("now_v7 always yields a version 7 UUID")
    }
}

/// Failures of the relay pipeline, one per short-circuiting step
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unsupported content type")]
    UnsupportedContentType,

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid {field}: {violation}")]
    InvalidField {
        field: Field,
        violation: FieldViolation,
    },

    #[error("Honeypot field was filled in")]
    SpamDetected,

    #[error("E-mail provider API key is not configured")]
    ProviderNotConfigured,

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
