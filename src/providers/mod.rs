//! E-mail delivery provider abstraction
//!
//! The relay treats the provider as an opaque remote dependency: it hands
//! over a rendered [`OutgoingEmail`] and gets back either a message id or a
//! [`ProviderError`]. Any transport or auth failure is a dispatch failure.

pub mod constants;
pub mod outbox;
pub mod resend;

use crate::domain::{Mailbox, ProviderMessageId};
use async_trait::async_trait;
use nutype::nutype;
use serde::Serialize;

pub use outbox::OutboxProvider;
pub use resend::ResendProvider;

/// Provider identifier newtype for type safety
#[nutype(
    sanitize(trim, lowercase),
    validate(not_empty, regex = r"^[a-z][a-z0-9-]*$"),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)
)]
pub struct ProviderId(String);

impl ProviderId {
    pub const RESEND: &'static str = "resend";
    pub const OUTBOX: &'static str = "outbox";

    pub fn resend() -> Self {
        Self::try_new(Self::RESEND.to_string()).expect("RESEND is a valid provider id")
    }

    pub fn outbox() -> Self {
        Self::try_new(Self::OUTBOX.to_string()).expect("OUTBOX is a valid provider id")
    }
}

/// A fully rendered e-mail ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

/// Core trait for transactional e-mail providers
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Provider identifier (resend, outbox, ...)
    fn id(&self) -> ProviderId;

    /// Deliver one e-mail, returning the provider's message id
    async fn send(&self, email: &OutgoingEmail) -> Result<ProviderMessageId, ProviderError>;
}

/// Provider-specific error type
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Provider rejected the e-mail ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Unavailable(err.to_string())
        }
    }
}
