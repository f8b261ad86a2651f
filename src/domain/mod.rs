//! Domain types and rules for contact submissions
//!
//! Everything here is pure and transport-agnostic. The form controller and
//! the relay endpoint both build on this module, which is what keeps client
//! and server validation in agreement.

pub mod rules;
pub mod sanitize;
pub mod submission;
pub mod types;
pub mod validation_constants;
pub mod wire;

pub use rules::{Field, FieldRule, FieldViolation, RULES};
pub use sanitize::{decode_escapes, sanitize};
pub use submission::{honeypot_tripped, ContactSubmission, SanitizedSubmission, SubmissionError};
pub use types::{ApiKey, ClientId, Mailbox, ProviderMessageId};
pub use wire::{ContactRequest, DeliveryReceipt, RelayResponse};
