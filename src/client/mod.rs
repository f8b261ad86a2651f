//! Submission form controller
//!
//! UI-agnostic state machine behind the contact form. Rendering is left to
//! the caller; this module owns field state, validation timing, the honeypot
//! gate, the single in-flight submission and notification lifetime.

pub mod debounce;
pub mod form;
pub mod honeypot;
pub mod i18n;
pub mod notification;
pub mod transport;

pub use form::{
    ContactForm, FieldValidationState, FormPhase, SubmissionResult, SubmitOutcome,
    DEFAULT_DEBOUNCE,
};
pub use i18n::{Language, MessageKey};
pub use notification::{Notification, NotificationKind, Notifier};
pub use transport::{HttpTransport, SubmissionTransport, TransportError, TransportResponse};
