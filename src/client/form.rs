//! Contact form controller
//!
//! Drives one contact form through its submission cycle:
//!
//! ```text
//! Editing -> ValidatingOnSubmit -> Submitting -> Succeeded | Failed
//!    ^              |                                  |
//!    +--------------+----------------------------------+
//! ```
//!
//! Field edits validate after a debounce delay. Submitting validates every
//! field at once, checks the honeypot, sanitizes and hands the request to a
//! [`SubmissionTransport`]. Only one submission may be in flight at a time.
//! `Succeeded` and `Failed` stay observable until the next edit or submit.

use crate::client::debounce::Debouncer;
use crate::client::i18n::{Language, MessageKey};
use crate::client::notification::{Notification, NotificationKind, Notifier};
use crate::client::transport::{SubmissionTransport, TransportError};
use crate::domain::{honeypot_tripped, ContactRequest, ContactSubmission, Field};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Where the form is in its submission cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    ValidatingOnSubmit,
    Submitting,
    Succeeded,
    Failed,
}

/// Current value of a field and its displayed error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidationState {
    pub value: String,
    pub error: Option<String>,
}

/// What a completed submission reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub user_message: String,
    pub provider_message_id: Option<String>,
}

/// Result of calling [`ContactForm::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight
    Ignored,
    /// Stopped before the network; `focus` is the first invalid field
    Rejected { focus: Option<Field> },
    /// The transport was called
    Completed(SubmissionResult),
}

#[derive(Debug, Default)]
struct FormState {
    fields: [FieldValidationState; 3],
    honeypot: String,
    focus: Option<Field>,
    phase: FormPhase,
}

impl FormState {
    fn field_mut(&mut self, field: Field) -> &mut FieldValidationState {
        &mut self.fields[index(field)]
    }

    fn validate(&mut self, field: Field, language: Language) {
        let state = self.field_mut(field);
        state.error = field
            .check(&state.value)
            .err()
            .map(|violation| language.violation(field, violation));
    }

    fn leave_outcome(&mut self) {
        if matches!(self.phase, FormPhase::Succeeded | FormPhase::Failed) {
            self.phase = FormPhase::Editing;
        }
    }
}

fn index(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Email => 1,
        Field::Message => 2,
    }
}

/// Clears the in-flight flag on every exit path
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for one contact form instance
pub struct ContactForm<T: SubmissionTransport> {
    transport: T,
    language: Language,
    state: Arc<Mutex<FormState>>,
    submitting: AtomicBool,
    debouncers: [Debouncer; 3],
    notifier: Notifier,
}

impl<T: SubmissionTransport> ContactForm<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            language: Language::default(),
            state: Arc::new(Mutex::new(FormState::default())),
            submitting: AtomicBool::new(false),
            debouncers: debouncers(DEFAULT_DEBOUNCE),
            notifier: Notifier::default(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncers = debouncers(delay);
        self
    }

    pub fn with_auto_dismiss(mut self, delay: Duration) -> Self {
        self.notifier = Notifier::new(delay);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Update a field and schedule its re-validation
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        {
            let mut state = self.state.lock();
            state.field_mut(field).value = value.into();
            state.leave_outcome();
        }

        let state = Arc::clone(&self.state);
        let language = self.language;
        self.debouncers[index(field)].schedule(async move {
            state.lock().validate(field, language);
        });
    }

    pub fn set_honeypot(&self, value: impl Into<String>) {
        self.state.lock().honeypot = value.into();
    }

    pub fn field(&self, field: Field) -> FieldValidationState {
        self.state.lock().fields[index(field)].clone()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.lock().phase
    }

    /// Field that should hold input focus after a rejected submit
    pub fn focused(&self) -> Option<Field> {
        self.state.lock().focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    pub fn dismiss_notification(&self) {
        self.notifier.dismiss();
    }

    /// Validate, sanitize and send the form
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission already in flight, ignoring submit");
            return SubmitOutcome::Ignored;
        }
        let _guard = SubmittingGuard(&self.submitting);

        for debouncer in &self.debouncers {
            debouncer.cancel();
        }

        let (name, email, message, honeypot) = {
            let mut state = self.state.lock();
            state.phase = FormPhase::ValidatingOnSubmit;
            let [name, email, message] = &state.fields;
            (
                name.value.clone(),
                email.value.clone(),
                message.value.clone(),
                state.honeypot.clone(),
            )
        };

        let submission = match ContactSubmission::parse(&name, &email, &message) {
            Ok(submission) => submission,
            Err(err) => {
                let focus = err.first().map(|(field, _)| field);
                {
                    let mut state = self.state.lock();
                    for field in Field::ALL {
                        state.field_mut(field).error = err
                            .violation_for(field)
                            .map(|violation| self.language.violation(field, violation));
                    }
                    state.focus = focus;
                    state.phase = FormPhase::Editing;
                }
                self.notify_error(MessageKey::ValidationFailed);
                return SubmitOutcome::Rejected { focus };
            }
        };

        if honeypot_tripped(Some(&honeypot)) {
            warn!("honeypot filled in, submission dropped");
            {
                let mut state = self.state.lock();
                state.focus = None;
                state.phase = FormPhase::Editing;
            }
            self.notify_error(MessageKey::ValidationFailed);
            return SubmitOutcome::Rejected { focus: None };
        }

        let sanitized = submission.sanitized();
        let request = ContactRequest::new(sanitized.name, sanitized.email, sanitized.message);

        {
            let mut state = self.state.lock();
            for field in Field::ALL {
                state.field_mut(field).error = None;
            }
            state.focus = None;
            state.phase = FormPhase::Submitting;
        }

        let result = match self.transport.submit(&request).await {
            Ok(response) if response.is_success() => SubmissionResult {
                success: true,
                user_message: self.language.text(MessageKey::SendSucceeded).to_string(),
                provider_message_id: response.body.data.map(|receipt| receipt.id),
            },
            Ok(response) => {
                info!(status = response.status, "relay refused submission");
                SubmissionResult {
                    success: false,
                    user_message: response
                        .body
                        .human_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.language.text(MessageKey::SendFailed).to_string()),
                    provider_message_id: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "submission transport failed");
                let key = match err {
                    TransportError::Timeout => MessageKey::Timeout,
                    TransportError::Network(_) => MessageKey::NetworkError,
                    TransportError::InvalidBody(_) => MessageKey::SendFailed,
                };
                SubmissionResult {
                    success: false,
                    user_message: self.language.text(key).to_string(),
                    provider_message_id: None,
                }
            }
        };

        {
            let mut state = self.state.lock();
            if result.success {
                state.fields = Default::default();
                state.honeypot.clear();
                state.phase = FormPhase::Succeeded;
            } else {
                state.phase = FormPhase::Failed;
            }
        }

        let kind = if result.success {
            NotificationKind::Success
        } else {
            NotificationKind::Error
        };
        self.notifier.show(kind, result.user_message.clone());

        SubmitOutcome::Completed(result)
    }

    fn notify_error(&self, key: MessageKey) {
        self.notifier
            .show(NotificationKind::Error, self.language.text(key));
    }
}

fn debouncers(delay: Duration) -> [Debouncer; 3] {
    [
        Debouncer::new(delay),
        Debouncer::new(delay),
        Debouncer::new(delay),
    ]
}
