//! In-memory outbox provider
//!
//! Records every e-mail instead of delivering it. Used for local development
//! (`email.provider = "outbox"`) and as the dispatch double in tests.

use crate::domain::ProviderMessageId;
use crate::providers::{EmailProvider, OutgoingEmail, ProviderError, ProviderId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Provider that keeps sent e-mails in memory
#[derive(Debug, Clone, Default)]
pub struct OutboxProvider {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl OutboxProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Snapshot of everything sent so far
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl EmailProvider for OutboxProvider {
    fn id(&self) -> ProviderId {
        ProviderId::outbox()
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<ProviderMessageId, ProviderError> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(ProviderError::Unavailable(message));
        }

        let id = Uuid::now_v7().to_string();
        info!(
            message_id = %id,
            subject = %email.subject,
            reply_to = %email.reply_to,
            "e-mail recorded in outbox"
        );
        self.sent.lock().push(email.clone());

        ProviderMessageId::try_new(id)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}
