//! Resend transactional e-mail provider

use crate::domain::{ApiKey, Mailbox, ProviderMessageId};
use crate::providers::constants::{error_messages, resend::EMAILS_PATH};
use crate::providers::{EmailProvider, OutgoingEmail, ProviderError, ProviderId};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Resend HTTP API client
#[derive(Debug, Clone)]
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
}

impl ResendProvider {
    /// Create a provider talking to `base_url` (the production API or a mock)
    pub fn new(api_key: ApiKey, base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), EMAILS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a Mailbox,
    to: &'a [Mailbox],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for SendEmailRequest<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        Self {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            reply_to: &email.reply_to,
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    name: Option<String>,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    fn id(&self) -> ProviderId {
        ProviderId::resend()
    }

    #[instrument(skip(self, email), fields(endpoint = %self.endpoint))]
    async fn send(&self, email: &OutgoingEmail) -> Result<ProviderMessageId, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.as_ref())
            .json(&SendEmailRequest::from(email))
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "provider responded");

        if !status.is_success() {
            let body = response.json::<ErrorResponse>().await.ok();
            let message = body
                .and_then(|b| b.message.or(b.name))
                .unwrap_or_else(|| error_messages::UNKNOWN_PROVIDER_ERROR.to_string());

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::Authentication(message)
                }
                s if s.is_server_error() => ProviderError::Unavailable(message),
                s => ProviderError::Rejected {
                    status: s.as_u16(),
                    message,
                },
            });
        }

        let body = response.json::<SendEmailResponse>().await?;
        body.id
            .and_then(|id| ProviderMessageId::try_new(id).ok())
            .ok_or_else(|| {
                ProviderError::InvalidResponse(error_messages::MISSING_MESSAGE_ID.to_string())
            })
    }
}
