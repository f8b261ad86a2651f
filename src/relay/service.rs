//! Main relay service implementation
//!
//! The `RelayService` owns the relay configuration, the rate limiter and the
//! optional e-mail provider, and exposes them as an Axum router.
//!
//! ```rust,ignore
//! use contact_relay::relay::{RelayConfig, RelayService, RateLimiter};
//!
//! let limiter = Arc::new(RateLimiter::new(5, Duration::from_secs(60)));
//! let service = RelayService::new(RelayConfig::default(), limiter, Some(provider));
//! let router = service.into_router();
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```
//!
//! Both routes share one pipeline. Only the content type and the body
//! decoding differ between the JSON route and the native form route.

use crate::domain::{
    decode_escapes, honeypot_tripped, ClientId, ContactRequest, ContactSubmission, RelayResponse,
};
use crate::domain::validation_constants::honeypot;
use crate::providers::{EmailProvider, OutgoingEmail};
use crate::relay::error_response::messages;
use crate::relay::headers::{content_types, has_content_type, paths, X_REQUEST_ID};
use crate::relay::middleware_stack::RelayMiddlewareStack;
use crate::relay::rate_limiter::{RateDecision, RateLimiter};
use crate::relay::template::render_email;
use crate::relay::types::*;
use crate::relay::client_id;
use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request, State},
    http::{request::Parts, Method},
    response::{IntoResponse, Response},
    routing::{any, get},
    Form, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// How a route's body is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Json,
    Form,
}

impl Transport {
    fn content_type(self) -> &'static str {
        match self {
            Transport::Json => content_types::APPLICATION_JSON,
            Transport::Form => content_types::APPLICATION_FORM_URLENCODED,
        }
    }
}

/// Fields posted by the native HTML form
#[derive(Debug, Deserialize)]
struct FormFields {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
    #[serde(rename = "bot-field")]
    honeypot: Option<String>,
}

impl From<FormFields> for ContactRequest {
    fn from(fields: FormFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            message: fields.message,
            honeypot: fields.honeypot,
        }
    }
}

/// Relay service combining validation, rate limiting and dispatch
pub struct RelayService {
    config: RelayConfig,
    limiter: Arc<RateLimiter>,
    provider: Option<Arc<dyn EmailProvider>>,
}

impl RelayService {
    /// Create a relay service
    ///
    /// A `None` provider is not an error here: requests are still validated
    /// and rejected with a configuration error once they reach dispatch.
    pub fn new(
        config: RelayConfig,
        limiter: Arc<RateLimiter>,
        provider: Option<Arc<dyn EmailProvider>>,
    ) -> Self {
        Self {
            config,
            limiter,
            provider,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn limiter(&self) -> Arc<RateLimiter> {
        Arc::clone(&self.limiter)
    }

    /// Create an Axum router for the relay service with middleware
    pub fn into_router(self) -> Router {
        let json_path = self.config.path.as_ref().to_string();
        let form_path = self.config.form_path.as_ref().to_string();

        let router = Router::new()
            .route(paths::HEALTH, get(health_handler))
            .route(&json_path, any(json_handler))
            .route(&form_path, any(form_handler))
            .with_state(Arc::new(self));

        RelayMiddlewareStack::new().apply_to_router(router)
    }

    /// Steps shared by both routes, up to and including body decoding
    async fn handle(&self, request: Request, transport: Transport) -> RelayResult<RelayResponse> {
        let (parts, body) = request.into_parts();

        if parts.method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        if !has_content_type(&parts.headers, transport.content_type()) {
            return Err(RelayError::UnsupportedContentType);
        }

        let client = client_id::from_headers(&parts.headers);
        if let RateDecision::Limited { retry_after } = self.limiter.check(&client) {
            return Err(RelayError::RateLimited { retry_after });
        }

        let limit = *self.config.max_body_size.as_ref();
        let bytes = to_bytes(body, limit)
            .await
            .map_err(|e| RelayError::MalformedBody(e.to_string()))?;

        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let contact = match transport {
            Transport::Json => serde_json::from_slice::<ContactRequest>(&bytes)
                .map_err(|e| RelayError::MalformedBody(e.to_string()))?,
            Transport::Form => decode_form(parts, bytes.into()).await?,
        };

        self.process(contact, &client, &request_id).await
    }

    /// Run a decoded request through validation, sanitization and dispatch
    pub async fn process(
        &self,
        request: ContactRequest,
        client: &ClientId,
        request_id: &str,
    ) -> RelayResult<RelayResponse> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(decode_escapes)
        };

        let (Some(name), Some(email), Some(message)) = (
            present(&request.name),
            present(&request.email),
            present(&request.message),
        ) else {
            return Err(RelayError::MissingFields);
        };

        let submission = ContactSubmission::parse(&name, &email, &message).map_err(|e| {
            match e.first() {
                Some((field, violation)) => RelayError::InvalidField { field, violation },
                None => RelayError::Internal(e.to_string()),
            }
        })?;

        if honeypot_tripped(request.honeypot.as_deref()) {
            warn!(
                request_id = request_id,
                client_id = %client,
                field = honeypot::JSON_FIELD,
                "honeypot filled in, dropping submission"
            );
            return Err(RelayError::SpamDetected);
        }

        let sanitized = submission.sanitized();

        let Some(provider) = self.provider.as_ref() else {
            error!(
                request_id = request_id,
                "e-mail provider API key is not configured"
            );
            return Err(RelayError::ProviderNotConfigured);
        };

        let email = OutgoingEmail {
            from: self.config.sender.clone(),
            to: vec![self.config.recipient.clone()],
            subject: self.config.subject.clone(),
            html: render_email(&sanitized, Utc::now()),
            reply_to: sanitized.email.clone(),
        };

        let id = provider.send(&email).await.map_err(|e| {
            error!(
                request_id = request_id,
                provider = %provider.id(),
                error = %e,
                "e-mail dispatch failed"
            );
            RelayError::Dispatch(e)
        })?;

        info!(
            request_id = request_id,
            provider = %provider.id(),
            message_id = %id,
            "contact e-mail relayed"
        );

        Ok(RelayResponse::delivered(messages::EMAIL_SENT, id.to_string()))
    }
}

async fn decode_form(parts: Parts, body: Body) -> RelayResult<ContactRequest> {
    let request = Request::from_parts(parts, body);
    let Form(fields) = Form::<FormFields>::from_request(request, &())
        .await
        .map_err(|e| RelayError::MalformedBody(e.body_text()))?;
    Ok(fields.into())
}

fn respond(result: RelayResult<RelayResponse>) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            if !matches!(
                err,
                RelayError::ProviderNotConfigured | RelayError::Dispatch(_)
            ) {
                info!(error = %err, "contact request rejected");
            }
            err.into_response()
        }
    }
}

/// Axum handler for JSON submissions
async fn json_handler(State(relay): State<Arc<RelayService>>, request: Request) -> Response {
    respond(relay.handle(request, Transport::Json).await)
}

/// Axum handler for native form submissions
async fn form_handler(State(relay): State<Arc<RelayService>>, request: Request) -> Response {
    respond(relay.handle(request, Transport::Form).await)
}

/// Health check handler
async fn health_handler() -> &'static str {
    "OK"
}
