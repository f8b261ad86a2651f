//! Test utilities for relay module testing

use crate::domain::ContactRequest;
use crate::providers::{EmailProvider, OutboxProvider};
use crate::relay::headers::{content_types, CONTENT_TYPE};
use crate::relay::{RateLimiter, RelayConfig, RelayService};
use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;

pub const JSON_PATH: &str = "/api/send-email";
pub const FORM_PATH: &str = "/contact";

/// A submission every validator accepts
pub fn valid_request() -> ContactRequest {
    ContactRequest::new(
        "Jean Dupont",
        "jean@example.com",
        "Bonjour, je souhaite discuter d'un projet.",
    )
}

/// Router backed by an in-memory outbox
pub fn test_router(limit: u32) -> (Router, Arc<OutboxProvider>) {
    let outbox = Arc::new(OutboxProvider::new());
    let provider: Arc<dyn EmailProvider> = outbox.clone();
    (router_with(Some(provider), limit), outbox)
}

pub fn router_with(provider: Option<Arc<dyn EmailProvider>>, limit: u32) -> Router {
    let limiter = Arc::new(RateLimiter::new(limit, Duration::from_secs(60)));
    RelayService::new(RelayConfig::default(), limiter, provider).into_router()
}

pub fn json_post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(JSON_PATH)
        .header(CONTENT_TYPE, content_types::APPLICATION_JSON)
        .header("x-forwarded-for", "203.0.113.7")
        .body(body.into())
        .expect("test request should be valid")
}

pub fn json_submission(request: &ContactRequest) -> Request<Body> {
    json_post(serde_json::to_vec(request).expect("request serializes"))
}

pub fn form_post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(FORM_PATH)
        .header(CONTENT_TYPE, content_types::APPLICATION_FORM_URLENCODED)
        .header("x-forwarded-for", "203.0.113.7")
        .body(Body::from(body))
        .expect("test request should be valid")
}

/// Collect a response body as JSON
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
