//! How the form controller reaches the relay endpoint

use crate::domain::{ContactRequest, RelayResponse};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Status and decoded body of a relay answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: RelayResponse,
}

impl TransportResponse {
    /// 2xx with `success: true`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.success
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unreadable response body: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::InvalidBody(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Delivers one contact request and reports the relay's answer
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<TransportResponse, TransportError>;
}

/// JSON-over-HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, request: &ContactRequest) -> Result<TransportResponse, TransportError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status().as_u16();
        debug!(status, endpoint = %self.endpoint, "relay responded");

        let body = response.json::<RelayResponse>().await?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn request() -> ContactRequest {
        ContactRequest::new("Jean Dupont", "jean@example.com", "Bonjour, un projet ?")
    }

    #[tokio::test]
    async fn test_posts_json_and_decodes_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/send-email")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({"name": "Jean Dupont"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"message":"Email sent successfully","data":{"id":"abc"}}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(
            format!("{}/api/send-email", server.url()),
            HttpTransport::DEFAULT_TIMEOUT,
        )
        .unwrap();
        let response = transport.submit(&request()).await.unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.body.data.unwrap().id, "abc");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/send-email")
            .with_status(429)
            .with_body(r#"{"success":false,"error":"Too many requests, please try again later"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(
            format!("{}/api/send-email", server.url()),
            HttpTransport::DEFAULT_TIMEOUT,
        )
        .unwrap();
        let response = transport.submit(&request()).await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 429);
        assert_eq!(
            response.body.human_message(),
            Some("Too many requests, please try again later")
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/send-email")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let transport = HttpTransport::new(
            format!("{}/api/send-email", server.url()),
            HttpTransport::DEFAULT_TIMEOUT,
        )
        .unwrap();

        assert!(matches!(
            transport.submit(&request()).await,
            Err(TransportError::InvalidBody(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        let transport =
            HttpTransport::new("http://127.0.0.1:9/api/send-email", Duration::from_secs(2)).unwrap();

        assert!(matches!(
            transport.submit(&request()).await,
            Err(TransportError::Network(_) | TransportError::Timeout)
        ));
    }

    #[test]
    fn test_success_requires_flag_and_status() {
        let ok = TransportResponse {
            status: 200,
            body: RelayResponse::delivered("sent", "id"),
        };
        assert!(ok.is_success());

        let flagged_failure = TransportResponse {
            status: 200,
            body: RelayResponse::failure("nope"),
        };
        assert!(!flagged_failure.is_success());
    }
}
