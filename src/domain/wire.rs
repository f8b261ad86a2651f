//! Wire format shared by the form controller and the relay endpoint

use serde::{Deserialize, Serialize};

/// Body of a contact request, as sent over either transport
///
/// Every field is optional at this level so that a missing field is reported
/// by the presence check rather than as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
            honeypot: None,
        }
    }

    pub fn with_honeypot(mut self, honeypot: impl Into<String>) -> Self {
        self.honeypot = Some(honeypot.into());
        self
    }
}

/// Provider receipt returned on successful delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

/// Response body of the relay endpoint
///
/// Success carries `message` and usually `data`; failure carries `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DeliveryReceipt>,
}

impl RelayResponse {
    pub fn delivered(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: Some(DeliveryReceipt { id: id.into() }),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            data: None,
        }
    }

    /// The most specific human-readable text in the body
    pub fn human_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}
