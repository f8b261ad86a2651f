//! Domain newtypes shared across the relay and the providers
//!
//! These avoid primitive obsession at the boundaries where strings enter
//! the system from headers, configuration or remote APIs.

use nutype::nutype;
use std::fmt;

/// Identifier a rate-limit window is keyed by
///
/// Derived from forwarding headers. Limited to 100 characters so a hostile
/// header cannot grow the limiter's keys without bound.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, Hash, AsRef, Display)
)]
pub struct ClientId(String);

impl ClientId {
    /// Sentinel used when no forwarding header identifies the client
    pub const UNKNOWN: &'static str = "unknown";

    pub fn unknown() -> Self {
        Self::try_new(Self::UNKNOWN.to_string()).expect("UNKNOWN sentinel is a valid client id")
    }
}

/// Message identifier returned by the e-mail provider
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef, Display)
)]
pub struct ProviderMessageId(String);

/// E-mail provider credential
///
/// Deliberately not `Debug`-derived: the manual impl keeps it out of logs.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Clone, PartialEq, Eq, AsRef, Deserialize)
)]
pub struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A mailbox such as `Portfolio <noreply@example.com>` or `owner@example.com`
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 320, predicate = |s: &str| s.contains('@')),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Display)
)]
pub struct Mailbox(String);
