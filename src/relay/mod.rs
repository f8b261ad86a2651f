//! Relay endpoint for contact submissions
//!
//! Validates, rate-limits, sanitizes and forwards submissions to the
//! configured e-mail provider:
//! - `POST {relay.path}` accepts JSON
//! - `POST {relay.form_path}` accepts a native urlencoded form
//! - `GET /health` answers `OK`

pub mod client_id;
pub mod error_response;
pub mod headers;
pub mod middleware;
pub mod middleware_stack;
pub mod rate_limiter;
pub mod service;
pub mod template;
pub mod types;

#[cfg(test)]
mod test_utils;


pub use rate_limiter::{RateDecision, RateLimiter};
pub use service::RelayService;
pub use types::{RelayConfig, RelayError, RelayResult};
