//! Contact relay - the contact-form pipeline of a portfolio site
//!
//! Two halves share one validation rule table and one sanitizer:
//! - [`client`]: the submission form controller (field state, debounced
//!   validation, honeypot gate, single in-flight submit, notifications)
//! - [`relay`]: the HTTP endpoint that re-validates, rate-limits, sanitizes
//!   and forwards submissions to a transactional e-mail provider

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod providers;
pub mod relay;

pub use application::Application;
pub use error::{Error, Result};
