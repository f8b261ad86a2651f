//! Application bootstrap
//!
//! Turns loaded settings into a running relay: provider selection, rate
//! limiter, router and server lifecycle.

pub mod app;

pub use app::Application;
