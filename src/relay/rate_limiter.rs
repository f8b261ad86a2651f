//! Per-client fixed-window rate limiting
//!
//! State lives in process memory only. Behind several instances each process
//! limits independently, so the effective global limit is `instances × max`.
//! Replacing the map with a shared TTL store is the upgrade path if that ever
//! matters.

use crate::config::RateLimitSettings;
use crate::domain::ClientId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Window state of one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at: Instant,
}

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

/// In-memory rate limiter keyed by [`ClientId`]
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<ClientId, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(settings.max_requests, settings.window())
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count a request from `client` against its current window
    pub fn check(&self, client: &ClientId) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&self, client: &ClientId, now: Instant) -> RateDecision {
        let mut entries = self.entries.lock();

        match entries.get_mut(client) {
            Some(entry) if now < entry.window_reset_at => {
                if entry.count >= self.max_requests {
                    let retry_after = entry.window_reset_at - now;
                    warn!(client_id = %client, count = entry.count, "rate limit exceeded");
                    return RateDecision::Limited { retry_after };
                }
                entry.count += 1;
                RateDecision::Allowed {
                    remaining: self.max_requests - entry.count,
                }
            }
            _ => {
                // New client, or its window expired: start a fresh window
                entries.insert(
                    client.clone(),
                    RateLimitEntry {
                        count: 1,
                        window_reset_at: now + self.window,
                    },
                );
                RateDecision::Allowed {
                    remaining: self.max_requests.saturating_sub(1),
                }
            }
        }
    }

    /// Current entry of `client`, if any
    pub fn entry(&self, client: &ClientId) -> Option<RateLimitEntry> {
        self.entries.lock().get(client).copied()
    }

    /// Drop every entry whose window has expired, returning how many were removed
    pub fn prune_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.window_reset_at);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prune expired entries once per window in a background task
    pub fn spawn_pruner(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(limiter.window);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = limiter.prune_at(Instant::now());
                if removed > 0 {
                    debug!(removed, remaining = limiter.len(), "pruned expired rate-limit entries");
                }
            }
        })
    }
}
