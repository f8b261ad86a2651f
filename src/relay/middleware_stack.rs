//! Middleware stack builder for clean composition

use crate::relay::headers::SECURITY_HEADERS;
use crate::relay::middleware::*;
use axum::{
    http::{HeaderName, HeaderValue},
    middleware::from_fn,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Builder for composing the relay middleware stack
#[derive(Clone, Debug)]
pub struct RelayMiddlewareStack {
    security_headers: bool,
}

impl Default for RelayMiddlewareStack {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayMiddlewareStack {
    pub fn new() -> Self {
        Self {
            security_headers: true,
        }
    }

    /// Skip the static security headers
    pub fn without_security_headers(mut self) -> Self {
        self.security_headers = false;
        self
    }

    /// Apply the complete middleware stack to a router
    ///
    /// The middleware are applied in the following order (outer to inner):
    /// 1. Request ID generation/propagation
    /// 2. Logging (with request ID)
    /// 3. Security headers
    /// 4. Panic recovery
    ///
    /// Panics are recovered innermost so the resulting 500 still passes
    /// through the header and logging layers.
    pub fn apply_to_router<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let mut router = router.layer(from_fn(panic_middleware));

        if self.security_headers {
            for (name, value) in SECURITY_HEADERS {
                router = router.layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static(name),
                    HeaderValue::from_static(value),
                ));
            }
        }

        router
            .layer(from_fn(logging_middleware))
            .layer(from_fn(request_id_middleware))
    }
}
