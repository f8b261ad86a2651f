//! Client identification from forwarding headers

use crate::domain::ClientId;
use crate::relay::headers::FORWARDING_HEADERS;
use ::http::HeaderMap;
use tracing::debug;

/// Derive the rate-limit key of a request
///
/// Headers are consulted in [`FORWARDING_HEADERS`] order; for
/// `x-forwarded-for` only the first (client-most) hop counts. Falls back to
/// the [`ClientId::UNKNOWN`] sentinel, which all unidentified callers share.
pub fn from_headers(headers: &HeaderMap) -> ClientId {
    FORWARDING_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .find_map(|candidate| ClientId::try_new(candidate.to_string()).ok())
        .unwrap_or_else(|| {
            debug!("no usable forwarding header, using fallback client id");
            ClientId::unknown()
        })
}
