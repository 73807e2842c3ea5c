//! Rate limit snapshot and header parsing.
//!
//! The API reports quota usage through four `X-Ratelimit-*` headers on most
//! responses. Parsing is best-effort: a missing or malformed header never
//! fails a call, it just leaves the corresponding field at its default.

use http::HeaderMap;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Maximum number of requests allowed in the current window.
pub const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
/// Requests remaining in the current window.
pub const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
/// Requests already made in the current window.
pub const HEADER_RATE_USED: &str = "x-ratelimit-used";
/// When the current window resets, in UTC epoch seconds.
pub const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

/// Point-in-time quota counters.
///
/// Counters default to `0` and `reset` to `None` when the information was
/// not available.
///
/// # Examples
///
/// ```
/// use tempmail::Rate;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-ratelimit-limit", "1000".parse().unwrap());
/// headers.insert("x-ratelimit-used", "100".parse().unwrap());
///
/// let rate = Rate::from_headers(&headers);
/// assert_eq!(rate.limit, 1000);
/// assert_eq!(rate.used, 100);
/// assert_eq!(rate.remaining, 0);
/// assert!(rate.reset.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    /// Maximum number of requests that can be made per window.
    pub limit: u64,

    /// Number of requests made in the current window.
    pub used: u64,

    /// Number of requests remaining in the current window.
    pub remaining: u64,

    /// When the current window resets.
    pub reset: Option<SystemTime>,
}

impl Rate {
    /// Extracts the rate limit snapshot from response headers.
    ///
    /// Each field is parsed independently; absent or non-numeric values fall
    /// back to the default. A reset value of `0` is treated as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_counter(headers, HEADER_RATE_LIMIT),
            used: parse_counter(headers, HEADER_RATE_USED),
            remaining: parse_counter(headers, HEADER_RATE_REMAINING),
            reset: parse_reset(headers),
        }
    }
}

/// Body of `GET /v1/rate_limit`. Missing and `null` fields read as zero.
#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitPayload {
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    used: Option<u64>,
    #[serde(default)]
    remaining: Option<u64>,
    #[serde(default)]
    reset: Option<u64>,
}

impl From<RateLimitPayload> for Rate {
    fn from(payload: RateLimitPayload) -> Self {
        Self {
            limit: payload.limit.unwrap_or_default(),
            used: payload.used.unwrap_or_default(),
            remaining: payload.remaining.unwrap_or_default(),
            reset: from_epoch_secs(payload.reset.unwrap_or_default()),
        }
    }
}

fn parse_counter(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn parse_reset(headers: &HeaderMap) -> Option<SystemTime> {
    let value = headers.get(HEADER_RATE_RESET)?.to_str().ok()?;
    from_epoch_secs(value.parse().ok()?)
}

// Zero means "not reported", not 1970-01-01.
fn from_epoch_secs(secs: u64) -> Option<SystemTime> {
    if secs == 0 {
        return None;
    }
    UNIX_EPOCH.checked_add(Duration::from_secs(secs))
}
