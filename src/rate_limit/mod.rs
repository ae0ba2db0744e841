//! Rate limit metadata reported by Bithumb.
//!
//! Every exchange response carries a `Remaining-Req` header describing the
//! request group it was counted against and the requests left in the
//! current minute and second:
//!
//! ```text
//! Remaining-Req: group=order; min=59; sec=7
//! ```
//!
//! Parsing is best effort: a missing or malformed header yields `None` and
//! never fails the call.
//!
//! ```rust
//! use bithumb_api_client::rate_limit::{RateLimitInfo, parse_remaining_req};
//!
//! let info = parse_remaining_req("group=market; min=10; sec=1").unwrap();
//! assert_eq!(info, RateLimitInfo::new("market", 10, 1));
//! assert!(parse_remaining_req("garbage").is_none());
//! ```

use reqwest::header::HeaderMap;

/// Name of the rate limit response header.
pub const REMAINING_REQ_HEADER: &str = "Remaining-Req";

/// Remaining request budget for one request group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitInfo {
    /// Request group the call was counted against (e.g. `default`, `order`).
    pub group: String,
    /// Requests left in the current minute.
    pub minute_limit: u32,
    /// Requests left in the current second.
    pub second_limit: u32,
}

impl RateLimitInfo {
    /// Create a new rate limit record.
    pub fn new(group: impl Into<String>, minute_limit: u32, second_limit: u32) -> Self {
        Self {
            group: group.into(),
            minute_limit,
            second_limit,
        }
    }

    /// Extract the record from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REMAINING_REQ_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_remaining_req)
    }

    /// Whether the per-second budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.second_limit == 0 || self.minute_limit == 0
    }
}

/// Parse a `Remaining-Req` header value.
///
/// The first `group=<name>; min=<int>; sec=<int>` occurrence anywhere in the
/// value is used, where `<name>` is lowercase ASCII letters.
pub fn parse_remaining_req(value: &str) -> Option<RateLimitInfo> {
    value
        .match_indices("group=")
        .find_map(|(start, key)| parse_fields(&value[start + key.len()..]))
}

fn parse_fields(s: &str) -> Option<RateLimitInfo> {
    let (group, rest) = split_while(s, |c| c.is_ascii_lowercase());
    if group.is_empty() {
        return None;
    }
    let rest = rest.strip_prefix("; min=")?;
    let (minute, rest) = split_while(rest, |c| c.is_ascii_digit());
    let rest = rest.strip_prefix("; sec=")?;
    let (second, _) = split_while(rest, |c| c.is_ascii_digit());

    Some(RateLimitInfo {
        group: group.to_string(),
        minute_limit: minute.parse().ok()?,
        second_limit: second.parse().ok()?,
    })
}

fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}
