//! Response wrapper carrying rate limit metadata.

use crate::rate_limit::RateLimitInfo;

/// A successfully decoded response body and the rate limit state reported
/// with it.
///
/// Callers that do not track rate limits project the body out with
/// [`ApiResponse::into_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Decoded response body.
    pub body: T,
    /// Parsed `Remaining-Req` header, `None` if absent or malformed.
    pub rate_limit: Option<RateLimitInfo>,
}

impl<T> ApiResponse<T> {
    /// Create a new response.
    pub fn new(body: T, rate_limit: Option<RateLimitInfo>) -> Self {
        Self { body, rate_limit }
    }

    /// Discard the rate limit metadata.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Split into body and rate limit metadata.
    pub fn into_parts(self) -> (T, Option<RateLimitInfo>) {
        (self.body, self.rate_limit)
    }

    /// Transform the body, keeping the rate limit metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            body: f(self.body),
            rate_limit: self.rate_limit,
        }
    }
}
