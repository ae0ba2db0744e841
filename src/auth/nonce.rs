//! Nonce generation for Bithumb API authentication.
//!
//! Every signed request carries a single-use nonce. Bithumb rejects a reused
//! nonce with `nonce_used`; it imposes no ordering, so random UUIDs suffice.

use uuid::Uuid;

/// Trait for providing nonces for authenticated requests.
///
/// Each returned value must be unique across all requests made with the
/// same access key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> String;
}

/// A nonce provider that generates random UUIDv4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNonce;

impl UuidNonce {
    /// Create a new UUID nonce provider.
    pub fn new() -> Self {
        Self
    }
}

impl NonceProvider for UuidNonce {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
