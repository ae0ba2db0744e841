//! JWT generation for Bithumb API authentication.
//!
//! Bithumb exchange endpoints authenticate with a bearer token:
//! ```text
//! Authorization: Bearer JWT_HS256({access_key, nonce, timestamp[, query_hash, query_hash_alg]}, secret_key)
//! ```
//!
//! When the request has parameters, `query_hash` is the hex-encoded SHA-512
//! of the URL-encoded query string exactly as it is transmitted. Any
//! difference between the hashed and the sent parameters is rejected by the
//! exchange with `invalid_query_payload`.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::auth::Credentials;
use crate::error::BithumbError;

/// Value of the `query_hash_alg` claim.
pub const QUERY_HASH_ALG: &str = "SHA512";

/// Claims carried in the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The account's access key.
    pub access_key: String,
    /// Single-use nonce.
    pub nonce: String,
    /// Milliseconds since UNIX epoch.
    pub timestamp: i64,
    /// Hex SHA-512 of the URL-encoded query, for requests with parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash: Option<String>,
    /// Always `SHA512` when `query_hash` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash_alg: Option<String>,
}

/// Headers produced for a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `Bearer <token>`
    pub authorization: String,
    /// `application/json` when a query hash was signed.
    pub content_type: Option<&'static str>,
}

/// Hex-encoded SHA-512 digest of a URL-encoded query string.
pub fn query_hash(query: &str) -> String {
    hex::encode(Sha512::digest(query.as_bytes()))
}

/// Sign a request for Bithumb's exchange API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret key
/// * `nonce` - A nonce never used before with this access key
/// * `timestamp_ms` - Current time in milliseconds since UNIX epoch
/// * `query` - The URL-encoded parameters that will be sent, if any
///
/// # Example
///
/// ```rust
/// use bithumb_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("access_key", "secret_key");
/// let headers = sign_request(
///     &credentials,
///     "6d1c2c4e-0f3e-4b3a-9a4f-6e2f0b1f8f10".to_string(),
///     1_700_000_000_000,
///     Some("market=KRW-BTC"),
/// )?;
/// assert!(headers.authorization.starts_with("Bearer "));
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    nonce: String,
    timestamp_ms: i64,
    query: Option<&str>,
) -> Result<AuthHeaders, BithumbError> {
    let query = query.filter(|q| !q.is_empty());

    let claims = Claims {
        access_key: credentials.access_key.clone(),
        nonce,
        timestamp: timestamp_ms,
        query_hash: query.map(query_hash),
        query_hash_alg: query.map(|_| QUERY_HASH_ALG.to_string()),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(credentials.expose_secret()),
    )
    .map_err(|e| BithumbError::Auth(format!("Failed to sign JWT: {e}")))?;

    Ok(AuthHeaders {
        authorization: format!("Bearer {token}"),
        content_type: query.map(|_| "application/json"),
    })
}
