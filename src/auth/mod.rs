//! Authentication module for the Bithumb API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - JWT (HS256) token generation with SHA-512 query hashes

mod credentials;
mod nonce;
mod token;

pub use credentials::{
    ACCESS_KEY_VAR, Credentials, CredentialsProvider, EnvCredentials, KeyFileCredentials,
    SECRET_KEY_VAR, StaticCredentials,
};
pub use nonce::{NonceProvider, UuidNonce};
pub use token::{AuthHeaders, Claims, QUERY_HASH_ALG, query_hash, sign_request};
