//! Bithumb API keys.
//!
//! A key pair is issued from the Bithumb API management page: the access
//! key travels in every token's `access_key` claim, the secret key only
//! signs the token and never leaves the process.
//!
//! Deployments usually keep the pair in a two-line key file:
//!
//! ```text
//! <access key>
//! <secret key>
//! ```
//!
//! Surrounding whitespace and a trailing newline are ignored. Load it with
//! [`KeyFileCredentials::load`], or read keys from the environment with
//! [`EnvCredentials`].

use std::path::Path;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::error::BithumbError;

/// Environment variable read for the access key.
pub const ACCESS_KEY_VAR: &str = "BITHUMB_ACCESS_KEY";
/// Environment variable read for the secret key.
pub const SECRET_KEY_VAR: &str = "BITHUMB_SECRET_KEY";

/// A Bithumb access key and the secret key that signs its tokens.
#[derive(Clone)]
pub struct Credentials {
    /// Access key, sent as the `access_key` claim.
    pub access_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create credentials from an access key and secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Parse the contents of a two-line key file.
    ///
    /// Returns `None` unless the first two non-blank lines are both present.
    /// Lines after the second are ignored.
    ///
    /// ```rust
    /// use bithumb_api_client::auth::Credentials;
    ///
    /// let credentials = Credentials::from_key_file("my-access\nmy-secret\n").unwrap();
    /// assert_eq!(credentials.access_key, "my-access");
    /// assert!(Credentials::from_key_file("only-one-line").is_none());
    /// ```
    pub fn from_key_file(contents: &str) -> Option<Self> {
        let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
        let access_key = lines.next()?;
        let secret_key = lines.next()?;
        Some(Self::new(access_key, secret_key))
    }

    /// HS256 signing key bytes.
    pub fn expose_secret(&self) -> &[u8] {
        self.secret_key.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Source of the credentials used to sign each request.
///
/// The transport asks for credentials on every attempt, so an
/// implementation backed by a secrets manager can rotate keys between calls.
pub trait CredentialsProvider: Send + Sync {
    /// Current credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Credentials fixed at construction.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Wrap an access key and secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(access_key, secret_key),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read once from a two-line key file.
pub struct KeyFileCredentials {
    credentials: Credentials,
}

impl KeyFileCredentials {
    /// Read and parse the key file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BithumbError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BithumbError::KeyFile(format!("cannot read {}: {}", path.display(), e))
        })?;
        let credentials = Credentials::from_key_file(&contents).ok_or_else(|| {
            BithumbError::KeyFile(format!(
                "{} must hold the access key and the secret key on two lines",
                path.display()
            ))
        })?;
        Ok(Self { credentials })
    }
}

impl CredentialsProvider for KeyFileCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read from `BITHUMB_ACCESS_KEY` and `BITHUMB_SECRET_KEY`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read the default variables. `None` if either is unset.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(ACCESS_KEY_VAR, SECRET_KEY_VAR)
    }

    /// Read custom variable names. `None` if either is unset.
    pub fn try_from_env_vars(access_var: &str, secret_var: &str) -> Option<Self> {
        let access_key = std::env::var(access_var).ok()?;
        let secret_key = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(access_key.trim(), secret_key.trim()),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
