//! Error types for the Bithumb client library.

use thiserror::Error;

/// The main error type for all Bithumb client operations.
#[derive(Error, Debug)]
pub enum BithumbError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters could not be URL-encoded
    #[error("Failed to encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Bithumb API rejected the request
    #[error("Bithumb API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Message reported by the exchange, if any
        message: String,
    },

    /// Authentication error while building the request token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A success response was valid JSON but did not decode into the
    /// expected type. The exchange accepted the request.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Request or call deadline elapsed
    #[error("Request timed out")]
    Timeout,

    /// Key file missing, unreadable or malformed
    #[error("Key file error: {0}")]
    KeyFile(String),

    /// Missing required credentials
    #[error("Missing credentials: access key and secret key required for exchange endpoints")]
    MissingCredentials,

    /// A call failed after all attempts; carries the call context.
    #[error("{method} {endpoint} failed after {attempts} attempt(s): {source}")]
    Request {
        /// HTTP method of the failed call
        method: reqwest::Method,
        /// Endpoint path (e.g. "/v1/orders")
        endpoint: String,
        /// URL-encoded request parameters, empty when the call had none
        params: String,
        /// Number of attempts made
        attempts: u32,
        /// The failure of the last attempt
        #[source]
        source: Box<BithumbError>,
    },
}

/// Closed set of failure categories, independent of how the failure surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network or HTTP transport failure
    Network,
    /// Response body was not JSON
    Decode,
    /// Success response in an unexpected shape; the request took effect
    Schema,
    /// Bad signature, expired key, reused nonce, unauthorized IP
    Authentication,
    /// Bad order parameters, below-minimum total, insufficient funds
    Validation,
    /// Too many requests
    RateLimited,
    /// Withdrawal address is not registered
    WithdrawAddressNotRegistered,
    /// The key is not allowed to perform the operation
    Unsupported,
    /// Unrecognized exchange error
    Exchange,
    /// Deadline elapsed
    Timeout,
    /// Client misconfiguration (credentials, URL, parameters)
    Configuration,
}

impl BithumbError {
    /// The innermost error, looking through [`BithumbError::Request`] context.
    pub fn root(&self) -> &BithumbError {
        match self {
            BithumbError::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// The exchange rejection, if this failure is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self.root() {
            BithumbError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Category of the failure.
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            BithumbError::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            BithumbError::Http(e) if e.is_decode() => ErrorKind::Decode,
            BithumbError::Http(_) | BithumbError::HttpMiddleware(_) => ErrorKind::Network,
            BithumbError::Json(_) | BithumbError::InvalidResponse(_) => ErrorKind::Decode,
            BithumbError::UnexpectedShape(_) => ErrorKind::Schema,
            BithumbError::Url(_)
            | BithumbError::Encode(_)
            | BithumbError::KeyFile(_)
            | BithumbError::MissingCredentials => ErrorKind::Configuration,
            BithumbError::Auth(_) => ErrorKind::Authentication,
            BithumbError::Api(e) => e.kind.category(),
            BithumbError::RateLimitExceeded { .. } => ErrorKind::RateLimited,
            BithumbError::Timeout => ErrorKind::Timeout,
            BithumbError::Request { source, .. } => source.kind(),
        }
    }

    /// Whether another attempt could succeed.
    ///
    /// Transport failures, timeouts and non-JSON bodies are retryable.
    /// Exchange rejections, configuration errors and success responses of
    /// an unexpected shape are not: the exchange has already answered.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Network | ErrorKind::Decode | ErrorKind::Timeout
        )
    }
}

/// Bithumb error kinds, keyed by the `error.name` field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Order request parameters are invalid
    InvalidOrder,
    /// Not enough available balance for the order
    InsufficientFunds,
    /// Order total is below the market minimum
    UnderMinTotal,
    /// Withdrawal address is not registered
    WithdrawAddressNotRegistered,
    /// Malformed API request
    ValidationError,
    /// JWT payload is invalid (e.g. query hash mismatch)
    InvalidQueryPayload,
    /// JWT signature verification failed
    JwtVerification,
    /// API key has expired
    ExpiredAccessKey,
    /// Nonce was already used
    NonceUsed,
    /// Request came from an IP not allowed for this key
    NoAuthorizationIp,
    /// Operation is outside the key's permissions
    OutOfScope,
    /// Too many requests
    TooManyRequests,
    /// Anything else
    Unknown,
}

impl ApiErrorKind {
    /// Map an `error.name` value to a kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            error_names::CREATE_ASK_ERROR | error_names::CREATE_BID_ERROR => Self::InvalidOrder,
            error_names::INSUFFICIENT_FUNDS_ASK | error_names::INSUFFICIENT_FUNDS_BID => {
                Self::InsufficientFunds
            }
            error_names::UNDER_MIN_TOTAL_ASK | error_names::UNDER_MIN_TOTAL_BID => {
                Self::UnderMinTotal
            }
            error_names::WITHDRAW_ADDRESS_NOT_REGISTERED
            | error_names::WITHDRAW_ADDRESS_NOT_REGISTERED_ALT => {
                Self::WithdrawAddressNotRegistered
            }
            error_names::VALIDATION_ERROR => Self::ValidationError,
            error_names::INVALID_QUERY_PAYLOAD => Self::InvalidQueryPayload,
            error_names::JWT_VERIFICATION => Self::JwtVerification,
            error_names::EXPIRED_ACCESS_KEY => Self::ExpiredAccessKey,
            error_names::NONCE_USED => Self::NonceUsed,
            error_names::NO_AUTHORIZATION_IP | error_names::NO_AUTHORIZATION_IP_ALT => {
                Self::NoAuthorizationIp
            }
            error_names::OUT_OF_SCOPE => Self::OutOfScope,
            error_names::TOO_MANY_REQUESTS => Self::TooManyRequests,
            _ => Self::Unknown,
        }
    }

    /// Broad category of this kind.
    pub fn category(self) -> ErrorKind {
        match self {
            Self::InvalidOrder
            | Self::InsufficientFunds
            | Self::UnderMinTotal
            | Self::ValidationError => ErrorKind::Validation,
            Self::InvalidQueryPayload
            | Self::JwtVerification
            | Self::ExpiredAccessKey
            | Self::NonceUsed
            | Self::NoAuthorizationIp => ErrorKind::Authentication,
            Self::WithdrawAddressNotRegistered => ErrorKind::WithdrawAddressNotRegistered,
            Self::OutOfScope => ErrorKind::Unsupported,
            Self::TooManyRequests => ErrorKind::RateLimited,
            Self::Unknown => ErrorKind::Exchange,
        }
    }
}

/// Bithumb API error as returned in the response body.
///
/// Bithumb reports failures as `{"error": {"name": "...", "message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Classified kind
    pub kind: ApiErrorKind,
    /// The error name from Bithumb (e.g., "insufficient_funds_bid")
    pub name: String,
    /// Human-readable error message
    pub message: String,
    /// HTTP status code of the response
    pub status: u16,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {}): {}", self.name, self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error from a name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        let name = name.into();
        let kind = if status == 429 {
            ApiErrorKind::TooManyRequests
        } else {
            ApiErrorKind::from_name(&name)
        };
        Self {
            kind,
            name,
            message: message.into(),
            status,
        }
    }

    /// Check if this is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        self.kind.category() == ErrorKind::Authentication
    }

    /// Check if this is an order validation failure.
    pub fn is_validation(&self) -> bool {
        self.kind.category() == ErrorKind::Validation
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.kind == ApiErrorKind::TooManyRequests
    }
}

/// Known Bithumb `error.name` values.
pub mod error_names {
    /// Order rejected when creating a sell.
    pub const CREATE_ASK_ERROR: &str = "create_ask_error";
    /// Order rejected when creating a buy.
    pub const CREATE_BID_ERROR: &str = "create_bid_error";
    /// Not enough of the base currency to sell.
    pub const INSUFFICIENT_FUNDS_ASK: &str = "insufficient_funds_ask";
    /// Not enough KRW to buy.
    pub const INSUFFICIENT_FUNDS_BID: &str = "insufficient_funds_bid";
    /// Sell total below the market minimum.
    pub const UNDER_MIN_TOTAL_ASK: &str = "under_min_total_ask";
    /// Buy total below the market minimum.
    pub const UNDER_MIN_TOTAL_BID: &str = "under_min_total_bid";

    /// Unregistered withdrawal address, as the exchange spells it.
    pub const WITHDRAW_ADDRESS_NOT_REGISTERED: &str = "withdraw_address_not_registerd";
    /// Unregistered withdrawal address, correctly spelled.
    pub const WITHDRAW_ADDRESS_NOT_REGISTERED_ALT: &str = "withdraw_address_not_registered";

    /// Malformed or missing request parameters.
    pub const VALIDATION_ERROR: &str = "validation_error";

    /// Query hash does not match the sent parameters.
    pub const INVALID_QUERY_PAYLOAD: &str = "invalid_query_payload";
    /// Token signature could not be verified.
    pub const JWT_VERIFICATION: &str = "jwt_verification";
    /// Access key has expired.
    pub const EXPIRED_ACCESS_KEY: &str = "expired_access_key";
    /// Nonce was already used.
    pub const NONCE_USED: &str = "nonce_used";
    /// Caller IP is not allowed for the key.
    pub const NO_AUTHORIZATION_IP: &str = "no_authorization_i_p";
    /// Caller IP is not allowed for the key, alternate spelling.
    pub const NO_AUTHORIZATION_IP_ALT: &str = "no_authorization_ip";
    /// Key lacks the permission for the endpoint.
    pub const OUT_OF_SCOPE: &str = "out_of_scope";

    /// Request rate exceeded.
    pub const TOO_MANY_REQUESTS: &str = "too_many_requests";
}
