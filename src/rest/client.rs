//! Bithumb REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::Dispatch;
use tracing::instrument::WithSubscriber;
use url::Url;

use crate::auth::{CredentialsProvider, NonceProvider, UuidNonce, sign_request};
use crate::error::{ApiError, BithumbError};
use crate::rate_limit::RateLimitInfo;
use crate::rest::endpoints::BITHUMB_BASE_URL;
use crate::rest::response::ApiResponse;
use crate::rest::retry::RetryPolicy;
use crate::types::FIAT_CURRENCY;

/// Default per-attempt HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a call may be repeated after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retry {
    /// Apply the client's [`RetryPolicy`].
    Policy,
    /// Send once.
    Never,
}

/// The Bithumb exchange REST API client.
///
/// This client signs every request with a fresh JWT, records the
/// `Remaining-Req` rate limit header, and retries transient failures of
/// idempotent calls according to its [`RetryPolicy`].
///
/// # Example
///
/// ```rust,no_run
/// use bithumb_api_client::rest::BithumbRestClient;
/// use bithumb_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("access_key", "secret_key"));
///     let client = BithumbRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let krw = client.get_balance("KRW").await?.into_body();
///     println!("KRW available: {}", krw);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BithumbRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
    retry_policy: RetryPolicy,
    call_timeout: Option<Duration>,
    fiat_currency: String,
    dispatch: Option<Dispatch>,
}

impl BithumbRestClient {
    /// Create a new client builder.
    pub fn builder() -> BithumbRestClientBuilder {
        BithumbRestClientBuilder::new()
    }

    /// The fiat currency excluded from position amounts.
    pub fn fiat_currency(&self) -> &str {
        &self.fiat_currency
    }

    /// The retry policy applied to retryable calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Make an authenticated GET request. GETs are always retryable.
    pub(crate) async fn private_get<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, endpoint, params, Retry::Policy).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn private_post<T, P>(
        &self,
        endpoint: &str,
        params: &P,
        retry: Retry,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.send(Method::POST, endpoint, params, retry).await
    }

    /// Make an authenticated DELETE request. Sent once.
    pub(crate) async fn private_delete<T, Q>(
        &self,
        endpoint: &str,
        params: &Q,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::DELETE, endpoint, params, Retry::Never).await
    }

    /// Send a request under the client's subscriber, if one was given.
    async fn send<T, P>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
        retry: Retry,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let call = self.call(method, endpoint, params, retry);
        match &self.dispatch {
            Some(dispatch) => call.with_subscriber(dispatch.clone()).await,
            None => call.await,
        }
    }

    /// Send a request, retrying per `retry`, bounded by the call deadline.
    ///
    /// The query hash is computed over the same URL-encoded string that is
    /// appended to the URL; POST bodies are JSON built from the same
    /// parameters, in the same field order.
    async fn call<T, P>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
        retry: Retry,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(params)?;
        let body = if method == Method::POST {
            Some(serde_json::to_string(params)?)
        } else {
            None
        };
        let policy = match retry {
            Retry::Policy => self.retry_policy,
            Retry::Never => RetryPolicy::never(),
        };

        let mut attempts = 0u32;
        let call = async {
            loop {
                attempts += 1;
                match self.attempt(&method, endpoint, &query, body.as_deref()).await {
                    Ok(response) => break Ok(response),
                    Err(e) if policy.should_retry(attempts, &e) => {
                        tracing::warn!(
                            %method,
                            endpoint,
                            attempt = attempts,
                            max_attempts = policy.max_attempts(),
                            "request failed, retrying in {:?}: {}",
                            policy.delay(),
                            e
                        );
                        tokio::time::sleep(policy.delay()).await;
                    }
                    Err(e) => break Err(e),
                }
            }
        };

        let result = match self.call_timeout {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .unwrap_or(Err(BithumbError::Timeout)),
            None => call.await,
        };

        result.map_err(|source| {
            tracing::debug!(%method, endpoint, attempts, "request failed: {}", source);
            BithumbError::Request {
                method,
                endpoint: endpoint.to_string(),
                params: query,
                attempts,
                source: Box::new(source),
            }
        })
    }

    /// One signed request/response cycle. Each attempt carries a fresh nonce.
    async fn attempt<T>(
        &self,
        method: &Method,
        endpoint: &str,
        query: &str,
        body: Option<&str>,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BithumbError::MissingCredentials)?
            .get_credentials();

        let auth = sign_request(
            credentials,
            self.nonce_provider.next_nonce(),
            current_time_millis(),
            Some(query),
        )?;

        let url = if body.is_some() || query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        };
        let url = Url::parse(&url)?;

        tracing::debug!(%method, endpoint, "sending request");

        let mut request = self
            .http_client
            .request(method.clone(), url)
            .header(AUTHORIZATION, auth.authorization);
        if let Some(content_type) = auth.content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|e| match e {
            reqwest_middleware::Error::Reqwest(e) => BithumbError::Http(e),
            other => BithumbError::HttpMiddleware(other),
        })?;

        self.parse_response(response).await
    }

    /// Parse a response from the Bithumb API.
    async fn parse_response<T>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, BithumbError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let body = response.text().await?;

        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&body);

        // 429 means rate limited whatever the body says.
        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = parsed
                .ok()
                .and_then(|value| error_detail(&value).map(|e| e.message))
                .unwrap_or(body);
            return Err(BithumbError::RateLimitExceeded { message });
        }

        let value = parsed.map_err(|e| {
            BithumbError::InvalidResponse(format!(
                "HTTP {}: failed to parse response: {}. Body: {}",
                status, e, body
            ))
        })?;

        if let Some(detail) = error_detail(&value) {
            let api_error = ApiError::new(detail.name, detail.message, status.as_u16());
            if api_error.is_rate_limit() {
                return Err(BithumbError::RateLimitExceeded {
                    message: api_error.message,
                });
            }
            return Err(BithumbError::Api(api_error));
        }

        if !status.is_success() {
            return Err(BithumbError::Api(ApiError::new(
                "unknown",
                body,
                status.as_u16(),
            )));
        }

        // The exchange has acted on the request by now; never retry from here.
        let body = serde_json::from_value(value)
            .map_err(|e| BithumbError::UnexpectedShape(format!("HTTP {}: {}", status, e)))?;

        Ok(ApiResponse::new(body, rate_limit))
    }
}

impl std::fmt::Debug for BithumbRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BithumbRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("retry_policy", &self.retry_policy)
            .field("call_timeout", &self.call_timeout)
            .field("fiat_currency", &self.fiat_currency)
            .field("has_dispatch", &self.dispatch.is_some())
            .finish()
    }
}

/// Builder for [`BithumbRestClient`].
pub struct BithumbRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
    call_timeout: Option<Duration>,
    retry_policy: RetryPolicy,
    fiat_currency: String,
    dispatch: Option<Dispatch>,
}

impl BithumbRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BITHUMB_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            call_timeout: None,
            retry_policy: RetryPolicy::default(),
            fiat_currency: FIAT_CURRENCY.to_string(),
            dispatch: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timeout of a single HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bound a whole call, retries and retry delays included.
    pub fn call_timeout(mut self, deadline: Duration) -> Self {
        self.call_timeout = Some(deadline);
        self
    }

    /// Set the retry policy for retryable calls.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Set the fiat currency excluded from position amounts.
    pub fn fiat_currency(mut self, currency: impl Into<String>) -> Self {
        self.fiat_currency = currency.into();
        self
    }

    /// Send this client's log events and spans to `dispatch` instead of
    /// the subscriber in scope at the call site.
    pub fn tracing_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Build the client.
    pub fn build(self) -> BithumbRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("bithumb-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("bithumb-api-client"));
        headers.insert(USER_AGENT, header_value);

        // Build the HTTP client with middleware.
        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(UuidNonce::new()));

        BithumbRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
            retry_policy: self.retry_policy,
            call_timeout: self.call_timeout,
            fiat_currency: self.fiat_currency,
            dispatch: self.dispatch,
        }
    }
}

impl Default for BithumbRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `error` object of a Bithumb error response.
#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    name: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

struct ParsedError {
    name: String,
    message: String,
}

fn error_detail(value: &serde_json::Value) -> Option<ParsedError> {
    let error = value.get("error").filter(|e| !e.is_null())?;
    let detail: ErrorDetail = serde_json::from_value(error.clone()).ok()?;
    let name = match detail.name {
        Some(serde_json::Value::String(name)) => name,
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    };
    Some(ParsedError {
        name,
        message: detail.message.unwrap_or_default(),
    })
}

fn current_time_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
