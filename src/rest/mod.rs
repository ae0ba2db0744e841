//! Bithumb exchange REST API client.
//!
//! Provides the authenticated exchange endpoints: accounts, orders and
//! withdrawals.
//!
//! # Trait-based API
//!
//! The [`BithumbClient`] trait abstracts the exchange operations so callers
//! can substitute mocks or wrappers:
//!
//! ```rust,no_run
//! use bithumb_api_client::rest::{BithumbClient, BithumbRestClient};
//!
//! async fn print_balances<C: BithumbClient>(client: &C) -> Result<(), bithumb_api_client::BithumbError> {
//!     for balance in client.get_balances().await?.into_body() {
//!         println!("{}: {}", balance.currency, balance.total());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
pub mod private;
mod response;
mod retry;
mod traits;

pub use client::{BithumbRestClient, BithumbRestClientBuilder, DEFAULT_TIMEOUT};
pub use endpoints::BITHUMB_BASE_URL;
pub use response::ApiResponse;
pub use retry::RetryPolicy;
pub use traits::BithumbClient;
