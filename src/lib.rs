//! # Bithumb Client
//!
//! An async Rust client library for the Bithumb exchange REST API.
//!
//! ## Features
//!
//! - Account balances, positions and order constraints
//! - Limit and market orders, cancellation and order lookups
//! - Digital asset and KRW withdrawals
//! - JWT (HS256) authentication with SHA-512 query hashes
//! - `Remaining-Req` rate limit metadata on every response
//! - Bounded retries for idempotent calls
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bithumb_api_client::auth::EnvCredentials;
//! use bithumb_api_client::rest::BithumbRestClient;
//! use bithumb_api_client::types::tick_size;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(EnvCredentials::try_from_env().ok_or("credentials not set")?);
//!     let client = BithumbRestClient::builder().credentials(credentials).build();
//!
//!     let krw = client.get_balance("KRW").await?.into_body();
//!     println!("KRW available: {}", krw);
//!
//!     let price = tick_size(Decimal::from(1_999_700));
//!     let order = client
//!         .buy_limit_order("KRW-BTC", price, Decimal::new(1, 4))
//!         .await?;
//!     println!("Placed {}", order.body.uuid);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ApiErrorKind, BithumbError, ErrorKind};
pub use types::common::{OrdType, OrderBy, OrderKind, OrderState, Side};

/// Result type alias using BithumbError
pub type Result<T> = std::result::Result<T, BithumbError>;
