//! Common types used across the Bithumb client library.

pub mod common;
pub mod serde_helpers;
pub mod tick;
pub mod ticker;

pub use common::*;
pub use tick::{tick_size, tick_unit};
pub use ticker::{ALL_TICKERS, FIAT_CURRENCY, normalize_ticker};
