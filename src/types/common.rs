//! Common domain types for the Bithumb API.

use serde::{Deserialize, Serialize};

/// Side of an order. Bithumb calls buys `bid` and sells `ask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
    /// Any side this client does not know
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
            Side::Unknown => write!(f, "unknown"),
        }
    }
}

/// Order type (`ord_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdType {
    /// Limit order at a given price
    Limit,
    /// Market buy; `price` carries the KRW notional to spend
    Price,
    /// Market sell; `volume` carries the quantity to sell
    Market,
    /// Any order type this client does not know
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OrdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrdType::Limit => "limit",
            OrdType::Price => "price",
            OrdType::Market => "market",
            OrdType::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// State of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// Waiting to be filled
    #[default]
    Wait,
    /// Reserved watch order waiting for its trigger
    Watch,
    /// Completely filled
    Done,
    /// Cancelled
    Cancel,
    /// Any state this client does not know
    #[serde(other)]
    Unknown,
}

/// Kind of order to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Regular orders
    Normal,
    /// Watch (reserved) orders
    #[default]
    Watch,
}

/// Sort order for order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}
