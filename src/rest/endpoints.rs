//! Bithumb REST API endpoint constants.

/// Base URL for the Bithumb REST API.
pub const BITHUMB_BASE_URL: &str = "https://api.bithumb.com";

/// Exchange endpoints (authentication required).
pub mod private {
    // Account endpoints
    /// Get all account balances.
    pub const ACCOUNTS: &str = "/v1/accounts";

    // Order endpoints
    /// Get order constraints for a market.
    pub const ORDERS_CHANCE: &str = "/v1/orders/chance";
    /// Place an order (POST) or list orders (GET).
    pub const ORDERS: &str = "/v1/orders";
    /// Get (GET) or cancel (DELETE) a single order.
    pub const ORDER: &str = "/v1/order";

    // Withdrawal endpoints
    /// Withdraw a digital asset.
    pub const WITHDRAWS_COIN: &str = "/v1/withdraws/coin";
    /// Withdraw KRW.
    pub const WITHDRAWS_KRW: &str = "/v1/withdraws/krw";
    /// Get a single withdrawal.
    pub const WITHDRAW: &str = "/v1/withdraw";
}
