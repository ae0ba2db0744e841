//! Trait definition for the Bithumb REST API client.
//!
//! [`BithumbClient`] abstracts the exchange operations so that trading code
//! can be written against a mock or a wrapping implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use bithumb_api_client::BithumbError;
//! use bithumb_api_client::rest::BithumbClient;
//! use rust_decimal::Decimal;
//!
//! async fn total_position<C: BithumbClient>(client: &C) -> Result<Decimal, BithumbError> {
//!     Ok(client.get_amount("ALL").await?.into_body())
//! }
//! ```

use std::future::Future;

use rust_decimal::Decimal;

use crate::error::BithumbError;
use crate::rest::ApiResponse;
use crate::rest::BithumbRestClient;
use crate::rest::private::{
    Balance, Order, OrderChance, OrderLookup, OrderQuery, WithdrawCoinRequest, Withdrawal,
};
use crate::types::Side;

/// Bithumb exchange operations.
pub trait BithumbClient: Send + Sync {
    // ========== Account ==========

    /// Get all account balances.
    fn get_balances(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<Vec<Balance>>, BithumbError>> + Send;

    /// Available balance of a currency, zero if not held.
    fn get_balance(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<ApiResponse<Decimal>, BithumbError>> + Send;

    /// Available plus locked balance of a currency, zero if not held.
    fn get_balance_total(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<ApiResponse<Decimal>, BithumbError>> + Send;

    /// Average buy price of a currency, zero if not held.
    fn get_avg_buy_price(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<ApiResponse<Decimal>, BithumbError>> + Send;

    /// Position value of a currency, or of all currencies for `ALL`.
    fn get_amount(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<ApiResponse<Decimal>, BithumbError>> + Send;

    // ========== Trading ==========

    /// Get ordering constraints for a market.
    fn get_chance(
        &self,
        market: &str,
    ) -> impl Future<Output = Result<ApiResponse<OrderChance>, BithumbError>> + Send;

    /// Place a limit order.
    fn place_limit_order(
        &self,
        side: Side,
        market: &str,
        price: Decimal,
        volume: Decimal,
    ) -> impl Future<Output = Result<ApiResponse<Order>, BithumbError>> + Send;

    /// Buy at market for a KRW amount.
    fn place_market_buy(
        &self,
        market: &str,
        krw_amount: Decimal,
    ) -> impl Future<Output = Result<ApiResponse<Order>, BithumbError>> + Send;

    /// Sell a volume at market.
    fn place_market_sell(
        &self,
        market: &str,
        volume: Decimal,
    ) -> impl Future<Output = Result<ApiResponse<Order>, BithumbError>> + Send;

    /// Cancel an order.
    fn cancel_order(
        &self,
        uuid: &str,
    ) -> impl Future<Output = Result<ApiResponse<Order>, BithumbError>> + Send;

    /// Look up one order or list a market's orders.
    fn get_order(
        &self,
        query: OrderQuery,
    ) -> impl Future<Output = Result<ApiResponse<OrderLookup>, BithumbError>> + Send;

    // ========== Funding ==========

    /// Withdraw a digital asset.
    fn withdraw_coin(
        &self,
        request: &WithdrawCoinRequest,
    ) -> impl Future<Output = Result<ApiResponse<Withdrawal>, BithumbError>> + Send;

    /// Withdraw KRW.
    fn withdraw_cash(
        &self,
        amount: Decimal,
    ) -> impl Future<Output = Result<ApiResponse<Withdrawal>, BithumbError>> + Send;

    /// Get the state of a withdrawal.
    fn get_withdraw_status(
        &self,
        uuid: &str,
        currency: &str,
    ) -> impl Future<Output = Result<ApiResponse<Withdrawal>, BithumbError>> + Send;
}

impl BithumbClient for BithumbRestClient {
    async fn get_balances(&self) -> Result<ApiResponse<Vec<Balance>>, BithumbError> {
        BithumbRestClient::get_balances(self).await
    }

    async fn get_balance(&self, ticker: &str) -> Result<ApiResponse<Decimal>, BithumbError> {
        BithumbRestClient::get_balance(self, ticker).await
    }

    async fn get_balance_total(
        &self,
        ticker: &str,
    ) -> Result<ApiResponse<Decimal>, BithumbError> {
        BithumbRestClient::get_balance_total(self, ticker).await
    }

    async fn get_avg_buy_price(
        &self,
        ticker: &str,
    ) -> Result<ApiResponse<Decimal>, BithumbError> {
        BithumbRestClient::get_avg_buy_price(self, ticker).await
    }

    async fn get_amount(&self, ticker: &str) -> Result<ApiResponse<Decimal>, BithumbError> {
        BithumbRestClient::get_amount(self, ticker).await
    }

    async fn get_chance(&self, market: &str) -> Result<ApiResponse<OrderChance>, BithumbError> {
        BithumbRestClient::get_chance(self, market).await
    }

    async fn place_limit_order(
        &self,
        side: Side,
        market: &str,
        price: Decimal,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        BithumbRestClient::place_limit_order(self, side, market, price, volume).await
    }

    async fn place_market_buy(
        &self,
        market: &str,
        krw_amount: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        BithumbRestClient::place_market_buy(self, market, krw_amount).await
    }

    async fn place_market_sell(
        &self,
        market: &str,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        BithumbRestClient::place_market_sell(self, market, volume).await
    }

    async fn cancel_order(&self, uuid: &str) -> Result<ApiResponse<Order>, BithumbError> {
        BithumbRestClient::cancel_order(self, uuid).await
    }

    async fn get_order(
        &self,
        query: OrderQuery,
    ) -> Result<ApiResponse<OrderLookup>, BithumbError> {
        BithumbRestClient::get_order(self, query).await
    }

    async fn withdraw_coin(
        &self,
        request: &WithdrawCoinRequest,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        BithumbRestClient::withdraw_coin(self, request).await
    }

    async fn withdraw_cash(
        &self,
        amount: Decimal,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        BithumbRestClient::withdraw_cash(self, amount).await
    }

    async fn get_withdraw_status(
        &self,
        uuid: &str,
        currency: &str,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        BithumbRestClient::get_withdraw_status(self, uuid, currency).await
    }
}
