//! Exchange REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Every call returns an [`ApiResponse`] carrying the decoded body and the
//! rate limit state the exchange reported with it.

mod types;

pub use types::*;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::BithumbError;
use crate::rest::ApiResponse;
use crate::rest::client::{BithumbRestClient, Retry};
use crate::rest::endpoints::private;
use crate::types::{Side, normalize_ticker};

#[derive(Serialize)]
struct Empty {}

#[derive(Serialize)]
struct MarketParams<'a> {
    market: &'a str,
}

#[derive(Serialize)]
struct UuidParams<'a> {
    uuid: &'a str,
}

impl BithumbRestClient {
    /// Get all account balances.
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
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = BithumbRestClient::builder().credentials(credentials).build();
    ///
    ///     let balances = client.get_balances().await?;
    ///     for balance in &balances.body {
    ///         println!("{}: {}", balance.currency, balance.balance);
    ///     }
    ///     if let Some(limit) = balances.rate_limit {
    ///         println!("{} requests left this second", limit.second_limit);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balances(&self) -> Result<ApiResponse<Vec<Balance>>, BithumbError> {
        self.private_get(private::ACCOUNTS, &Empty {}).await
    }

    /// Available balance of `ticker`. Accepts `BTC` or `KRW-BTC`.
    ///
    /// A currency the account does not hold reports zero rather than an
    /// error.
    pub async fn get_balance(&self, ticker: &str) -> Result<ApiResponse<Decimal>, BithumbError> {
        self.balance_field(ticker, |b| b.balance).await
    }

    /// Available plus locked balance of `ticker`, zero if not held.
    pub async fn get_balance_total(
        &self,
        ticker: &str,
    ) -> Result<ApiResponse<Decimal>, BithumbError> {
        self.balance_field(ticker, Balance::total).await
    }

    /// Average buy price of `ticker`, zero if not held.
    pub async fn get_avg_buy_price(
        &self,
        ticker: &str,
    ) -> Result<ApiResponse<Decimal>, BithumbError> {
        self.balance_field(ticker, |b| b.avg_buy_price).await
    }

    async fn balance_field(
        &self,
        ticker: &str,
        field: impl FnOnce(&Balance) -> Decimal,
    ) -> Result<ApiResponse<Decimal>, BithumbError> {
        let currency = normalize_ticker(ticker);
        let balances = self.get_balances().await?;
        Ok(balances.map(|balances| {
            find_balance(&balances, currency).map_or(Decimal::ZERO, field)
        }))
    }

    /// Position value of `ticker` at its average buy price, or of every
    /// held currency when `ticker` is `ALL`.
    ///
    /// The client's fiat currency is never counted. A currency the account
    /// does not hold reports zero.
    pub async fn get_amount(&self, ticker: &str) -> Result<ApiResponse<Decimal>, BithumbError> {
        let ticker = normalize_ticker(ticker);
        let balances = self.get_balances().await?;
        Ok(balances.map(|balances| position_amount(&balances, ticker, self.fiat_currency())))
    }

    /// Get fees, constraints and accounts for ordering on `market`.
    pub async fn get_chance(
        &self,
        market: &str,
    ) -> Result<ApiResponse<OrderChance>, BithumbError> {
        self.private_get(private::ORDERS_CHANCE, &MarketParams { market }).await
    }

    /// Place a limit order.
    ///
    /// The price is sent as given; round it with
    /// [`tick_size`](crate::types::tick_size) first. Limit orders are
    /// retried per the client's [`RetryPolicy`](crate::rest::RetryPolicy).
    pub async fn place_limit_order(
        &self,
        side: Side,
        market: &str,
        price: Decimal,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        let request = PlaceOrderRequest::limit(side, market, price, volume);
        self.private_post(private::ORDERS, &request, Retry::Policy).await
    }

    /// Place a limit buy order.
    pub async fn buy_limit_order(
        &self,
        market: &str,
        price: Decimal,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        self.place_limit_order(Side::Bid, market, price, volume).await
    }

    /// Place a limit sell order.
    pub async fn sell_limit_order(
        &self,
        market: &str,
        price: Decimal,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        self.place_limit_order(Side::Ask, market, price, volume).await
    }

    /// Buy at market, spending `krw_amount`. Sent once.
    pub async fn place_market_buy(
        &self,
        market: &str,
        krw_amount: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        let request = PlaceOrderRequest::market_buy(market, krw_amount);
        self.private_post(private::ORDERS, &request, Retry::Never).await
    }

    /// Sell `volume` at market. Sent once.
    pub async fn place_market_sell(
        &self,
        market: &str,
        volume: Decimal,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        let request = PlaceOrderRequest::market_sell(market, volume);
        self.private_post(private::ORDERS, &request, Retry::Never).await
    }

    /// Cancel an order. Sent once.
    pub async fn cancel_order(&self, uuid: &str) -> Result<ApiResponse<Order>, BithumbError> {
        self.private_delete(private::ORDER, &UuidParams { uuid }).await
    }

    /// Look up a single order or list a market's orders.
    ///
    /// ```rust,no_run
    /// use bithumb_api_client::rest::BithumbRestClient;
    /// use bithumb_api_client::rest::private::{OrderListFilter, OrderQuery};
    /// use bithumb_api_client::types::OrderState;
    ///
    /// # async fn example(client: &BithumbRestClient) -> Result<(), bithumb_api_client::BithumbError> {
    /// let filter = OrderListFilter::new("KRW-BTC").state(OrderState::Done).limit(10);
    /// let orders = client.get_order(OrderQuery::ByMarket(filter)).await?;
    /// for order in orders.into_body().into_orders() {
    ///     println!("{} {:?}", order.uuid, order.state);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_order(
        &self,
        query: OrderQuery,
    ) -> Result<ApiResponse<OrderLookup>, BithumbError> {
        match query {
            OrderQuery::ById(uuid) => Ok(self
                .get_individual_order(&uuid)
                .await?
                .map(OrderLookup::Single)),
            OrderQuery::ByMarket(filter) => Ok(self
                .private_get::<Vec<Order>, _>(private::ORDERS, &filter)
                .await?
                .map(OrderLookup::List)),
        }
    }

    /// Look up a single order, including its fills.
    pub async fn get_individual_order(
        &self,
        uuid: &str,
    ) -> Result<ApiResponse<Order>, BithumbError> {
        self.private_get(private::ORDER, &UuidParams { uuid }).await
    }

    /// Withdraw a digital asset to a registered address. Sent once.
    ///
    /// An unregistered address fails with an error whose kind is
    /// [`ErrorKind::WithdrawAddressNotRegistered`](crate::error::ErrorKind::WithdrawAddressNotRegistered).
    pub async fn withdraw_coin(
        &self,
        request: &WithdrawCoinRequest,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        self.private_post(private::WITHDRAWS_COIN, request, Retry::Never).await
    }

    /// Withdraw KRW to the registered bank account. Sent once.
    pub async fn withdraw_cash(
        &self,
        amount: Decimal,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        self.private_post(
            private::WITHDRAWS_KRW,
            &WithdrawCashRequest { amount },
            Retry::Never,
        )
        .await
    }

    /// Get the state of a withdrawal.
    pub async fn get_withdraw_status(
        &self,
        uuid: &str,
        currency: &str,
    ) -> Result<ApiResponse<Withdrawal>, BithumbError> {
        let request = WithdrawStatusRequest {
            uuid: uuid.to_string(),
            currency: currency.to_string(),
        };
        self.private_get(private::WITHDRAW, &request).await
    }
}
