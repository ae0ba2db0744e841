//! Types for exchange REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::serde_helpers::optional_decimal;
use crate::types::{ALL_TICKERS, OrdType, OrderBy, OrderKind, OrderState, Side};

/// Balance of one currency held in the account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Balance {
    /// Currency code (e.g. `BTC`, `KRW`).
    pub currency: String,
    /// Available balance, excluding funds locked in open orders.
    pub balance: Decimal,
    /// Balance locked in open orders or pending withdrawals.
    pub locked: Decimal,
    /// Average buy price.
    pub avg_buy_price: Decimal,
    /// Whether the average buy price was edited by the user.
    #[serde(default)]
    pub avg_buy_price_modified: bool,
    /// Currency the average buy price is quoted in.
    #[serde(default)]
    pub unit_currency: String,
}

impl Balance {
    /// Available plus locked balance.
    pub fn total(&self) -> Decimal {
        self.balance + self.locked
    }

    /// Position value at the average buy price.
    pub fn amount(&self) -> Decimal {
        self.avg_buy_price * self.total()
    }
}

/// First balance entry for `currency`. The exchange does not promise unique
/// currencies, so later duplicates are ignored.
pub fn find_balance<'a>(balances: &'a [Balance], currency: &str) -> Option<&'a Balance> {
    balances.iter().find(|b| b.currency == currency)
}

/// Position value for `ticker`, or the sum over every currency when
/// `ticker` is `ALL`. The fiat currency is never counted.
pub fn position_amount(balances: &[Balance], ticker: &str, fiat_currency: &str) -> Decimal {
    let mut positions = balances.iter().filter(|b| b.currency != fiat_currency);
    if ticker == ALL_TICKERS {
        positions.map(Balance::amount).sum()
    } else {
        positions
            .find(|b| b.currency == ticker)
            .map_or(Decimal::ZERO, Balance::amount)
    }
}

/// Order constraints and fees for one market.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderChance {
    /// Fee rate for buy orders.
    pub bid_fee: Decimal,
    /// Fee rate for sell orders.
    pub ask_fee: Decimal,
    /// Maker fee rate for buy orders.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub maker_bid_fee: Option<Decimal>,
    /// Maker fee rate for sell orders.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub maker_ask_fee: Option<Decimal>,
    /// Market information.
    pub market: ChanceMarket,
    /// Account of the quote currency.
    pub bid_account: Balance,
    /// Account of the base currency.
    pub ask_account: Balance,
}

/// Market information returned with order chance.
#[derive(Debug, Clone, Deserialize)]
pub struct ChanceMarket {
    /// Market ID (e.g. `KRW-BTC`).
    pub id: String,
    /// Market name.
    #[serde(default)]
    pub name: String,
    /// Supported order types.
    #[serde(default)]
    pub order_types: Vec<String>,
    /// Supported order sides.
    #[serde(default)]
    pub order_sides: Vec<String>,
    /// Constraints for buy orders.
    pub bid: MarketConstraint,
    /// Constraints for sell orders.
    pub ask: MarketConstraint,
    /// Maximum order total.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub max_total: Option<Decimal>,
    /// Market state (e.g. `active`).
    #[serde(default)]
    pub state: String,
}

/// Per-side order constraint.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConstraint {
    /// Currency of this side.
    pub currency: String,
    /// Price unit, when reported.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub price_unit: Option<Decimal>,
    /// Minimum order total.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub min_total: Option<Decimal>,
}

/// An order as reported by the exchange.
///
/// Every field is optional so that partial or extended shapes decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    /// Order ID.
    #[serde(default)]
    pub uuid: String,
    /// Order side.
    #[serde(default)]
    pub side: Option<Side>,
    /// Order type.
    #[serde(default)]
    pub ord_type: Option<OrdType>,
    /// Limit price, or KRW notional for market buys.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub price: Option<Decimal>,
    /// Order state.
    #[serde(default)]
    pub state: Option<OrderState>,
    /// Market ID.
    #[serde(default)]
    pub market: String,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Ordered volume.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub volume: Option<Decimal>,
    /// Volume not yet filled.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub remaining_volume: Option<Decimal>,
    /// Fee reserved for the order.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub reserved_fee: Option<Decimal>,
    /// Fee still reserved.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub remaining_fee: Option<Decimal>,
    /// Fee paid so far.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub paid_fee: Option<Decimal>,
    /// Amount locked by the order.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub locked: Option<Decimal>,
    /// Filled volume.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub executed_volume: Option<Decimal>,
    /// Number of fills.
    #[serde(default)]
    pub trades_count: Option<u64>,
    /// Fills, reported by single-order lookups.
    #[serde(default)]
    pub trades: Vec<OrderTrade>,
}

/// A fill of an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTrade {
    /// Market ID.
    #[serde(default)]
    pub market: String,
    /// Trade ID.
    #[serde(default)]
    pub uuid: String,
    /// Fill price.
    pub price: Decimal,
    /// Fill volume.
    pub volume: Decimal,
    /// Fill value in the quote currency.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub funds: Option<Decimal>,
    /// Fill side.
    #[serde(default)]
    pub side: Option<Side>,
    /// Fill time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Parameters of a new order.
///
/// The same value is both URL-encoded for the query hash and serialized as
/// the JSON body, so field order here is the order on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceOrderRequest {
    /// Market ID (e.g. `KRW-BTC`).
    pub market: String,
    /// Order side.
    pub side: Side,
    /// Order volume; absent for market buys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    /// Limit price, or KRW notional for market buys; absent for market sells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Order type.
    pub ord_type: OrdType,
}

impl PlaceOrderRequest {
    /// Limit order at `price` for `volume`.
    pub fn limit(side: Side, market: impl Into<String>, price: Decimal, volume: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            volume: Some(volume),
            price: Some(price),
            ord_type: OrdType::Limit,
        }
    }

    /// Market buy spending `krw_amount`.
    pub fn market_buy(market: impl Into<String>, krw_amount: Decimal) -> Self {
        Self {
            market: market.into(),
            side: Side::Bid,
            volume: None,
            price: Some(krw_amount),
            ord_type: OrdType::Price,
        }
    }

    /// Market sell of `volume`.
    pub fn market_sell(market: impl Into<String>, volume: Decimal) -> Self {
        Self {
            market: market.into(),
            side: Side::Ask,
            volume: Some(volume),
            price: None,
            ord_type: OrdType::Market,
        }
    }
}

/// Filter for listing the orders of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderListFilter {
    /// Market ID.
    pub market: String,
    /// Order state (default `wait`).
    pub state: OrderState,
    /// Order kind (default `watch`).
    pub kind: OrderKind,
    /// Page size (default 100).
    pub limit: u32,
    /// Page number, from 1.
    pub page: u32,
    /// Sort order (default newest first).
    pub order_by: OrderBy,
}

impl OrderListFilter {
    /// Filter with default state, kind, limit, page and sort order.
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            state: OrderState::default(),
            kind: OrderKind::default(),
            limit: 100,
            page: 1,
            order_by: OrderBy::default(),
        }
    }

    /// Set the order state.
    pub fn state(mut self, state: OrderState) -> Self {
        self.state = state;
        self
    }

    /// Set the order kind.
    pub fn kind(mut self, kind: OrderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the sort order.
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }
}

/// What to look up with [`get_order`](crate::rest::BithumbRestClient::get_order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// A single order by ID.
    ById(String),
    /// The orders of one market.
    ByMarket(OrderListFilter),
}

impl OrderQuery {
    /// Look up a single order.
    pub fn by_id(uuid: impl Into<String>) -> Self {
        Self::ById(uuid.into())
    }

    /// List a market's orders with the default filter.
    pub fn by_market(market: impl Into<String>) -> Self {
        Self::ByMarket(OrderListFilter::new(market))
    }

    /// Decide from the shape of `ticker_or_uuid`: five dash-separated runs
    /// of word characters are an order ID, anything else is a market.
    ///
    /// ```rust
    /// use bithumb_api_client::rest::private::OrderQuery;
    ///
    /// assert!(matches!(OrderQuery::infer("a-b-c-d-e"), OrderQuery::ById(_)));
    /// assert!(matches!(OrderQuery::infer("KRW-BTC"), OrderQuery::ByMarket(_)));
    /// ```
    pub fn infer(ticker_or_uuid: &str) -> Self {
        if is_order_id(ticker_or_uuid) {
            Self::by_id(ticker_or_uuid)
        } else {
            Self::by_market(ticker_or_uuid)
        }
    }
}

fn is_order_id(s: &str) -> bool {
    let segments: Vec<&str> = s.split('-').collect();
    segments.len() == 5
        && segments.iter().all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
}

/// Result of [`get_order`](crate::rest::BithumbRestClient::get_order).
#[derive(Debug, Clone)]
pub enum OrderLookup {
    /// The order looked up by ID.
    Single(Order),
    /// The orders of a market.
    List(Vec<Order>),
}

impl OrderLookup {
    /// All orders in the result.
    pub fn into_orders(self) -> Vec<Order> {
        match self {
            OrderLookup::Single(order) => vec![order],
            OrderLookup::List(orders) => orders,
        }
    }
}

/// Parameters of a digital asset withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawCoinRequest {
    /// Currency code.
    pub currency: String,
    /// Network type, for currencies on several networks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_type: Option<String>,
    /// Amount to withdraw.
    pub amount: Decimal,
    /// Registered destination address.
    pub address: String,
    /// Secondary address (memo, tag), for currencies that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_address: Option<String>,
    /// Withdrawal type (`default` or `internal`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

impl WithdrawCoinRequest {
    /// Withdraw `amount` of `currency` to `address`.
    pub fn new(currency: impl Into<String>, amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            net_type: None,
            amount,
            address: address.into(),
            secondary_address: None,
            transaction_type: None,
        }
    }

    /// Set the network type.
    pub fn net_type(mut self, net_type: impl Into<String>) -> Self {
        self.net_type = Some(net_type.into());
        self
    }

    /// Set the secondary address.
    pub fn secondary_address(mut self, address: impl Into<String>) -> Self {
        self.secondary_address = Some(address.into());
        self
    }

    /// Set the withdrawal type.
    pub fn transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }
}

/// Parameters of a KRW withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawCashRequest {
    /// KRW amount.
    pub amount: Decimal,
}

/// Parameters of a withdrawal lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawStatusRequest {
    /// Withdrawal ID.
    pub uuid: String,
    /// Currency code.
    pub currency: String,
}

/// A withdrawal as reported by the exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct Withdrawal {
    /// Record type (`withdraw`).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Withdrawal ID.
    pub uuid: String,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
    /// Network type.
    #[serde(default)]
    pub net_type: Option<String>,
    /// Transaction ID, once broadcast.
    #[serde(default)]
    pub txid: Option<String>,
    /// Withdrawal state (e.g. `PROCESSING`, `DONE`).
    #[serde(default)]
    pub state: String,
    /// Creation time (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Completion time (ISO 8601).
    #[serde(default)]
    pub done_at: Option<String>,
    /// Amount withdrawn.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub amount: Option<Decimal>,
    /// Withdrawal fee.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub fee: Option<Decimal>,
    /// KRW value.
    #[serde(default, deserialize_with = "optional_decimal::deserialize")]
    pub krw_amount: Option<Decimal>,
    /// Withdrawal type.
    #[serde(default)]
    pub transaction_type: Option<String>,
}
